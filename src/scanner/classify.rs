use std::path::Path;

/// Category used for files that have no extension.
pub const NO_EXTENSION: &str = "no_extension";

/// Maps a file path to its category folder name.
///
/// The category is the lower-cased extension without the dot. Only the
/// last extension counts, so `archive.tar.gz` lands in `gz`. A trailing
/// dot with nothing after it counts as no extension.
pub fn category_for(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => ext.to_lowercase(),
        _ => NO_EXTENSION.to_string(),
    }
}

/// Hidden files are identified by their base name alone. Hidden
/// directories are still traversed; only hidden files are dropped.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Splits a file name into stem and suffix for collision renaming.
///
/// The suffix keeps its dot so `report.pdf` becomes `("report", ".pdf")`
/// and a renamed copy reads `report_1.pdf`. A leading dot is part of the
/// stem, and a name without a dot has an empty suffix.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}
