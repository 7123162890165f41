use crate::error::{Result, SortoutError};
use crate::scanner::classify;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular, non-hidden file found under the source directory.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub file_name: String,
    pub category: String,
    pub size: u64,
}

/// One enumeration result. Entries that cannot be read do not abort the
/// walk; they are reported so the run can count them.
#[derive(Debug)]
pub enum ScanEntry {
    File(Candidate),
    Unreadable {
        path: Option<PathBuf>,
        message: String,
    },
}

impl ScanEntry {
    fn unreadable(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf);
        let message = match err.io_error() {
            Some(io) => io.to_string(),
            None => err.to_string(),
        };
        ScanEntry::Unreadable { path, message }
    }
}

/// Walks the source tree and classifies every candidate file.
///
/// Fails only when the walk cannot start at all. Entries below the root
/// that cannot be read come back as `ScanEntry::Unreadable`.
pub fn scan_source(root: &Path) -> Result<Vec<ScanEntry>> {
    let mut entries = Vec::new();

    // Security: don't follow symlinks during traversal
    let walker = WalkDir::new(root).follow_links(false);

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                // Depth zero means the root itself could not be opened.
                if err.depth() == 0 {
                    return Err(SortoutError::TraversalFailed {
                        path: root.display().to_string(),
                        source: err.into_io_error().unwrap_or_else(|| {
                            std::io::Error::new(
                                std::io::ErrorKind::Other,
                                "directory walk could not start",
                            )
                        }),
                    });
                }
                entries.push(ScanEntry::unreadable(err));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if classify::is_hidden_name(&file_name) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => {
                let category = classify::category_for(entry.path());
                entries.push(ScanEntry::File(Candidate {
                    path: entry.path().to_path_buf(),
                    file_name,
                    category,
                    size: metadata.len(),
                }));
            }
            Err(err) => entries.push(ScanEntry::unreadable(err)),
        }
    }

    Ok(entries)
}

/// Aggregate numbers over the candidates of one scan.
#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_bytes: u64,
    pub files_by_category: HashMap<String, usize>,
}

impl ScanStatistics {
    pub fn collect(candidates: &[Candidate]) -> Self {
        let mut stats = ScanStatistics::default();
        for candidate in candidates {
            stats.total_files += 1;
            stats.total_bytes += candidate.size;
            *stats
                .files_by_category
                .entry(candidate.category.clone())
                .or_insert(0) += 1;
        }
        stats
    }

    /// Multi-line rendering sorted by count, then name.
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan results: {} files, {}",
            self.total_files,
            format_bytes(self.total_bytes)
        );

        let mut categories: Vec<_> = self.files_by_category.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (category, count) in categories {
            summary.push_str(&format!("\n  {}: {} files", category, count));
        }

        summary
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn candidates(entries: Vec<ScanEntry>) -> Vec<Candidate> {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                ScanEntry::File(candidate) => Some(candidate),
                ScanEntry::Unreadable { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_finds_nested_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(temp.path().join("sub/deeper")).unwrap();
        fs::write(temp.path().join("sub/deeper/b.md"), "b").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|c| c.file_name == "b.md"));
    }

    #[test]
    fn test_hidden_files_are_dropped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".hidden.cfg"), "x").unwrap();
        fs::write(temp.path().join("visible.cfg"), "x").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, "visible.cfg");
    }

    #[test]
    fn test_hidden_directories_are_still_traversed() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/config.ini"), "x").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "ini");
    }

    #[test]
    fn test_directories_are_not_candidates() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("folder.txt")).unwrap();
        fs::write(temp.path().join("real.txt"), "x").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, "real.txt");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        assert!(matches!(
            scan_source(&missing),
            Err(SortoutError::TraversalFailed { .. })
        ));
    }

    #[test]
    fn test_candidates_carry_categories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Upper.TXT"), "x").unwrap();
        fs::write(temp.path().join("plain"), "x").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        let mut categories: Vec<_> = found.iter().map(|c| c.category.as_str()).collect();
        categories.sort();
        assert_eq!(categories, vec![classify::NO_EXTENSION, "txt"]);
    }

    #[test]
    fn test_statistics_by_category() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "aaaa").unwrap();
        fs::write(temp.path().join("b.txt"), "bb").unwrap();
        fs::write(temp.path().join("c.md"), "c").unwrap();

        let found = candidates(scan_source(temp.path()).unwrap());
        let stats = ScanStatistics::collect(&found);
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_bytes, 7);
        assert_eq!(stats.files_by_category["txt"], 2);
        assert_eq!(stats.files_by_category["md"], 1);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }
}
