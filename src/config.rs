use crate::error::{Result, SortoutError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for one organize run.
///
/// There is no configuration file and no environment surface; everything
/// comes from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub exclude: ExcludeSet,
}

impl RunConfig {
    pub fn new(source: PathBuf, destination: PathBuf, exclude: ExcludeSet) -> Self {
        Self {
            source,
            destination,
            exclude,
        }
    }

    /// Checks the source before anything is created on disk.
    pub fn validate(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(SortoutError::SourceNotFound {
                path: self.resolved_source().display().to_string(),
            });
        }
        if !self.source.is_dir() {
            return Err(SortoutError::SourceNotADirectory {
                path: self.resolved_source().display().to_string(),
            });
        }
        Ok(())
    }

    /// Creates the destination base directory, parents included.
    pub fn ensure_destination(&self) -> Result<()> {
        fs::create_dir_all(&self.destination).map_err(|e| SortoutError::DestinationCreate {
            path: self.resolved_destination().display().to_string(),
            source: e,
        })
    }

    pub fn resolved_source(&self) -> PathBuf {
        resolve_display_path(&self.source)
    }

    pub fn resolved_destination(&self) -> PathBuf {
        resolve_display_path(&self.destination)
    }
}

/// Normalized set of extension names to skip during the copy phase.
///
/// Tokens are compared case-insensitively and without leading dots, so
/// `.TXT`, `txt` and `TXT` all name the same category. The special
/// `no_extension` category can be excluded like any other.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    tokens: HashSet<String>,
}

impl ExcludeSet {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|token| normalize_token(token.as_ref()))
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.tokens.contains(&category.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Stable comma-separated rendering for banners and dry-run output.
    pub fn display_list(&self) -> String {
        let mut tokens: Vec<_> = self.tokens.iter().cloned().collect();
        tokens.sort();
        tokens.join(", ")
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().trim_start_matches('.').to_lowercase()
}

// Canonicalize where possible; a destination that does not exist yet
// still needs a sensible absolute path for display.
fn resolve_display_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| absolutize(path))
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exclude_normalization() {
        let set = ExcludeSet::from_tokens([" .TXT ", "Log", "..ini"]);
        assert!(set.contains("txt"));
        assert!(set.contains("log"));
        assert!(set.contains("ini"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_exclude_is_case_insensitive() {
        let set = ExcludeSet::from_tokens(["tmp"]);
        assert!(set.contains("TMP"));
        assert!(set.contains("Tmp"));
        assert!(!set.contains("tm"));
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        let set = ExcludeSet::from_tokens(["", "  ", "...", "txt"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("txt"));
    }

    #[test]
    fn test_sentinel_category_is_excludable() {
        let set = ExcludeSet::from_tokens(["no_extension"]);
        assert!(set.contains("no_extension"));
    }

    #[test]
    fn test_display_list_is_sorted() {
        let set = ExcludeSet::from_tokens(["zip", "avi", "txt"]);
        assert_eq!(set.display_list(), "avi, txt, zip");
    }

    #[test]
    fn test_validate_missing_source() {
        let temp = TempDir::new().unwrap();
        let config = RunConfig::new(
            temp.path().join("missing"),
            temp.path().join("dest"),
            ExcludeSet::default(),
        );
        assert!(matches!(
            config.validate(),
            Err(SortoutError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_source_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "data").unwrap();
        let config = RunConfig::new(file, temp.path().join("dest"), ExcludeSet::default());
        assert!(matches!(
            config.validate(),
            Err(SortoutError::SourceNotADirectory { .. })
        ));
    }

    #[test]
    fn test_ensure_destination_creates_parents() {
        let temp = TempDir::new().unwrap();
        let config = RunConfig::new(
            temp.path().to_path_buf(),
            temp.path().join("a/b/c"),
            ExcludeSet::default(),
        );
        config.ensure_destination().unwrap();
        assert!(temp.path().join("a/b/c").is_dir());
    }
}
