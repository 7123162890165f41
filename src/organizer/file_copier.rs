use crate::error::{Result, SortoutError};
use crate::scanner::{classify, Candidate};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one successful copy.
#[derive(Debug)]
pub struct CopiedFile {
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Copies candidates into category folders under a destination base.
pub struct FileCopier {
    destination_base: PathBuf,
}

impl FileCopier {
    pub fn new(destination_base: PathBuf) -> Self {
        Self { destination_base }
    }

    /// Copies one candidate into `<destination>/<category>/`, renaming on
    /// collision. The source file is never modified or removed.
    pub fn copy_candidate(&self, candidate: &Candidate) -> Result<CopiedFile> {
        let category_dir = self.destination_base.join(&candidate.category);
        fs::create_dir_all(&category_dir).map_err(|e| SortoutError::CategoryDirCreate {
            path: category_dir.display().to_string(),
            source: e,
        })?;

        let target = resolve_collision(&category_dir, &candidate.file_name);

        let bytes = fs::copy(&candidate.path, &target).map_err(|e| SortoutError::CopyFailed {
            source_path: candidate.path.display().to_string(),
            destination: target.display().to_string(),
            source: e,
        })?;

        preserve_file_times(&candidate.path, &target);

        Ok(CopiedFile {
            destination: target,
            bytes,
        })
    }
}

/// Picks a free name in `dir` for `file_name`.
///
/// The original name is tried first, then `stem_1.ext`, `stem_2.ext` and
/// so on. Each try costs one existence check, so the cost grows with the
/// number of existing collisions, not with the folder size.
pub fn resolve_collision(dir: &Path, file_name: &str) -> PathBuf {
    let mut target = dir.join(file_name);
    if !target.exists() {
        return target;
    }

    let (stem, suffix) = classify::split_name(file_name);
    let mut counter: u64 = 1;
    loop {
        target = dir.join(format!("{}_{}{}", stem, counter, suffix));
        if !target.exists() {
            return target;
        }
        counter += 1;
    }
}

// Best effort: a copy whose timestamps cannot be set is still a copy.
fn preserve_file_times(source: &Path, target: &Path) {
    if let Ok(metadata) = fs::metadata(source) {
        let mtime = FileTime::from_last_modification_time(&metadata);
        let atime = FileTime::from_last_access_time(&metadata);
        let _ = filetime::set_file_times(target, atime, mtime);
    }
}
