use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortoutError {
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: String },

    #[error("Source is not a directory: {path}")]
    SourceNotADirectory { path: String },

    #[error("Cannot create destination directory: {path}")]
    DestinationCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read source directory: {path}")]
    TraversalFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create category folder: {path}")]
    CategoryDirCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {source_path} to {destination}")]
    CopyFailed {
        source_path: String,
        destination: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SortoutError>;

/// Trait for providing user-friendly error messages
pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SortoutError {
    fn user_message(&self) -> String {
        match self {
            SortoutError::SourceNotFound { path } => {
                format!("The source directory '{}' does not exist", path)
            }
            SortoutError::SourceNotADirectory { path } => {
                format!("'{}' exists but is not a directory", path)
            }
            SortoutError::DestinationCreate { path, source } => {
                format!("Could not create the destination directory '{}': {}", path, source)
            }
            SortoutError::TraversalFailed { path, source } => {
                format!("Could not read the source directory '{}': {}", path, source)
            }
            SortoutError::CategoryDirCreate { path, source } => {
                format!("Could not create the category folder '{}': {}", path, source)
            }
            SortoutError::CopyFailed {
                source_path,
                destination,
                source,
            } => {
                format!("Could not copy '{}' to '{}': {}", source_path, destination, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SortoutError::SourceNotFound { .. } => Some(
                "Check the path for typos and make sure the directory exists".to_string(),
            ),
            SortoutError::SourceNotADirectory { .. } => Some(
                "Pass the directory that contains the files, not a file".to_string(),
            ),
            SortoutError::DestinationCreate { .. } => Some(
                "Check that the parent of the destination is writable, or choose another destination"
                    .to_string(),
            ),
            SortoutError::TraversalFailed { .. } => Some(
                "Check the read permissions on the source directory".to_string(),
            ),
            SortoutError::CategoryDirCreate { .. } => Some(
                "A file with the same name as the category folder may already exist in the destination"
                    .to_string(),
            ),
            SortoutError::CopyFailed { .. } => Some(
                "Check free disk space and write permissions on the destination".to_string(),
            ),
            _ => None,
        }
    }
}
