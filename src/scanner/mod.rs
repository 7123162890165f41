pub mod classify;
pub mod source_scanner;

pub use classify::NO_EXTENSION;
pub use source_scanner::{scan_source, Candidate, ScanEntry, ScanStatistics};
