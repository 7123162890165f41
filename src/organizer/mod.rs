pub mod file_copier;
pub mod run_report;

pub use file_copier::{CopiedFile, FileCopier};
pub use run_report::{OrganizeReport, RunCounters};
