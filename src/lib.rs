pub mod cli;
pub mod config;
pub mod error;
pub mod organizer;
pub mod scanner;
pub mod ui;

pub use cli::{Cli, OutputFormat};
pub use config::{ExcludeSet, RunConfig};
pub use error::{Result, SortoutError, UserFriendlyError};
pub use organizer::{CopiedFile, FileCopier, OrganizeReport, RunCounters};
pub use scanner::{Candidate, ScanEntry, ScanStatistics, NO_EXTENSION};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use crate::ui::ProgressAwareOutput;
use std::path::Path;
use std::time::Instant;

/// What a run would do, without doing it. Produced by [`Sortout::plan`]
/// for dry runs.
#[derive(Debug)]
pub struct OrganizePlan {
    pub statistics: ScanStatistics,
    pub unreadable_entries: usize,
}

/// Main application struct wiring configuration, output and progress
/// together for one run.
pub struct Sortout {
    config: RunConfig,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Sortout {
    pub fn new(config: RunConfig, output_mode: OutputMode, verbose_level: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose_level, quiet);
        // Live bars only make sense for interactive human output.
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(
            cli.build_config(),
            cli.output_mode(),
            cli.verbosity_level(),
            cli.quiet,
        )
    }

    /// Runs the whole pipeline from validation through the per-file
    /// copy loop. Once enumeration has succeeded the run never aborts;
    /// copy failures are counted and reported per file.
    pub fn organize(&self) -> Result<OrganizeReport> {
        let started = Instant::now();

        self.output_formatter.start_operation("Starting file organization");
        self.output_formatter.info(&format!(
            "Source: {}",
            self.config.resolved_source().display()
        ));
        self.output_formatter.info(&format!(
            "Destination: {}",
            self.config.resolved_destination().display()
        ));
        if !self.config.exclude.is_empty() {
            self.output_formatter.info(&format!(
                "Excluded extensions: {}",
                self.config.exclude.display_list()
            ));
        }

        // Source first: a missing source must not create the destination.
        self.config.validate()?;
        self.config.ensure_destination()?;

        let source_root = self.config.resolved_source();
        let destination_root = self.config.resolved_destination();
        let mut report = OrganizeReport::begin(source_root.clone(), destination_root.clone());

        let entries = scanner::scan_source(&source_root)?;
        let mut candidates = Vec::new();
        for entry in entries {
            match entry {
                ScanEntry::File(candidate) => candidates.push(candidate),
                ScanEntry::Unreadable { path, message } => {
                    let line = unreadable_line(path.as_deref(), &message);
                    self.output_formatter.error(&line);
                    report.record_unreadable(line);
                }
            }
        }

        self.output_formatter
            .info(&format!("Found {} files to process", candidates.len()));
        self.output_formatter
            .debug(&ScanStatistics::collect(&candidates).display_summary());

        let progress = self
            .progress_manager
            .create_copy_progress(candidates.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let copier = FileCopier::new(destination_root);

        for candidate in &candidates {
            if self.config.exclude.contains(&candidate.category) {
                output.skip(&format!(
                    "Skipped {} (excluded extension: {})",
                    candidate.file_name, candidate.category
                ));
                report.record_skipped();
                progress.inc(1);
                continue;
            }

            match copier.copy_candidate(candidate) {
                Ok(copied) => {
                    output.success(&format!(
                        "Copied {} to {}/",
                        candidate.file_name, candidate.category
                    ));
                    report.record_copied(&candidate.category, copied.bytes);
                }
                Err(err) => {
                    let line = err.user_message();
                    output.error(&line);
                    report.record_error(line);
                }
            }
            progress.inc(1);
        }

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Processed {} files", candidates.len()),
            started.elapsed(),
        );

        report.finish(started.elapsed());
        Ok(report)
    }

    /// Validates and enumerates without creating anything.
    pub fn plan(&self) -> Result<OrganizePlan> {
        self.config.validate()?;

        let entries = scanner::scan_source(&self.config.resolved_source())?;
        let mut candidates = Vec::new();
        let mut unreadable_entries = 0;
        for entry in entries {
            match entry {
                ScanEntry::File(candidate) => candidates.push(candidate),
                ScanEntry::Unreadable { path, message } => {
                    self.output_formatter
                        .error(&unreadable_line(path.as_deref(), &message));
                    unreadable_entries += 1;
                }
            }
        }

        Ok(OrganizePlan {
            statistics: ScanStatistics::collect(&candidates),
            unreadable_entries,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &SortoutError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

fn unreadable_line(path: Option<&Path>, message: &str) -> String {
    match path {
        Some(path) => format!("Skipped unreadable entry {}: {}", path.display(), message),
        None => format!("Skipped unreadable entry: {}", message),
    }
}

/// One-call convenience with default human output.
pub fn organize_directory(
    source: &Path,
    destination: &Path,
    exclude: &[String],
) -> Result<OrganizeReport> {
    let config = RunConfig::new(
        source.to_path_buf(),
        destination.to_path_buf(),
        ExcludeSet::from_tokens(exclude),
    );
    Sortout::new(config, OutputMode::Human, 0, false).organize()
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
