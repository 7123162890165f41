use crate::config::{ExcludeSet, RunConfig};
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sortout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Copy files into folders named after their extensions")]
#[command(
    long_about = "sortout walks a source directory tree, classifies every regular file by \
                  its extension and copies it into a matching subfolder of the destination. \
                  Files without an extension go to a no_extension folder. Name collisions \
                  get an incrementing numeric suffix; nothing in the source is ever moved \
                  or deleted."
)]
#[command(after_help = "EXAMPLES:
    sortout ~/Downloads ~/sorted
    sortout ~/Downloads ~/sorted --exclude tmp,ini,sys
    sortout /data/in /data/out --dry-run --verbose
    sortout /data/in /data/out --output-format json --quiet")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Source directory to organize
    pub source: PathBuf,

    /// Destination directory receiving one folder per extension
    pub destination: PathBuf,

    /// Extensions to skip, comma-separated (case-insensitive, leading dots ignored)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Output format for messages and the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output (adds scan statistics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress everything except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Plain,
}

impl Cli {
    pub fn build_config(&self) -> RunConfig {
        RunConfig::new(
            self.source.clone(),
            self.destination.clone(),
            ExcludeSet::from_tokens(&self.exclude),
        )
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
