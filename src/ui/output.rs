use crate::error::UserFriendlyError;
use crate::organizer::OrganizeReport;
use crate::ui::progress::ProgressManager;
use console::{style, Emoji, Term};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");
static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "* ");
static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageType {
    Success,
    Skip,
    Error,
    Warning,
    Info,
    Debug,
}

impl MessageType {
    fn as_str(&self) -> &'static str {
        match self {
            MessageType::Success => "success",
            MessageType::Skip => "skip",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Info => "info",
            MessageType::Debug => "debug",
        }
    }

    fn plain_prefix(&self) -> &'static str {
        match self {
            MessageType::Success => "OK",
            MessageType::Skip => "SKIP",
            MessageType::Error => "ERROR",
            MessageType::Warning => "WARN",
            MessageType::Info => "INFO",
            MessageType::Debug => "DEBUG",
        }
    }

    fn is_error_channel(&self) -> bool {
        matches!(self, MessageType::Error | MessageType::Warning)
    }
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose_level: u8, quiet: bool) -> Self {
        let use_colors =
            mode == OutputMode::Human && Term::stdout().features().colors_supported();
        Self {
            mode,
            use_colors,
            verbose_level,
            quiet,
        }
    }

    // Core messaging methods

    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_message(MessageType::Success, message);
        }
    }

    pub fn skip(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_message(MessageType::Skip, message);
        }
    }

    /// Errors are never suppressed, not even in quiet mode.
    pub fn error(&self, message: &str) {
        self.print_message(MessageType::Error, message);
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_message(MessageType::Warning, message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_message(MessageType::Info, message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            self.print_message(MessageType::Debug, message);
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if !self.should_show_message(0) {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", ROCKET, style(operation).bold());
                } else {
                    println!("{}{}", ROCKET, operation);
                }
            }
            OutputMode::Json => self.print_json_message("start", operation),
            OutputMode::Plain => println!("START: {}", operation),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }
        println!("{}", "-".repeat(50));
    }

    pub fn print_user_friendly_error(&self, error: &dyn UserFriendlyError) {
        match self.mode {
            OutputMode::Json => {
                let json = serde_json::json!({
                    "type": "error",
                    "message": error.user_message(),
                    "suggestion": error.suggestion(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                });
                println!("{}", json);
            }
            _ => {
                eprintln!("{}{}", CROSS, error.user_message());
                if let Some(suggestion) = error.suggestion() {
                    eprintln!("{}Suggestion: {}", INFO, suggestion);
                }
            }
        }
    }

    /// Final report for the run, rendered per output mode. The JSON
    /// document is emitted even in quiet mode so that `--quiet
    /// --output-format json` stays machine-readable.
    pub fn print_run_report(&self, report: &OrganizeReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string_pretty(report) {
                    println!("{}", json);
                }
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    // Private helper methods

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_message(&self, msg_type: MessageType, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(msg_type, message),
            OutputMode::Json => self.print_json_message(msg_type.as_str(), message),
            OutputMode::Plain => {
                if msg_type.is_error_channel() {
                    eprintln!("{}: {}", msg_type.plain_prefix(), message);
                } else {
                    println!("{}: {}", msg_type.plain_prefix(), message);
                }
            }
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        let styled = if self.use_colors {
            match msg_type {
                MessageType::Success => style(message).green().to_string(),
                MessageType::Skip => style(message).dim().to_string(),
                MessageType::Error => style(message).red().to_string(),
                MessageType::Warning => style(message).yellow().to_string(),
                MessageType::Info => message.to_string(),
                MessageType::Debug => style(message).dim().to_string(),
            }
        } else {
            message.to_string()
        };

        let line = match msg_type {
            MessageType::Success => format!("{}{}", CHECKMARK, styled),
            MessageType::Skip => format!("{}{}", SKIP, styled),
            MessageType::Error => format!("{}{}", CROSS, styled),
            MessageType::Warning => format!("{}{}", WARNING, styled),
            MessageType::Info => format!("{}{}", INFO, styled),
            MessageType::Debug => styled,
        };

        if msg_type.is_error_channel() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn print_json_message(&self, msg_type: &str, message: &str) {
        let json = serde_json::json!({
            "type": msg_type,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        println!("{}", json);
    }

    fn print_human_report(&self, report: &OrganizeReport) {
        if self.quiet {
            return;
        }

        println!();
        self.print_separator();
        if self.use_colors {
            println!("{}{}", PARTY, style("Organization complete!").green().bold());
        } else {
            println!("{}Organization complete!", PARTY);
        }
        println!();
        println!(
            "  Copied:  {} files ({})",
            report.counters.copied,
            format_bytes(report.bytes_copied)
        );
        println!("  Skipped: {} files", report.counters.skipped);
        println!("  Errors:  {}", report.counters.errors);
        println!("  Time:    {:.1}s", report.duration.as_secs_f64());

        if !report.files_by_category.is_empty() {
            println!();
            println!("  Copied by category:");
            let mut categories: Vec<_> = report.files_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (category, count) in categories {
                println!("    {}: {} files", category, count);
            }
        }

        println!();
        if self.use_colors {
            println!(
                "{}Output location: {}",
                FOLDER,
                style(report.destination.display()).cyan()
            );
        } else {
            println!("{}Output location: {}", FOLDER, report.destination.display());
        }
        self.print_separator();
    }

    fn print_plain_report(&self, report: &OrganizeReport) {
        if self.quiet {
            return;
        }

        println!("Organization complete");
        println!("Copied: {}", report.counters.copied);
        println!("Skipped: {}", report.counters.skipped);
        println!("Errors: {}", report.counters.errors);
        println!("Bytes: {}", report.bytes_copied);
        println!("Destination: {}", report.destination.display());
    }
}

/// Formatter wrapper that lifts live progress bars out of the way
/// before printing a line.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn success(&self, message: &str) {
        self.suspend_and_print(|| self.formatter.success(message));
    }

    pub fn skip(&self, message: &str) {
        self.suspend_and_print(|| self.formatter.skip(message));
    }

    pub fn error(&self, message: &str) {
        self.suspend_and_print(|| self.formatter.error(message));
    }

    pub fn info(&self, message: &str) {
        self.suspend_and_print(|| self.formatter.info(message));
    }

    fn suspend_and_print<F: FnOnce()>(&self, print_fn: F) {
        match self.progress_manager {
            Some(manager) => manager.suspend(print_fn),
            None => print_fn(),
        }
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

    #[test]
    fn test_output_mode_from_string() {
        assert_eq!(OutputMode::from_string("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_string("PLAIN"), OutputMode::Plain);
        assert_eq!(OutputMode::from_string("human"), OutputMode::Human);
        assert_eq!(OutputMode::from_string("anything"), OutputMode::Human);
    }

    #[test]
    fn test_quiet_suppresses_normal_messages() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, true);
        assert!(!formatter.should_show_message(0));
        assert!(!formatter.should_show_message(1));
    }

    #[test]
    fn test_verbose_levels() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert!(formatter.should_show_message(0));
        assert!(!formatter.should_show_message(1));

        let verbose = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(verbose.should_show_message(1));
    }

    #[test]
    fn test_colors_only_in_human_mode() {
        let json = OutputFormatter::new(OutputMode::Json, 0, false);
        let plain = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert!(!json.use_colors);
        assert!(!plain.use_colors);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
    }
}
