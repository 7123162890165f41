use clap::Parser;
use sortout::{Cli, Sortout, SortoutError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    let sortout = Sortout::from_cli(&cli);

    if cli.dry_run {
        return handle_dry_run(&sortout);
    }

    match sortout.organize() {
        Ok(report) => {
            sortout.output_formatter().print_run_report(&report);
            if report.any_copied() {
                0
            } else {
                1
            }
        }
        Err(error) => {
            sortout.handle_error(&error);
            exit_code_for(&error)
        }
    }
}

fn exit_code_for(error: &SortoutError) -> i32 {
    match error {
        SortoutError::SourceNotFound { .. } | SortoutError::SourceNotADirectory { .. } => 2,
        SortoutError::DestinationCreate { .. } => 3,
        SortoutError::TraversalFailed { .. } => 4,
        _ => 1,
    }
}

fn handle_dry_run(sortout: &Sortout) -> i32 {
    let formatter = sortout.output_formatter();
    let config = sortout.config();

    formatter.info("DRY RUN MODE - no files will be copied");
    formatter.print_separator();

    if !formatter.is_quiet() {
        println!("  Source:      {}", config.resolved_source().display());
        println!("  Destination: {}", config.resolved_destination().display());
        println!(
            "  Excluded:    {}",
            if config.exclude.is_empty() {
                "none".to_string()
            } else {
                config.exclude.display_list()
            }
        );
    }
    formatter.print_separator();

    let plan = match sortout.plan() {
        Ok(plan) => plan,
        Err(error) => {
            sortout.handle_error(&error);
            return exit_code_for(&error);
        }
    };

    let stats = &plan.statistics;
    formatter.info(&format!(
        "Found {} files in {} categories",
        stats.total_files,
        stats.files_by_category.len()
    ));

    if !formatter.is_quiet() {
        let mut categories: Vec<_> = stats.files_by_category.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (category, count) in categories {
            if config.exclude.contains(category) {
                println!("  {}: {} files (excluded)", category, count);
            } else {
                println!("  {}: {} files", category, count);
            }
        }
    }

    let excluded_files: usize = stats
        .files_by_category
        .iter()
        .filter(|(category, _)| config.exclude.contains(category))
        .map(|(_, count)| count)
        .sum();
    if excluded_files > 0 {
        formatter.warning(&format!(
            "{} files match excluded extensions and would be skipped",
            excluded_files
        ));
    }
    if plan.unreadable_entries > 0 {
        formatter.warning(&format!(
            "{} entries could not be read and would be skipped",
            plan.unreadable_entries
        ));
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to copy the files");
    0
}
