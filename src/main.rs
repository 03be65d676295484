use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fixed_patch::config::{DEFAULT_REPLACEMENT, DEFAULT_SOURCE_PATH, DEFAULT_TARGET};
use fixed_patch::logging::init_cli_logger;
use fixed_patch::{run, PatchSpec, RunOptions, RunOutcome};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fixed-patch")]
#[command(
    about = "Rewrite totalTTC.toFixed(2) to a null-safe form, in place",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// File to patch
    #[arg(short, long, default_value = DEFAULT_SOURCE_PATH)]
    file: PathBuf,

    /// Literal fragment to search for
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    target: String,

    /// Literal fragment substituted for every occurrence of the target
    #[arg(short, long, default_value = DEFAULT_REPLACEMENT)]
    replacement: String,

    /// Dry run - show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Print the outcome as JSON instead of the human report
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let spec = PatchSpec::new(cli.file, cli.target, cli.replacement);
    let options = RunOptions {
        dry_run: cli.dry_run,
        ..RunOptions::default()
    };

    let outcome = run(&spec, &options)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("serializing outcome")?;
        println!("{json}");
        return Ok(());
    }

    print_report(&outcome, cli.dry_run);

    if cli.diff && outcome.changed() {
        display_diff(&outcome.path, &outcome.before, &outcome.after);
    }

    println!();
    if cli.dry_run {
        println!(
            "{} {} ({}, nothing written)",
            "⊘".cyan(),
            outcome.path.display(),
            outcome.report
        );
    } else {
        println!(
            "{} File patched: {} ({})",
            "✓".green(),
            outcome.path.display(),
            outcome.report
        );
    }

    Ok(())
}

fn print_report(outcome: &RunOutcome, dry_run: bool) {
    if outcome.report.is_empty() {
        println!("{}", "No occurrences found".dimmed());
        return;
    }

    let verb = if dry_run { "Would fix as" } else { "Fixed as" };
    for change in outcome.report.iter() {
        println!(
            "{} {}",
            format!("Line {} to fix:", change.line_number).yellow(),
            change.before
        );
        println!("{} {}", format!("{verb}:").green(), change.after);
    }
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", line);
        if change.missing_newline() {
            println!();
        }
    }
}
