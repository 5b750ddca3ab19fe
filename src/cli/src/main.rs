//! CLI for the GitHub-to-Jira issue migrator.
//!
//! This tool fetches labelled GitHub issues, translates their bodies and
//! comments to Jira wiki markup, rehosts embedded images as attachments,
//! and creates the corresponding Jira issues.

use clap::Parser;
use gh_jira_migrate::{Credentials, MigrationConfig, RunSummary, Runner, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GitHub to Jira Migrator - Move labelled GitHub issues to Jira with their comments and images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the migration config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    github_token: String,

    /// Jira API token.
    #[arg(long, env = "JIRA_TOKEN")]
    jira_token: String,

    /// Browser session cookie for images behind SSO.
    #[arg(long, env = "GH_SESSION_COOKIE")]
    session_cookie: Option<String>,

    /// Labels an issue must carry to be migrated (overrides config).
    #[arg(short = 'l', long, value_delimiter = ',')]
    label_filter: Vec<String>,

    /// Labels excluding an issue from migration (overrides config).
    #[arg(short = 'e', long, value_delimiter = ',')]
    label_exclusions: Vec<String>,

    /// Label applied to migrated issues (overrides config).
    #[arg(short = 'c', long)]
    completion_label: Option<String>,

    /// Completion label for issues left open (overrides config).
    #[arg(short = 's', long)]
    squad_completion_label: Option<String>,

    /// Check Jira for already-linked issues before creating.
    #[arg(long)]
    check_duplicates: bool,

    /// Preview mappings without touching GitHub or Jira.
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose);

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info",
///   forced to "debug" by `--verbose`)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        .with(filter)
        // Register as the global default subscriber
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut settings = MigrationConfig::read(&args.config)?;

    // Flags override file values; validation runs on the merged result.
    if !args.label_filter.is_empty() {
        settings.label_filter = args.label_filter;
    }
    if !args.label_exclusions.is_empty() {
        settings.label_exclusions = args.label_exclusions;
    }
    if let Some(label) = args.completion_label {
        settings.completion_label = label;
    }
    if let Some(label) = args.squad_completion_label {
        settings.squad_completion_label = Some(label);
    }
    if args.check_duplicates {
        settings.check_duplicates = true;
    }
    settings.validate(&args.config)?;

    let credentials = Credentials {
        github_token: args.github_token,
        jira_token: args.jira_token,
        session_cookie: args.session_cookie,
    };
    let runner = Runner::new(&settings, credentials, args.dry_run)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues mapped: {}", summary.issues_mapped);

    if summary.dry_run {
        println!("  Issues planned: {}", summary.issues_planned);
    } else {
        println!("  Issues migrated: {}", summary.issues_migrated);
        println!("  Issues failed: {}", summary.failed.len());
    }

    if !summary.duplicates.is_empty() {
        println!("  Duplicates skipped: {}", summary.duplicates.len());
        for (source_url, keys) in &summary.duplicates {
            println!("    {} -> {}", source_url, keys.join(", "));
        }
    }
    for source_url in &summary.failed {
        println!("  Failed: {source_url}");
    }
}
