//! HN-Scout main entry point
//!
//! This is the command-line interface for the HN-Scout pattern search.

use anyhow::Context;
use clap::Parser;
use hn_scout::config::{load_task_input, read_config_with_hash, validate, Config};
use hn_scout::output::{ConsoleSink, JsonFileSink, MarkdownSink, MultiSink};
use hn_scout::FetchMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HN-Scout: pattern-driven discovery over Hacker News
///
/// HN-Scout pages through the newest Hacker News stories for a search term,
/// keeps the ones whose title matches a regular expression, optionally scans
/// their discussions for matching comments, and prints a JSON report.
#[derive(Parser, Debug)]
#[command(name = "hn-scout")]
#[command(version)]
#[command(about = "Pattern search over Hacker News stories and comments", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// JSON task input whose values override the configuration file
    #[arg(long, value_name = "FILE")]
    task: Option<PathBuf>,

    /// Query text sent to the search source
    #[arg(long)]
    search_term: Option<String>,

    /// Regular expression tested against titles and comments
    #[arg(long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Number of matching entries to collect
    #[arg(long, value_name = "N")]
    max_results: Option<usize>,

    /// Also scan the discussions of the leading matches
    #[arg(long)]
    check_comments: bool,

    /// Fetch in headless mode
    #[arg(long)]
    headless: bool,

    /// Write the report as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write a markdown summary to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Validate config and show the effective settings without fetching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hn_scout=info,warn"),
            1 => EnvFilter::new("hn_scout=debug,info"),
            2 => EnvFilter::new("hn_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: CLI flags > task file > TOML > defaults
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            // Validated below, once the task file and CLI flags are applied
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(path) = &cli.task {
        let task = load_task_input(path)
            .with_context(|| format!("Failed to load task input from {}", path.display()))?;
        tracing::debug!("Applying task input: {:?}", task);
        task.apply(&mut config.search);
    }

    if let Some(term) = &cli.search_term {
        config.search.search_term = term.clone();
    }
    if let Some(pattern) = &cli.pattern {
        config.search.regex_pattern = pattern.clone();
    }
    if let Some(max) = cli.max_results {
        config.search.max_results = max;
    }
    if cli.check_comments {
        config.search.check_comments = true;
    }
    if cli.headless {
        config.search.fetch_mode = FetchMode::Headless;
    }
    if let Some(path) = &cli.json {
        config.output.json_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config) {
    println!("=== HN-Scout Dry Run ===\n");

    println!("Search:");
    println!("  Term: {}", config.search.search_term);
    println!("  Pattern: {}", config.search.regex_pattern);
    println!("  Max results: {}", config.search.max_results);
    println!("  Check comments: {}", config.search.check_comments);
    println!("  Mode: {}", config.search.fetch_mode);

    println!("\nLimits:");
    println!("  Page ceiling: {}", config.limits.page_ceiling);
    println!("  Thread limit: {}", config.limits.thread_limit);
    println!("  Comment limit: {}", config.limits.comment_limit);
    println!("  Politeness delay: {}ms", config.limits.politeness_delay);
    println!("  Fetch timeout: {}ms", config.limits.fetch_timeout);
    match config.limits.run_timeout {
        Some(ms) => println!("  Run timeout: {}ms", ms),
        None => println!("  Run timeout: none"),
    }

    println!("\nSource:");
    println!("  API: {}", config.source.api_url);
    println!("  Items: {}", config.source.item_url);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!(
        "  JSON: {}",
        config.output.json_path.as_deref().unwrap_or("(stdout only)")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(none)")
    );

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch at most {} pages of '{}'",
        config.limits.page_ceiling, config.search.search_term
    );
}

/// Handles the main search run
async fn handle_run(config: Config) -> anyhow::Result<()> {
    let mut sink = MultiSink::new().with(ConsoleSink::new());
    if let Some(path) = &config.output.json_path {
        sink = sink.with(JsonFileSink::new(path));
    }
    if let Some(path) = &config.output.summary_path {
        sink = sink.with(MarkdownSink::new(path));
    }

    let cancel = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Interrupt received, stopping");
    };

    match hn_scout::execute(&config, &sink, cancel).await {
        Ok(report) => {
            tracing::info!(
                "Search completed successfully ({} matches)",
                report.total_match_count()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err(e.into())
        }
    }
}
