//! Khaki-Scout main entry point
//!
//! This is the command-line interface for the Khaki-Scout price comparison
//! scraper.

use anyhow::Context;
use clap::Parser;
use khaki_scout::config::{load_config_with_hash, Config};
use khaki_scout::orchestrator::Orchestrator;
use khaki_scout::output::{
    load_results, print_report, print_statistics, JsonOutput, MarkdownOutput, OutputHandler,
    RunStatistics,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Khaki-Scout: concurrent price comparison across retailers
///
/// Khaki-Scout queries every configured retailer at once, normalizes the
/// products it finds, and reports the lowest price across all of them.
#[derive(Parser, Debug)]
#[command(name = "khaki-scout")]
#[command(version = "1.0.0")]
#[command(about = "Concurrent price comparison across retailers", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", required_unless_present = "report")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "report")]
    dry_run: bool,

    /// Print the report of a previously saved JSON result and exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["dry_run", "output", "no_save"])]
    report: Option<PathBuf>,

    /// Write the JSON result to this file instead of the results directory
    #[arg(long, value_name = "FILE", conflicts_with = "no_save")]
    output: Option<PathBuf>,

    /// Do not write the JSON result
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.report {
        return handle_report(path);
    }

    let config_path = cli
        .config
        .as_deref()
        .context("a configuration file is required")?;

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", config_path.display());
    let (config, config_hash) = load_config_with_hash(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_scrape(&config, cli.output, cli.no_save).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("khaki_scout=info,warn"),
            1 => EnvFilter::new("khaki_scout=debug,info"),
            2 => EnvFilter::new("khaki_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Khaki-Scout Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);
    println!("  Pacing delay: {}ms", config.scraper.pacing_delay_ms);
    println!("  Max detail fetches: {}", config.scraper.max_detail_fetches);
    match config.scraper.task_timeout_secs {
        Some(secs) => println!("  Task timeout: {}s", secs),
        None => println!("  Task timeout: none"),
    }

    println!("\nUser Agent:");
    println!("  Agent: {}", config.user_agent.agent);
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    let queries = config.source_queries()?;
    println!("\nSources ({}):", queries.len());
    for (retailer, query) in &queries {
        println!("  - {} ({}): {}", retailer.display_name(), query.kind(), query);
        if let Some(base_url) = config.source(*retailer).and_then(|s| s.base_url.as_deref()) {
            println!("    * base URL: {}", base_url);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start {} retailer tasks", queries.len());

    Ok(())
}

/// Handles the --report mode: prints a saved result
fn handle_report(path: &std::path::Path) -> anyhow::Result<()> {
    let result = load_results(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))?;

    print_report(&result);
    println!();
    print_statistics(&RunStatistics::from_result(&result));

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: &Config,
    output: Option<PathBuf>,
    no_save: bool,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config).context("Failed to build adapters")?;
    let queries = config.source_queries()?;

    tracing::info!("Scraping {} retailers", queries.len());
    let result = orchestrator.run(&queries).await;

    print_report(&result);

    let mut handlers: Vec<Box<dyn OutputHandler>> = Vec::new();
    if !no_save {
        handlers.push(Box::new(
            JsonOutput::new(&config.output.results_dir).with_file(output),
        ));
    }
    if let Some(summary_path) = &config.output.summary_path {
        handlers.push(Box::new(MarkdownOutput::new(summary_path)));
    }

    for handler in &handlers {
        let path = handler
            .write(&result)
            .with_context(|| format!("Failed to write {} output", handler.name()))?;
        println!("✓ Results written to: {}", path.display());
    }

    Ok(())
}
