//! Word-Ripple main entry point
//!
//! This is the command-line interface for the Word-Ripple word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_ripple::config::{load_config_with_hash, Config};
use word_ripple::crawler::run_crawl;
use word_ripple::output::CrawlResultWriter;
use word_ripple::{Clock, Profiler, SystemClock};

/// Word-Ripple: a bounded, parallel word-frequency crawler
///
/// Word-Ripple crawls outward from the configured start pages up to a maximum
/// link depth and a time limit, counts the words on every page it visits, and
/// reports the most popular ones together with a timing profile.
#[derive(Parser, Debug)]
#[command(name = "word-ripple")]
#[command(version)]
#[command(about = "A bounded, parallel word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_ripple=info,warn"),
            1 => EnvFilter::new("word_ripple=debug,info"),
            2 => EnvFilter::new("word_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the result and the profile
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn print_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Word-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Implementation: {:?}", crawler.implementation());
    println!("  Parallelism: {}", crawler.parallelism());
    println!("  Max depth: {}", crawler.max_depth);
    println!("  Timeout: {}s", crawler.timeout_seconds);
    println!("  Popular word count: {}", crawler.popular_word_count);

    println!("\nStart Pages ({}):", crawler.start_pages.len());
    for page in &crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL patterns ({}):", crawler.ignored_urls.len());
    for pattern in &crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", crawler.ignored_words.len());
    for pattern in &crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        config.output.profile_output_path().unwrap_or("<stdout>")
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Profiler::new(Arc::clone(&clock));

    tracing::info!(
        "Starting crawl from {} start pages",
        config.crawler.start_pages.len()
    );
    let result = run_crawl(config, &profiler, clock).context("Crawl failed")?;
    tracing::info!(
        "Crawl completed: {} URLs visited, {} popular words",
        result.urls_visited(),
        result.word_counts().len()
    );

    let writer = CrawlResultWriter::new(&result);
    match config.output.result_path() {
        Some(path) => writer
            .write_to_path(Path::new(path))
            .with_context(|| format!("Failed to write crawl result to {}", path))?,
        None => {
            let mut stdout = io::stdout().lock();
            writer.write(&mut stdout)?;
            writeln!(stdout)?;
        }
    }

    match config.output.profile_output_path() {
        Some(path) => profiler
            .write_data_to_path(Path::new(path))
            .with_context(|| format!("Failed to write profile to {}", path))?,
        None => {
            let mut stdout = io::stdout().lock();
            profiler.write_data(&mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
