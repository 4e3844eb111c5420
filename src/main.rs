//! Grantscout main entry point
//!
//! Command-line interface for the Grantscout corpus crawler: maintains the
//! seed link list, crawls each seed into a flat text corpus, and hands each
//! completed corpus to the extraction step.

use anyhow::Context;
use clap::Parser;
use grantscout::config::{load_config_with_hash, Config};
use grantscout::crawler::{CancelToken, CrawlOutcome, Engine};
use grantscout::extract::GrantExtractor;
use grantscout::links::LinkStore;
use grantscout::output::FileCorpusSink;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Grantscout: a bounded same-domain corpus crawler
///
/// Grantscout walks each seed site breadth-first, collects the visible text
/// of up to a fixed number of pages per site, and extracts structured grant
/// records from the accumulated text.
#[derive(Parser, Debug)]
#[command(name = "grantscout")]
#[command(version = "1.0.0")]
#[command(about = "A bounded same-domain corpus crawler", long_about = None)]
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

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["add", "remove"])]
    dry_run: bool,

    /// Append a seed URL to the link list and exit
    #[arg(long, value_name = "URL", conflicts_with = "remove")]
    add: Option<String>,

    /// Remove a seed URL from the link list and exit
    #[arg(long, value_name = "URL")]
    remove: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if let Some(link) = cli.add.as_deref() {
        handle_add(&config, link)?;
    } else if let Some(link) = cli.remove.as_deref() {
        handle_remove(&config, link)?;
    } else if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_run(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("grantscout=info,warn"),
            1 => EnvFilter::new("grantscout=debug,info"),
            2 => EnvFilter::new("grantscout=trace,debug"),
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

/// Handles --add: appends a seed URL to the link list
fn handle_add(config: &Config, link: &str) -> anyhow::Result<()> {
    let store = LinkStore::new(Path::new(&config.links.file_path));
    let outcome = store.append(link)?;
    println!("{}", outcome);
    Ok(())
}

/// Handles --remove: removes a seed URL from the link list
fn handle_remove(config: &Config, link: &str) -> anyhow::Result<()> {
    let store = LinkStore::new(Path::new(&config.links.file_path));
    let outcome = store.remove(link)?;
    println!("{}", outcome);
    Ok(())
}

/// Handles --dry-run: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Grantscout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Page budget: {}", config.crawler.max_pages);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!("  Corpus: {}", config.output.corpus_path);
    println!("  Records: {}", config.output.records_dir);

    println!("\nExtractor:");
    println!("  Model: {}", config.extractor.model);
    println!("  API base: {}", config.extractor.api_base);
    println!("  API key from: ${}", config.extractor.api_key_env);

    let store = LinkStore::new(Path::new(&config.links.file_path));
    let seeds = store.load()?;

    println!("\nSeed URLs ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} seed URLs", seeds.len());

    Ok(())
}

/// Handles the main batch run: crawl every seed, extract records from each
/// completed corpus
async fn handle_run(config: Config) -> anyhow::Result<()> {
    let store = LinkStore::new(Path::new(&config.links.file_path));
    let seeds = store.load()?;

    if seeds.is_empty() {
        tracing::warn!(
            "No seeds found in {}; nothing to do",
            config.links.file_path
        );
        return Ok(());
    }

    // Fail before any crawling if the extraction step cannot run
    let extractor = GrantExtractor::from_config(&config.extractor)?;
    let engine = Engine::new(config.crawler.clone())?;

    fs::create_dir_all(&config.output.records_dir).with_context(|| {
        format!("Failed to create records dir {}", config.output.records_dir)
    })?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, finishing current page");
                cancel.cancel();
            }
        });
    }

    let total = seeds.len();
    for (index, seed) in seeds.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!("Batch stopped before seed {}/{}", index + 1, total);
            break;
        }

        tracing::info!("[{}/{}] Processing: {}", index + 1, total, seed);

        // One seed failing must not stop the rest of the batch
        if let Err(e) = process_seed(&config, &engine, &extractor, seed, index + 1, &cancel).await
        {
            tracing::error!("Seed {} failed: {:#}", seed, e);
        }
    }

    Ok(())
}

/// Crawls one seed and extracts records from its corpus
async fn process_seed(
    config: &Config,
    engine: &Engine,
    extractor: &GrantExtractor,
    seed: &Url,
    index: usize,
    cancel: &CancelToken,
) -> anyhow::Result<()> {
    let corpus_path = Path::new(&config.output.corpus_path);

    let mut sink = FileCorpusSink::create(corpus_path)
        .with_context(|| format!("Failed to create corpus at {}", corpus_path.display()))?;

    let report = engine.crawl(seed, &mut sink, cancel).await?;
    tracing::info!(
        "Crawl finished: {} pages accepted, {} URLs visited",
        report.pages_accepted,
        report.urls_visited
    );

    if report.outcome == CrawlOutcome::Cancelled {
        tracing::info!("Run cancelled; partial corpus left at {}", corpus_path.display());
        return Ok(());
    }

    if report.pages_accepted == 0 {
        tracing::info!("No pages captured, skipping extraction");
        let _ = fs::remove_file(corpus_path);
        return Ok(());
    }

    let corpus = fs::read_to_string(corpus_path)?;
    let records = extractor.extract(&corpus).await?;

    let records_path =
        Path::new(&config.output.records_dir).join(format!("grants-{}.json", index));
    fs::write(&records_path, records)
        .with_context(|| format!("Failed to write {}", records_path.display()))?;
    tracing::info!("Saved records to {}", records_path.display());

    if let Err(e) = fs::remove_file(corpus_path) {
        tracing::warn!("Could not delete corpus file: {}", e);
    }

    Ok(())
}
