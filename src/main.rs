//! Prospector main entry point
//!
//! This is the command-line interface for the Prospector account discovery
//! crawler.

use clap::Parser;
use prospector::checkpoint::{CheckpointStore, JsonCheckpointStore};
use prospector::config::load_config_with_hash;
use prospector::crawler::crawl;
use prospector::output::{print_checkpoint_status, print_summary, summarize_results};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Prospector: a layered account discovery crawler
///
/// Prospector walks a social graph outward from seed accounts, keeps the
/// ones matching the relevance rules, and records its progress after every
/// account so an interrupted run picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "prospector")]
#[command(version)]
#[command(about = "A layered account discovery crawler", long_about = None)]
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

    /// Resume an interrupted crawl (default behavior)
    #[arg(long, conflicts_with = "fresh")]
    resume: bool,

    /// Start a fresh crawl, discarding any previous checkpoint
    #[arg(long, conflicts_with = "resume")]
    fresh: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "status")]
    dry_run: bool,

    /// Show the progress stored in the checkpoint and exit
    #[arg(long, conflicts_with = "dry_run")]
    status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.status {
        handle_status(&config)?;
    } else {
        handle_crawl(config, config_hash, cli.fresh).await?;
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
            0 => EnvFilter::new("prospector=info,warn"),
            1 => EnvFilter::new("prospector=debug,info"),
            2 => EnvFilter::new("prospector=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &prospector::config::Config) {
    println!("=== Prospector Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Max depth: {}", config.crawl.max_depth);
    println!(
        "  Per-identifier delay: {}s",
        config.crawl.per_identifier_delay_secs
    );
    println!(
        "  Expansion skip threshold: {} outbound follows",
        config.crawl.expansion_skip_threshold
    );
    println!(
        "  Max outbound fetch: {}",
        config.crawl.max_outbound_fetch
    );

    println!("\nClassifier:");
    println!("  Minimum followers: {}", config.classifier.min_followers);
    println!(
        "  Minimum keyword matches: {}",
        config.classifier.min_keyword_matches
    );
    println!(
        "  Mode: {}",
        if config.classifier.strict {
            "strict (weighted scoring)"
        } else {
            "keyword"
        }
    );
    if !config.classifier.extra_keywords.is_empty() {
        println!("  Extra keywords ({}):", config.classifier.extra_keywords.len());
        for keyword in &config.classifier.extra_keywords {
            println!("    - {}", keyword);
        }
    }
    if !config.classifier.known_relevant_handles.is_empty() {
        println!(
            "  Known relevant handles: {}",
            config.classifier.known_relevant_handles.len()
        );
    }

    println!("\nSource:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Auth token env: {}", config.source.auth_token_env);
    println!("  Page size: {}", config.source.page_size);

    println!("\nRate Limit:");
    println!("  Reset buffer: {}s", config.rate_limit.buffer_secs);
    println!("  Wait floor: {}s", config.rate_limit.floor_secs);
    println!("  Default wait: {}s", config.rate_limit.default_wait_secs);
    match config.rate_limit.max_quota_waits {
        Some(budget) => println!("  Max quota waits: {}", budget),
        None => println!("  Max quota waits: unlimited"),
    }

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);
    println!("  Checkpoint: {}", config.output.checkpoint_path);

    println!("\nSeed Accounts ({}):", config.crawl.seeds.len());
    for seed in &config.crawl.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed account(s)",
        config.crawl.seeds.len()
    );
}

/// Handles the --status mode: displays checkpointed progress
fn handle_status(config: &prospector::config::Config) -> anyhow::Result<()> {
    let store = JsonCheckpointStore::new(&config.output.checkpoint_path);

    match store.load()? {
        Some(checkpoint) => print_checkpoint_status(&checkpoint),
        None => println!(
            "No checkpoint found at {} (nothing in progress)",
            config.output.checkpoint_path
        ),
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: prospector::config::Config,
    config_hash: String,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring any previous checkpoint)");
    } else {
        tracing::info!("Starting crawl (will resume if a checkpoint exists)");
    }

    tracing::info!(
        "Seeds: {}, max depth: {}",
        config.crawl.seeds.len(),
        config.crawl.max_depth
    );

    let results_path = config.output.results_path.clone();

    // Run the crawler
    match crawl(config, config_hash, fresh).await {
        Ok(results) => {
            print_summary(&summarize_results(&results));
            println!("✓ Results written to: {}", results_path);
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
