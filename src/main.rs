//! Immoglean main entry point
//!
//! Command-line interface for the listing crawler.

use clap::Parser;
use immoglean::config::load_config_with_hash;
use immoglean::crawler::{build_http_client, crawl, fetch_document};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Immoglean: a field-extraction crawler for real-estate classifieds
///
/// Immoglean paginates the configured listing sections, fetches every
/// discovered ad once, extracts the listing attributes and writes the
/// validated records to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "immoglean")]
#[command(version = "1.0.0")]
#[command(about = "Extracts listing records from a classifieds site into CSV", long_about = None)]
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

    /// Validate config and show what would be crawled without fetching
    #[arg(long, conflicts_with = "probe")]
    dry_run: bool,

    /// Fetch a single ad URL, print its extracted fields and exit
    #[arg(long, value_name = "URL")]
    probe: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
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
    } else if let Some(url) = cli.probe.as_deref() {
        handle_probe(&config, url).await?;
    } else {
        handle_crawl(config).await?;
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
            0 => EnvFilter::new("immoglean=info,warn"),
            1 => EnvFilter::new("immoglean=debug,info"),
            2 => EnvFilter::new("immoglean=trace,debug"),
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
fn handle_dry_run(config: &immoglean::Config) {
    println!("=== Immoglean Dry Run ===\n");

    println!("Crawl settings:");
    println!("  Ad delay: {}ms", config.crawl.ad_delay_ms);
    println!("  Page delay: {}ms", config.crawl.page_delay_ms);
    println!("  Page ceiling: {} pages/section", config.crawl.max_pages);
    println!("  Progress every: {} ads", config.crawl.progress_every);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!(
        "  Timeout: {}s, retries: {}, backoff: {}ms",
        config.http.timeout_secs, config.http.retries, config.http.retry_backoff_ms
    );

    println!("\nOutput CSV: {}", config.output.csv_path);

    println!("\nSections ({}):", config.sections.len());
    for section in &config.sections {
        println!("  - {}: {}", section.name, section.url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --probe mode: extracts one ad and prints each field
async fn handle_probe(config: &immoglean::Config, url: &str) -> anyhow::Result<()> {
    use immoglean::extract::{self, locate_characteristics_block};
    use scraper::Selector;

    let client = build_http_client(&config.http)?;
    let doc = fetch_document(&client, &config.http, url).await?;

    if let Ok(title_selector) = Selector::parse("title") {
        match doc.select(&title_selector).next() {
            Some(title) => println!(
                "Title: {}",
                immoglean::text::normalize(&title.text().collect::<String>())
            ),
            None => println!("Title: (none)"),
        }
    }

    let block = locate_characteristics_block(&doc);

    match extract::price(&doc) {
        Ok(v) => println!("Price (EUR): {}", v),
        Err(e) => println!("Price (EUR): {}", e),
    }
    match extract::city(&doc) {
        Ok(v) => println!("City: {}", v),
        Err(e) => println!("City: {}", e),
    }
    match extract::property_type(&doc, block) {
        Ok(v) => println!("Type: {}", v),
        Err(e) => println!("Type: {}", e),
    }
    println!("Surface: {}", extract::surface(&doc, block));
    println!("Rooms: {}", extract::rooms(&doc, block));
    println!("Bedrooms: {}", extract::bedrooms(&doc, block));
    println!("Bathrooms: {}", extract::bathrooms(&doc, block));
    println!("Energy: {}", extract::energy(&doc, block));

    match immoglean::extract_record(&doc) {
        Ok(record) => println!("Record: {}", record.fields().join(",")),
        Err(e) => println!("Not listable: {}", e),
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: immoglean::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} sections, output {}",
        config.sections.len(),
        config.output.csv_path
    );

    let csv_path = config.output.csv_path.clone();
    match crawl(config).await {
        Ok(counters) => {
            println!(
                "Visited={} | Valid={} | Skipped={} | CSV={}",
                counters.total_ads, counters.valid_ads, counters.skipped_ads, csv_path
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
