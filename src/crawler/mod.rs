//! Crawler module: fetching, link discovery and crawl orchestration
//!
//! This module contains:
//! - HTTP fetching with bounded retry and fixed backoff
//! - Ad-link and next-page discovery on listing pages
//! - The crawl controller driving pagination, deduplication and the
//!   per-ad extraction pipeline

mod controller;
mod discover;
mod fetcher;

pub use controller::{CrawlCounters, CrawlRun};
pub use discover::{discover_ad_links, discover_next_page};
pub use fetcher::{build_http_client, fetch_document};

use crate::config::Config;
use crate::output::CsvSink;
use crate::{ImmoError, Result};

/// Runs a complete crawl operation.
///
/// Creates the CSV sink (header written up front), then drives every
/// configured section to completion, sharing one visited set and one sink
/// across the run.
pub async fn crawl(config: Config) -> Result<CrawlCounters> {
    let sink = CsvSink::create(&config.output.csv_path).map_err(ImmoError::Sink)?;
    let run = CrawlRun::new(config, sink)?;
    run.run().await
}
