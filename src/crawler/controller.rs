//! Crawl controller
//!
//! Drives pagination across the configured sections, deduplicates ad URLs,
//! and applies the extraction pipeline to each ad with isolation: one ad's
//! failure never aborts the crawl. All run state (visited set, counters,
//! sink) lives on [`CrawlRun`] and is dropped with it.

use crate::config::{Config, SectionConfig};
use crate::crawler::discover::{discover_ad_links, discover_next_page};
use crate::crawler::fetcher::{build_http_client, fetch_document};
use crate::extract::{extract_record, ListingRecord};
use crate::output::RecordSink;
use crate::{ExtractError, FetchError, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Counters reported during and after a crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlCounters {
    /// Ads fetched (each URL at most once per run)
    pub total_ads: u64,

    /// Ads that produced a validated record
    pub valid_ads: u64,

    /// Ads skipped: extraction failure or transport fault, counted alike
    pub skipped_ads: u64,
}

/// Why one ad produced no record. Both cases are absorbed per ad.
enum AdSkip {
    NotListable(ExtractError),
    Transport(FetchError),
}

/// One crawl run: client, visited set, counters and sink.
pub struct CrawlRun<S: RecordSink> {
    config: Config,
    client: Client,
    sink: S,
    visited: HashSet<String>,
    counters: CrawlCounters,
}

impl<S: RecordSink> CrawlRun<S> {
    /// Creates a run over the given configuration and sink.
    ///
    /// The sink is expected to have written its header already; the run only
    /// appends rows and flushes.
    pub fn new(config: Config, sink: S) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        Ok(Self {
            config,
            client,
            sink,
            visited: HashSet::new(),
            counters: CrawlCounters::default(),
        })
    }

    /// Processes every section sequentially and returns the final counters.
    ///
    /// Sections share the visited set and the sink, so an ad linked from two
    /// sections is fetched once and written once.
    pub async fn run(mut self) -> Result<CrawlCounters> {
        let started = std::time::Instant::now();

        let sections = self.config.sections.clone();
        for section in &sections {
            tracing::info!("Section start: {} ({})", section.name, section.url);
            self.crawl_section(section).await?;
        }

        self.sink.flush()?;
        tracing::info!(
            "Crawl finished in {:.1?}: {} ads visited, {} valid, {} skipped",
            started.elapsed(),
            self.counters.total_ads,
            self.counters.valid_ads,
            self.counters.skipped_ads
        );

        Ok(self.counters)
    }

    /// Paginates one section until no next link, the page ceiling, or a
    /// listing-page fault.
    ///
    /// A listing-page transport fault stops this section only; per-ad faults
    /// are absorbed in [`CrawlRun::process_ad`]. Only sink errors propagate.
    async fn crawl_section(&mut self, section: &SectionConfig) -> Result<()> {
        let start = match Url::parse(&section.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Skipping section {}: bad start URL: {}", section.name, e);
                return Ok(());
            }
        };

        let mut cursor = Some(start);
        let mut pages_seen = 0u32;

        while let Some(page_url) = cursor {
            pages_seen += 1;
            if pages_seen > self.config.crawl.max_pages {
                tracing::warn!(
                    "Page ceiling ({}) reached, stopping section {}",
                    self.config.crawl.max_pages,
                    section.name
                );
                break;
            }

            tracing::info!("[{} page {}] {}", section.name, pages_seen, page_url);

            let page =
                match fetch_document(&self.client, &self.config.http, page_url.as_str()).await {
                    Ok(doc) => doc,
                    Err(e) => {
                        tracing::error!(
                            "Listing page fetch failed, stopping section {}: {}",
                            section.name,
                            e
                        );
                        break;
                    }
                };

            let ad_urls = discover_ad_links(&page, &page_url);
            let next = discover_next_page(&page, &page_url);
            tracing::info!(
                "[{} page {}] {} ad links",
                section.name,
                pages_seen,
                ad_urls.len()
            );
            drop(page);

            for ad_url in ad_urls {
                self.process_ad(&ad_url).await?;
            }

            cursor = next;
            tokio::time::sleep(Duration::from_millis(self.config.crawl.page_delay_ms)).await;
        }

        Ok(())
    }

    /// Fetches and extracts one ad, if it has not been visited yet.
    ///
    /// Extraction failures and transport faults are treated uniformly as
    /// "ad not usable": counted, logged at debug, never propagated.
    async fn process_ad(&mut self, ad_url: &str) -> Result<()> {
        if !self.visited.insert(ad_url.to_string()) {
            return Ok(());
        }
        self.counters.total_ads += 1;

        match self.harvest(ad_url).await {
            Ok(record) => {
                self.sink.append(&record)?;
                self.counters.valid_ads += 1;
                tracing::debug!("Valid: {} | {}", record.fields().join(","), ad_url);
            }
            Err(AdSkip::NotListable(e)) => {
                self.counters.skipped_ads += 1;
                tracing::debug!("Skipping {}: {}", ad_url, e);
            }
            Err(AdSkip::Transport(e)) => {
                self.counters.skipped_ads += 1;
                tracing::debug!("Skipping {} (fetch fault): {}", ad_url, e);
            }
        }

        if self.counters.total_ads % self.config.crawl.progress_every == 0 {
            tracing::info!(
                "Progress: {} ads visited, {} valid, {} skipped",
                self.counters.total_ads,
                self.counters.valid_ads,
                self.counters.skipped_ads
            );
            self.sink.flush()?;
        }

        tokio::time::sleep(Duration::from_millis(self.config.crawl.ad_delay_ms)).await;
        Ok(())
    }

    async fn harvest(&self, ad_url: &str) -> std::result::Result<ListingRecord, AdSkip> {
        let doc = fetch_document(&self.client, &self.config.http, ad_url)
            .await
            .map_err(AdSkip::Transport)?;
        extract_record(&doc).map_err(AdSkip::NotListable)
    }

    /// Counters accumulated so far.
    pub fn counters(&self) -> CrawlCounters {
        self.counters
    }
}
