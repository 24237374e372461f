use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionConfig>,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Delay between two ad fetches (milliseconds)
    #[serde(rename = "ad-delay-ms")]
    pub ad_delay_ms: u64,

    /// Delay between two listing-page fetches (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Safety ceiling on listing pages per section
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Progress report interval, counted in visited ads
    #[serde(rename = "progress-every")]
    pub progress_every: u64,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a failed fetch
    pub retries: u32,

    /// Fixed delay between attempts (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file receiving the records
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

/// One crawl start point: a paginated listing-page URL
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    /// Short name used in progress logs
    pub name: String,

    /// Start listing-page URL
    pub url: String,
}
