//! Immoglean: a field-extraction crawler for real-estate classifieds
//!
//! This crate crawls paginated listing pages of a classifieds site, follows
//! every discovered ad link once, runs a heuristic extraction pipeline over
//! each ad document, and streams the validated records to a CSV file.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod extract;
pub mod output;
pub mod text;

use thiserror::Error;

/// Main error type for Immoglean operations
#[derive(Debug, Error)]
pub enum ImmoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport faults: the page could not be fetched at all.
///
/// Disjoint from [`ExtractError`]: a transport fault says nothing about the
/// document, while an extraction failure is a statement about a document
/// that was fetched and parsed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Empty or invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Invalid header value in HTTP config: {0}")]
    Header(String),

    #[error("Request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Extraction failures: the document does not yield a valid record.
///
/// Always recoverable at the per-ad level; the crawl controller counts and
/// skips, never aborts the run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No text matching label pattern {0:?}")]
    LabelNotFound(String),

    #[error("No value found for label {0:?}")]
    ValueNotFound(String),

    #[error("Price not found on the page")]
    PriceNotFound,

    #[error("Price unreadable: {0:?}")]
    PriceUnreadable(String),

    #[error("Price below floor: {0}")]
    PriceBelowFloor(String),

    #[error("Property type not allowed: {0:?}")]
    TypeNotAllowed(String),

    #[error("Locality string not found")]
    LocalityNotFound,

    #[error("Unexpected locality format: {0:?}")]
    LocalityFormat(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Sink-specific errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write output: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Immoglean operations
pub type Result<T> = std::result::Result<T, ImmoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::crawl;
pub use extract::{extract_record, ListingRecord};
