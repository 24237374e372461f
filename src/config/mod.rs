//! Configuration module
//!
//! Loads, parses and validates the TOML configuration file.
//!
//! # Example
//!
//! ```no_run
//! use immoglean::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Output CSV: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, OutputConfig, SectionConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
