//! Configuration module for Handset-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file read by the command-line driver. The library core does not
//! read configuration on its own; the jitter setting is passed explicitly to the
//! pagination-driving calls.
//!
//! # Example
//!
//! ```no_run
//! use handset_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Jitter ceiling: {}ms", config.crawler.jitter_max_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, OutputFormat, CATALOG_INDEX_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, validate_jitter};
