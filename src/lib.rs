//! Handset-Harvest: a phone catalog extractor
//!
//! This crate walks the paginated listing pages of a public phone-specification
//! catalog, extracts brands, device summaries and per-device specification
//! sheets, and hands them out as flat records ready for CSV or JSON output.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod document;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Handset-Harvest operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamHttp { url: String, status: u16 },

    #[error("Unexpected page layout at {url}: {what}")]
    MarkupShape { url: String, what: String },

    #[error("Page layout changed at {url}: {what}")]
    PageLayout { url: String, what: String },

    #[error("Required field '{field}' missing at {url}")]
    MissingRequiredField { url: String, field: &'static str },

    #[error("Invalid link '{href}': {source}")]
    InvalidLink {
        href: String,
        source: ::url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns true for failures to reach the catalog at all (connect errors, timeouts)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Returns true when the page was fetched but did not have the expected structure
    pub fn is_markup(&self) -> bool {
        self.is_entry_level() || matches!(self, Self::PageLayout { .. })
    }

    /// Returns true when only one record is affected
    ///
    /// A listing keeps going past such an error. `PageLayout` is not entry
    /// level: the page as a whole no longer has the expected structure.
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            Self::MarkupShape { .. } | Self::MissingRequiredField { .. } | Self::InvalidLink { .. }
        )
    }

    pub(crate) fn markup(url: impl Into<String>, what: impl Into<String>) -> Self {
        Self::MarkupShape {
            url: url.into(),
            what: what.into(),
        }
    }

    pub(crate) fn page_layout(url: impl Into<String>, what: impl Into<String>) -> Self {
        Self::PageLayout {
            url: url.into(),
            what: what.into(),
        }
    }
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

/// Result type alias for Handset-Harvest operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{
    extract_full_specs, extract_header, fetch_device_header, fetch_device_specs, list_brands,
    list_brands_at, list_devices, Brand, DeviceFullSpecs, DeviceHeader, DeviceSummary,
    FieldValue, Record,
};
pub use config::Config;
pub use crawler::{Fetch, HttpFetcher, MemoryFetcher, Paginator};
pub use document::{Element, Locator, Node, Page};
