//! Document fetcher implementations
//!
//! This module turns URLs into parsed [`Page`]s:
//! - [`HttpFetcher`] issues blocking GET requests with the catalog's browser
//!   User-Agent and a fixed timeout
//! - [`MemoryFetcher`] serves pre-captured HTML bodies, for fixtures and replays
//!
//! Neither retries. Failures are classified and propagated to the caller.

use crate::config::FetcherConfig;
use crate::document::Page;
use crate::CatalogError;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Anything that can turn a URL into a parsed page
pub trait Fetch {
    /// Fetches `url` and parses the response body
    fn fetch(&self, url: &str) -> Result<Page, CatalogError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<Page, CatalogError> {
        (**self).fetch(url)
    }
}

/// Builds a blocking HTTP client with the configured identity and timeout
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use handset_harvest::config::FetcherConfig;
/// use handset_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches catalog pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the fetcher configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Timeout | `Timeout` |
    /// | Connection refused, DNS, TLS, body read | `Network` |
    /// | Non-2xx status | `UpstreamHttp` |
    fn fetch(&self, url: &str) -> Result<Page, CatalogError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamHttp {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().map_err(|e| classify_error(url, e))?;

        tracing::trace!("Fetched {} ({} bytes)", final_url, body.len());
        Ok(Page::new(final_url, &body))
    }
}

/// Maps a transport failure onto the crate's error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Timeout {
            url: url.to_string(),
        }
    } else {
        CatalogError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Serves HTML bodies from memory, keyed by absolute URL
///
/// Unknown URLs behave like an upstream 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` as the content of `url`
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }

    /// Builder-style [`MemoryFetcher::insert`]
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Page, CatalogError> {
        let body = self
            .pages
            .get(url)
            .ok_or_else(|| CatalogError::UpstreamHttp {
                url: url.to_string(),
                status: 404,
            })?;

        let parsed = Url::parse(url).map_err(|source| CatalogError::InvalidLink {
            href: url.to_string(),
            source,
        })?;

        Ok(Page::new(parsed, body))
    }
}
