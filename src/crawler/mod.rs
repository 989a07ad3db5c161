//! Crawler module: page fetching and listing pagination
//!
//! This module contains:
//! - The [`Fetch`] seam with HTTP and in-memory implementations
//! - The [`Paginator`], a lazy single-pass walk over listing pages
//! - The [`CrawlObserver`] progress hook

mod fetcher;
mod observer;
mod paginator;

pub use fetcher::{build_http_client, Fetch, HttpFetcher, MemoryFetcher};
pub use observer::{CrawlObserver, SilentObserver, TracingObserver};
pub use paginator::{jitter_delay, ListingLayout, Paginator, BRAND_INDEX, DEVICE_LISTING};
