//! Progress notifications for listing walks

/// Receives progress notifications from a [`Paginator`](crate::crawler::Paginator)
///
/// Every method has an empty default, so implementors only override what they
/// care about. Notifications never influence the walk.
pub trait CrawlObserver {
    /// A listing page was fetched and its entries were built
    fn page_fetched(&self, _url: &str, _page_number: usize, _entries: usize) {}

    /// An entry was turned into a record
    fn record_produced(&self, _url: &str) {}

    /// An entry could not be turned into a record
    fn record_failed(&self, _url: &str, _error: &crate::CatalogError) {}

    /// The walk reached a page without a next-page link
    fn finished(&self, _pages: usize) {}
}

/// Forwards notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn page_fetched(&self, url: &str, page_number: usize, entries: usize) {
        tracing::debug!("Page {} ({}) yielded {} entries", page_number, url, entries);
    }

    fn record_produced(&self, url: &str) {
        tracing::trace!("Record built from {}", url);
    }

    fn record_failed(&self, url: &str, error: &crate::CatalogError) {
        tracing::debug!("Entry on {} rejected: {}", url, error);
    }

    fn finished(&self, pages: usize) {
        tracing::debug!("Listing exhausted after {} page(s)", pages);
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl CrawlObserver for SilentObserver {}
