//! Lazy walker over paginated listing pages
//!
//! A [`Paginator`] fetches one listing page at a time, hands every entry in the
//! page's content region to a record builder, and follows the next-page link
//! until a page has none. Records are produced on demand: no page is fetched
//! before the consumer asks for an element that needs it, and dropping the
//! iterator stops the walk.

use crate::crawler::observer::{CrawlObserver, TracingObserver};
use crate::crawler::Fetch;
use crate::document::{Element, Locator, Node, Page};
use crate::CatalogError;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;
use url::Url;

/// Where records live on a listing page and how to reach the next one
#[derive(Debug, Clone, Copy)]
pub struct ListingLayout {
    /// Locator chain leading to the content region (searched from the document root)
    pub region: &'static [Locator],

    /// One match per entry, searched below the region
    pub entry: Locator,

    /// Anchor pointing at the following page, searched document-wide
    pub next_page: Option<Locator>,
}

/// Device listing pages of a brand: anchors inside the review body, paged
pub const DEVICE_LISTING: ListingLayout = ListingLayout {
    region: &[Locator::tag("div").class("section-body").id("review-body")],
    entry: Locator::tag("a"),
    next_page: Some(
        Locator::tag("a")
            .class("prevnextbutton")
            .attr("title", "Next page"),
    ),
};

/// The brand index: one table cell per brand, single page
pub const BRAND_INDEX: ListingLayout = ListingLayout {
    region: &[Locator::tag("div").class("st-text"), Locator::tag("table")],
    entry: Locator::tag("td"),
    next_page: None,
};

/// Position of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// The next page to fetch
    Pending(String),
    /// No more pages
    Exhausted,
}

/// Picks the politeness delay applied before a fetch
///
/// Returns `None` when jitter is disabled (`max_ms == 0`), otherwise a uniform
/// random duration between 1 and `max_ms` milliseconds inclusive.
pub fn jitter_delay(max_ms: u64) -> Option<Duration> {
    if max_ms == 0 {
        return None;
    }
    let millis = rand::rng().random_range(1..=max_ms);
    Some(Duration::from_millis(millis))
}

/// Single-pass iterator over the records of a paginated listing
///
/// Items are `Result`s:
/// - a fetch failure, a page without the content region or an unusable
///   next-page link yields one `Err` and ends the sequence; layout problems
///   of the page come out as [`CatalogError::PageLayout`]
/// - an entry the builder rejects yields an `Err` in its position; the
///   remaining entries and pages are still walked
///
/// Once exhausted the iterator keeps returning `None`; restarting means
/// building a new `Paginator` from the start URL.
pub struct Paginator<'f, F: ?Sized, T, B> {
    fetcher: &'f F,
    layout: ListingLayout,
    build: B,
    cursor: Cursor,
    buffer: VecDeque<Result<T, CatalogError>>,
    jitter_max_ms: u64,
    pages_fetched: usize,
    observer: &'f dyn CrawlObserver,
}

impl<'f, F, T, B> Paginator<'f, F, T, B>
where
    F: Fetch + ?Sized,
    B: FnMut(&Element<'_>, &Url) -> Result<T, CatalogError>,
{
    /// Creates a walker rooted at `start_url`
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of pages
    /// * `start_url` - First listing page
    /// * `layout` - Region, entry and next-page locators
    /// * `build` - Turns one entry (plus the URL of its page) into a record
    pub fn new(fetcher: &'f F, start_url: impl Into<String>, layout: ListingLayout, build: B) -> Self {
        Self {
            fetcher,
            layout,
            build,
            cursor: Cursor::Pending(start_url.into()),
            buffer: VecDeque::new(),
            jitter_max_ms: 0,
            pages_fetched: 0,
            observer: &TracingObserver,
        }
    }

    /// Sleeps a random 1..=`max_ms` milliseconds before every fetch after the first
    pub fn with_jitter(mut self, max_ms: u64) -> Self {
        self.jitter_max_ms = max_ms;
        self
    }

    /// Replaces the default [`TracingObserver`]
    pub fn with_observer(mut self, observer: &'f dyn CrawlObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Number of listing pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches one page, buffers its records and returns the next cursor
    fn load_page(&mut self, url: &str) -> Result<Cursor, CatalogError> {
        if self.pages_fetched > 0 {
            if let Some(delay) = jitter_delay(self.jitter_max_ms) {
                tracing::trace!("Waiting {:?} before {}", delay, url);
                std::thread::sleep(delay);
            }
        }

        let page = self.fetcher.fetch(url)?;
        self.pages_fetched += 1;

        let entries = self.collect_entries(&page)?;
        self.observer
            .page_fetched(page.url().as_str(), self.pages_fetched, entries);

        next_page_link(&page, self.layout.next_page.as_ref())
    }

    fn collect_entries(&mut self, page: &Page) -> Result<usize, CatalogError> {
        let root = page.root();
        let region = root.find_path(self.layout.region).ok_or_else(|| {
            CatalogError::page_layout(page.url().as_str(), "listing content region not found")
        })?;

        let entries = region.find_all(&self.layout.entry);
        let count = entries.len();

        for entry in &entries {
            let record = (self.build)(entry, page.url());
            match &record {
                Ok(_) => self.observer.record_produced(page.url().as_str()),
                Err(e) => self.observer.record_failed(page.url().as_str(), e),
            }
            self.buffer.push_back(record);
        }

        Ok(count)
    }
}

/// Resolves the next-page anchor of `page`, if the layout has one and the page shows it
fn next_page_link(page: &Page, locator: Option<&Locator>) -> Result<Cursor, CatalogError> {
    let href = locator
        .and_then(|locator| page.root().find(locator))
        .and_then(|anchor| anchor.attr("href").map(str::to_string));

    match href {
        Some(href) => page.resolve(&href).map(Cursor::Pending).map_err(|e| {
            CatalogError::page_layout(page.url().as_str(), format!("unusable next-page link: {}", e))
        }),
        None => Ok(Cursor::Exhausted),
    }
}

impl<'f, F, T, B> Iterator for Paginator<'f, F, T, B>
where
    F: Fetch + ?Sized,
    B: FnMut(&Element<'_>, &Url) -> Result<T, CatalogError>,
{
    type Item = Result<T, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(record);
            }

            let url = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Pending(url) => url,
                Cursor::Exhausted => return None,
            };

            match self.load_page(&url) {
                Ok(Cursor::Exhausted) => self.observer.finished(self.pages_fetched),
                Ok(next) => self.cursor = next,
                Err(e) => {
                    // Entries buffered before the failure are still handed out first
                    self.buffer.push_back(Err(e));
                }
            }
        }
    }
}
