//! `scraper`-backed implementation of the document capability layer

use crate::document::{Locator, Node};
use crate::url::resolve_link;
use crate::CatalogError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched page: its final URL plus the parsed HTML tree
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    /// Parses `body` as the document found at `url`
    pub fn new(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// Parses `body` as the document found at the string `url`
    ///
    /// # Example
    ///
    /// ```
    /// use handset_harvest::document::{Node, Page};
    ///
    /// let page = Page::from_html("https://example.com/", "<h1>Hello</h1>").unwrap();
    /// assert_eq!(page.root().text(), "Hello");
    /// ```
    pub fn from_html(url: &str, body: &str) -> Result<Self, CatalogError> {
        let url = Url::parse(url).map_err(|source| CatalogError::InvalidLink {
            href: url.to_string(),
            source,
        })?;
        Ok(Self::new(url, body))
    }

    /// URL the page was served from (after redirects)
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `<html>` element
    pub fn root(&self) -> Element<'_> {
        Element(self.html.root_element())
    }

    /// Resolves a link found on this page into absolute form
    pub fn resolve(&self, href: &str) -> Result<String, CatalogError> {
        resolve_link(&self.url, href)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("url", &self.url.as_str()).finish()
    }
}

/// One element of a [`Page`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

/// Compiles `locator` into a selector; an unparseable one matches nothing
fn compile(locator: &Locator) -> Option<Selector> {
    let css = locator.css();
    let compiled = match Selector::parse(&css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Ignoring unusable selector '{}': {}", css, e);
            None
        }
    };
    compiled
}

impl<'a> Node for Element<'a> {
    fn tag(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn find(&self, locator: &Locator) -> Option<Self> {
        let selector = compile(locator)?;
        let first = self.0.select(&selector).next().map(Element);
        first
    }

    fn find_all(&self, locator: &Locator) -> Vec<Self> {
        let Some(selector) = compile(locator) else {
            return Vec::new();
        };
        let all = self.0.select(&selector).map(Element).collect();
        all
    }

    fn following_siblings(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        Box::new(
            self.0
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .map(Element),
        )
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn stripped_strings(&self) -> Vec<String> {
        self.0
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
