//! Parsed-document capability layer
//!
//! Extraction code never talks to the HTML parser directly. It works against
//! the [`Node`] trait (find by tag and attributes, find all, next sibling, text)
//! and the [`Locator`] descriptions of where a field lives. [`Page`] and
//! [`Element`] implement that interface on top of the `scraper` crate, where
//! each locator is compiled into a CSS [`scraper::Selector`].

mod locator;
mod page;

pub use locator::Locator;
pub use page::{Element, Page};

/// Navigation and text access over one element of a parsed document
///
/// Lookups by [`Locator`] search the element's descendants only, never the
/// element itself.
pub trait Node: Sized {
    /// Lowercase tag name
    fn tag(&self) -> &str;

    /// Value of an attribute, if present
    fn attr(&self, name: &str) -> Option<&str>;

    /// First descendant matching `locator`, in document order
    fn find(&self, locator: &Locator) -> Option<Self>;

    /// Every descendant matching `locator`, in document order
    fn find_all(&self, locator: &Locator) -> Vec<Self>;

    /// Sibling elements that follow this one, nearest first
    fn following_siblings(&self) -> Box<dyn Iterator<Item = Self> + '_>;

    /// All text below this element, concatenated without separators
    fn text(&self) -> String;

    /// Text fragments below this element, trimmed, with blank fragments dropped
    fn stripped_strings(&self) -> Vec<String>;

    /// First descendant matching `locator` that also satisfies `accept`
    fn find_where(&self, locator: &Locator, accept: impl Fn(&Self) -> bool) -> Option<Self> {
        self.find_all(locator).into_iter().find(|node| accept(node))
    }

    /// Walks a chain of locators, each searched below the previous match
    fn find_path(&self, path: &[Locator]) -> Option<Self>
    where
        Self: Clone,
    {
        let mut current = self.clone();
        for locator in path {
            current = current.find(locator)?;
        }
        Some(current)
    }

    /// Nearest following sibling with the given tag
    fn find_next_sibling(&self, tag: &str) -> Option<Self> {
        self.following_siblings().find(|node| node.tag() == tag)
    }
}
