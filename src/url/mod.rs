//! URL handling module for Handset-Harvest
//!
//! This module turns the relative links found in catalog markup into absolute
//! links and derives brand identifiers and names from catalog links.

mod normalize;

pub use normalize::{absolutize, resolve_link, CATALOG_ROOT};

/// Derives a brand identifier from its catalog link
///
/// The identifier is the last path segment up to its first `.`, so
/// `".../apple-phones-48.php"` yields `"apple-phones-48"`. Query strings and
/// fragments are ignored.
///
/// # Arguments
///
/// * `link` - Relative or absolute brand link
///
/// # Returns
///
/// * `Some(String)` - The derived identifier
/// * `None` - The link has no usable last segment
///
/// # Examples
///
/// ```
/// use handset_harvest::url::brand_id_from_link;
///
/// assert_eq!(
///     brand_id_from_link("https://www.gsmarena.com/apple-phones-58.php3").as_deref(),
///     Some("apple-phones-58")
/// );
/// ```
pub fn brand_id_from_link(link: &str) -> Option<String> {
    let without_suffix = link.split(['?', '#']).next()?;
    let segment = without_suffix.rsplit('/').next()?;
    let id = segment.split('.').next()?.trim();

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Derives a brand's display name from its catalog link
///
/// Brand links follow `<name>-phones-<number>.php`, with `_` standing for a
/// space in multi-word names. The name is what is left of the identifier
/// once that suffix is removed, so the link of "Sony Ericsson" gives
/// `"sony ericsson"`. Links of another shape fall back to the whole
/// identifier.
///
/// # Examples
///
/// ```
/// use handset_harvest::url::brand_name_from_link;
///
/// assert_eq!(
///     brand_name_from_link("https://www.gsmarena.com/samsung-phones-9.php").as_deref(),
///     Some("samsung")
/// );
/// ```
pub fn brand_name_from_link(link: &str) -> Option<String> {
    let id = brand_id_from_link(link)?;
    let name = match id.rsplit_once("-phones-") {
        Some((name, number))
            if !name.is_empty() && !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => id.as_str(),
    };
    Some(name.replace('_', " "))
}
