use crate::CatalogError;
use url::Url;

/// Root every catalog link is relative to
pub const CATALOG_ROOT: &str = "https://www.gsmarena.com/";

/// Resolves an `href` found on a page into an absolute link
///
/// # Resolution Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Absolute links (with scheme) are kept as they are
/// 3. `"/page.php3"` and `"page.php3"` are both joined onto the base's origin,
///    which for catalog pages is the site root
///
/// # Arguments
///
/// * `base` - URL of the page the link was found on
/// * `href` - The raw attribute value
///
/// # Returns
///
/// * `Ok(String)` - Absolute link
/// * `Err(CatalogError)` - Empty or unparseable link
///
/// # Examples
///
/// ```
/// use handset_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.gsmarena.com/makers.php3").unwrap();
/// let link = resolve_link(&base, "apple-phones-48.php").unwrap();
/// assert_eq!(link, "https://www.gsmarena.com/apple-phones-48.php");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Result<String, CatalogError> {
    let href = href.trim();

    if href.is_empty() {
        return Err(CatalogError::markup(base.as_str(), "empty link"));
    }

    base.join(href)
        .map(String::from)
        .map_err(|source| CatalogError::InvalidLink {
            href: href.to_string(),
            source,
        })
}

/// Resolves an `href` against the catalog root rather than a specific page
pub fn absolutize(href: &str) -> Result<String, CatalogError> {
    let root = Url::parse(CATALOG_ROOT).map_err(|source| CatalogError::InvalidLink {
        href: CATALOG_ROOT.to_string(),
        source,
    })?;
    resolve_link(&root, href)
}
