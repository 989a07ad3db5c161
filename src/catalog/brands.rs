//! Brand index listing

use crate::catalog::models::Brand;
use crate::config::CATALOG_INDEX_URL;
use crate::crawler::{Fetch, Paginator, BRAND_INDEX};
use crate::document::{Element, Locator, Node};
use crate::url::{brand_id_from_link, resolve_link};
use crate::CatalogError;
use url::Url;

/// Lists every brand of the catalog index
///
/// The index is a single page; it is fetched when the first brand is
/// requested. See [`list_brands_at`] for the item semantics.
pub fn list_brands<'f, F>(fetcher: &'f F) -> impl Iterator<Item = Result<Brand, CatalogError>> + 'f
where
    F: Fetch + ?Sized,
{
    list_brands_at(fetcher, CATALOG_INDEX_URL)
}

/// Lists every brand of the index page at `index_url`
///
/// A failed fetch yields a single `Err`, and so does a page without the index
/// table (`PageLayout`). A cell that does not look like a brand entry yields a
/// `MarkupShape` error in its position; the other cells are still listed.
pub fn list_brands_at<'f, F>(
    fetcher: &'f F,
    index_url: &str,
) -> impl Iterator<Item = Result<Brand, CatalogError>> + 'f
where
    F: Fetch + ?Sized,
{
    Paginator::new(fetcher, index_url, BRAND_INDEX, brand_from_cell)
}

/// Builds a [`Brand`] from one index cell:
/// `<td><a href="acer-phones-59.php">Acer<br><span>100 devices</span></a></td>`
fn brand_from_cell(cell: &Element<'_>, page: &Url) -> Result<Brand, CatalogError> {
    let anchor = cell
        .find(&Locator::tag("a"))
        .ok_or_else(|| CatalogError::markup(page.as_str(), "brand cell without link"))?;
    let href = anchor
        .attr("href")
        .ok_or_else(|| CatalogError::markup(page.as_str(), "brand link without href"))?;

    let name = anchor
        .stripped_strings()
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("brand {} has no name", href)))?;

    let label = cell
        .find(&Locator::tag("span"))
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("brand {} has no device count", name)))?
        .text();
    let device_count = parse_device_count(&label).ok_or_else(|| {
        CatalogError::markup(
            page.as_str(),
            format!("brand {}: unreadable device count '{}'", name, label),
        )
    })?;

    let id = brand_id_from_link(href)
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("brand {}: bad link '{}'", name, href)))?;

    Ok(Brand {
        id,
        name,
        catalog_link: resolve_link(page, href)?,
        device_count,
    })
}

/// `"256 devices"` → `256`
fn parse_device_count(label: &str) -> Option<u32> {
    label.split_whitespace().next()?.parse().ok()
}
