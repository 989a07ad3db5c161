//! Device listing of a brand

use crate::catalog::models::DeviceSummary;
use crate::crawler::{Fetch, Paginator, DEVICE_LISTING};
use crate::document::{Element, Locator, Node};
use crate::url::resolve_link;
use crate::CatalogError;
use url::Url;

/// Lists every device of the brand whose first listing page is `brand_link`
///
/// Devices come out in page order, following the "Next page" button until a
/// page has none. With `jitter_max_ms > 0` the walk sleeps a random
/// 1..=`jitter_max_ms` milliseconds before each page after the first.
///
/// A fetch failure or a page without the listing region (`PageLayout`) ends
/// the sequence with that error; a malformed device entry yields a
/// `MarkupShape` error in its position and the walk continues.
pub fn list_devices<'f, F>(
    fetcher: &'f F,
    brand_link: &str,
    jitter_max_ms: u64,
) -> impl Iterator<Item = Result<DeviceSummary, CatalogError>> + 'f
where
    F: Fetch + ?Sized,
{
    Paginator::new(fetcher, brand_link, DEVICE_LISTING, device_from_entry).with_jitter(jitter_max_ms)
}

fn device_from_entry(entry: &Element<'_>, page: &Url) -> Result<DeviceSummary, CatalogError> {
    let href = entry
        .attr("href")
        .ok_or_else(|| CatalogError::markup(page.as_str(), "device entry without href"))?;

    let title = entry
        .find(&Locator::tag("strong"))
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("device {} has no name", href)))?
        .text();

    let image = entry
        .find(&Locator::tag("img"))
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("device {} has no image", href)))?;
    let extended_title = image
        .attr("title")
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("device {} image has no title", href)))?
        .to_string();
    let src = image
        .attr("src")
        .ok_or_else(|| CatalogError::markup(page.as_str(), format!("device {} image has no src", href)))?;

    Ok(DeviceSummary {
        title,
        extended_title,
        image_link: resolve_link(page, src)?,
        detail_link: resolve_link(page, href)?,
    })
}
