//! Header ("at a glance") extraction for device detail pages

use crate::catalog::fields::{apply, field, Field, Source};
use crate::catalog::models::DeviceHeader;
use crate::document::{Locator, Node, Page};
use crate::CatalogError;

/// Container of the header block
pub const HEADER_CONTAINER: Locator = Locator::tag("div").class("article-info");

const MODEL_NAME: Locator = Locator::tag("h1")
    .class("specs-phone-name-title")
    .attr("data-spec", "modelname");
const RELEASED: Locator = Locator::marked("span", "released-hl");
const PHOTO: Locator = Locator::tag("div").class("specs-photo-main");

/// Optional header fields, in column order
pub static HEADER_FIELDS: &[Field<DeviceHeader>] = &[
    field!(body, Source::marked("span", "body-hl")),
    field!(os, Source::marked("span", "os-hl")),
    field!(storage, Source::marked("span", "storage-hl")),
    field!(display_size, Source::marked("span", "displaysize-hl")),
    field!(display_res, Source::marked("span", "displayres-hl")),
    field!(camera_pixels, Source::marked("span", "camerapixels-hl")),
    field!(camera_pixel_unit, Source::unit_of("camerapixels-hl")),
    field!(video_pixels, Source::marked("span", "videopixels-hl")),
    field!(video_pixel_unit, Source::unit_of("videopixels-hl")),
    field!(ram_size, Source::marked("span", "ramsize-hl")),
    field!(ram_size_unit, Source::unit_of("ramsize-hl")),
    field!(chipset, Source::marked("span", "chipset-hl")),
    field!(battery_size, Source::marked("span", "batsize-hl")),
    field!(battery_size_unit, Source::unit_of("batsize-hl")),
    field!(battery_type, Source::marked("span", "battype-hl")),
];

/// Extracts the header block of a device page
///
/// The model name and release line are required and fail the extraction with
/// `MissingRequiredField` when absent. The image link and every field of
/// [`HEADER_FIELDS`] are optional and independent of each other.
///
/// # Errors
///
/// * `PageLayout` - the header container is missing
/// * `MissingRequiredField` - model name or release line is missing
pub fn extract_header(page: &Page) -> Result<DeviceHeader, CatalogError> {
    let url = page.url().as_str();
    let container = page
        .root()
        .find(&HEADER_CONTAINER)
        .ok_or_else(|| CatalogError::page_layout(url, "device header container not found"))?;

    let mut header = DeviceHeader {
        model_name: required_text(&container, &MODEL_NAME, url, "model_name")?,
        image_link: image_link(&container, page)?,
        released: required_text(&container, &RELEASED, url, "released")?,
        ..Default::default()
    };

    let found = apply(&mut header, &container, HEADER_FIELDS);
    tracing::debug!(
        "Header of '{}': {}/{} optional fields present",
        header.model_name,
        found,
        HEADER_FIELDS.len()
    );

    Ok(header)
}

/// Text of an element that must exist
pub(crate) fn required_text<N: Node>(
    scope: &N,
    locator: &Locator,
    url: &str,
    field: &'static str,
) -> Result<String, CatalogError> {
    scope
        .find(locator)
        .map(|node| node.text())
        .ok_or_else(|| CatalogError::MissingRequiredField {
            url: url.to_string(),
            field,
        })
}

/// Absolute `src` of the main device photo, when shown
pub(crate) fn image_link<N: Node>(scope: &N, page: &Page) -> Result<Option<String>, CatalogError> {
    let src = scope
        .find(&PHOTO)
        .and_then(|photo| photo.find(&Locator::tag("img")))
        .and_then(|img| img.attr("src").map(str::to_string));

    src.map(|src| page.resolve(&src)).transpose()
}
