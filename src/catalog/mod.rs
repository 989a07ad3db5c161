//! Catalog module: records and the extractors that produce them
//!
//! This module contains:
//! - Brand and device listers built on the crawler's [`Paginator`](crate::crawler::Paginator)
//! - Header and full-specification extractors for device detail pages
//! - The declarative field tables driving those extractors
//! - The record types and their uniform field view

mod brands;
mod devices;
pub mod fields;
mod header;
mod models;
mod specs;

pub use brands::{list_brands, list_brands_at};
pub use devices::list_devices;
pub use header::{extract_header, HEADER_CONTAINER, HEADER_FIELDS};
pub use models::{Brand, DeviceFullSpecs, DeviceHeader, DeviceSummary, FieldValue, Record};
pub use specs::{
    extract_full_specs, MAIN_CAMERA_GLOSSARY, SELFIE_CAMERA_GLOSSARY, SPECS_CONTAINER, SPEC_FIELDS,
};

use crate::crawler::Fetch;
use crate::CatalogError;

/// Fetches a device detail page and extracts its header block
pub fn fetch_device_header<F>(fetcher: &F, detail_link: &str) -> Result<DeviceHeader, CatalogError>
where
    F: Fetch + ?Sized,
{
    let page = fetcher.fetch(detail_link)?;
    extract_header(&page)
}

/// Fetches a device detail page and extracts its specification table
pub fn fetch_device_specs<F>(fetcher: &F, detail_link: &str) -> Result<DeviceFullSpecs, CatalogError>
where
    F: Fetch + ?Sized,
{
    let page = fetcher.fetch(detail_link)?;
    extract_full_specs(&page)
}
