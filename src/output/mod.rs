//! Output module for persisting catalog records
//!
//! This module handles:
//! - Streaming flat records into CSV files with a fixed column order
//! - Writing pretty JSON, including devices nested by brand
//! - The file layout of an output directory

mod csv_sink;
mod json;

pub use csv_sink::CsvSink;
pub use json::{write_json, write_json_file, DevicesByBrand};

use std::path::{Path, PathBuf};

/// File stem of the brand list
pub const BRANDS_FILE_STEM: &str = "phone_brands";

/// Sub-directory holding one device CSV per brand
pub const BRANDS_DIR: &str = "brands";

/// Nested-by-brand device file
pub const DEVICES_BY_BRAND_FILE: &str = "devices_by_brand.json";

/// `<dir>/phone_brands.csv`
pub fn brands_csv_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.csv", BRANDS_FILE_STEM))
}

/// `<dir>/phone_brands.json`
pub fn brands_json_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.json", BRANDS_FILE_STEM))
}

/// `<dir>/brands/<lowercase brand>_devices.csv`
pub fn brand_devices_csv_path(dir: &Path, brand_name: &str) -> PathBuf {
    dir.join(BRANDS_DIR)
        .join(format!("{}_devices.csv", file_safe(&brand_name.to_lowercase())))
}

/// `<dir>/devices_by_brand.json`
pub fn devices_by_brand_path(dir: &Path) -> PathBuf {
    dir.join(DEVICES_BY_BRAND_FILE)
}

/// Replaces path separators so a brand name stays a single file name
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
