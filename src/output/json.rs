//! Structured (JSON) output

use crate::catalog::DeviceSummary;
use crate::CatalogError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty-printed JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), CatalogError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes `value` as pretty JSON to `path`, creating parent directories
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_json(BufWriter::new(File::create(path)?), value)
}

/// Devices grouped by brand name, brands in alphabetical order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DevicesByBrand {
    brands: BTreeMap<String, Vec<DeviceSummary>>,
}

impl DevicesByBrand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device to `brand`, keeping listing order within the brand
    pub fn push(&mut self, brand: &str, device: DeviceSummary) {
        self.brands.entry(brand.to_string()).or_default().push(device);
    }

    /// Records `brand` even if it ends up with no devices
    pub fn ensure_brand(&mut self, brand: &str) {
        self.brands.entry(brand.to_string()).or_default();
    }

    pub fn devices(&self, brand: &str) -> &[DeviceSummary] {
        self.brands.get(brand).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    pub fn device_count(&self) -> usize {
        self.brands.values().map(Vec::len).sum()
    }
}
