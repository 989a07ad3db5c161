//! Record types produced by the catalog extractors
//!
//! Records are flat and built once from a single page. Optional fields are
//! either the raw extracted text or absent.

use crate::catalog::fields::Field;
use crate::catalog::header::HEADER_FIELDS;
use crate::catalog::specs::SPEC_FIELDS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One value of a record, as seen by serializers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(u64),
    Absent,
}

impl<'a> FieldValue<'a> {
    pub fn from_option(value: Option<&'a str>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Absent => Ok(()),
        }
    }
}

/// Uniform field-name → value view over a record
///
/// `fields()` returns the values in `columns()` order, so tabular writers can
/// emit a header row once and one row per record.
pub trait Record {
    /// Column names in output order
    fn columns() -> Vec<&'static str>;

    /// `(column, value)` pairs in `columns()` order
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)>;

    /// Looks up a single value by column name
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.fields()
            .into_iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }
}

/// A phone maker listed on the catalog index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Derived from the link: last path segment before its first `.`
    pub id: String,
    pub name: String,
    #[serde(rename = "gsmarena_link")]
    pub catalog_link: String,
    #[serde(rename = "number_of_devices")]
    pub device_count: u32,
}

impl Record for Brand {
    fn columns() -> Vec<&'static str> {
        vec!["id", "name", "number_of_devices", "gsmarena_link"]
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::Text(&self.id)),
            ("name", FieldValue::Text(&self.name)),
            (
                "number_of_devices",
                FieldValue::Integer(u64::from(self.device_count)),
            ),
            ("gsmarena_link", FieldValue::Text(&self.catalog_link)),
        ]
    }
}

/// One entry of a brand's device listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub title: String,
    pub extended_title: String,
    #[serde(rename = "img_link")]
    pub image_link: String,
    #[serde(rename = "gsmarena_link")]
    pub detail_link: String,
}

impl Record for DeviceSummary {
    fn columns() -> Vec<&'static str> {
        vec!["title", "extended_title", "img_link", "gsmarena_link"]
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("title", FieldValue::Text(&self.title)),
            ("extended_title", FieldValue::Text(&self.extended_title)),
            ("img_link", FieldValue::Text(&self.image_link)),
            ("gsmarena_link", FieldValue::Text(&self.detail_link)),
        ]
    }
}

/// The "at a glance" header block of a device page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceHeader {
    pub model_name: String,
    #[serde(rename = "img_link")]
    pub image_link: Option<String>,
    pub released: String,
    pub body: Option<String>,
    pub os: Option<String>,
    pub storage: Option<String>,
    pub display_size: Option<String>,
    pub display_res: Option<String>,
    pub camera_pixels: Option<String>,
    pub camera_pixel_unit: Option<String>,
    pub video_pixels: Option<String>,
    pub video_pixel_unit: Option<String>,
    pub ram_size: Option<String>,
    pub ram_size_unit: Option<String>,
    pub chipset: Option<String>,
    pub battery_size: Option<String>,
    pub battery_size_unit: Option<String>,
    pub battery_type: Option<String>,
}

impl Record for DeviceHeader {
    fn columns() -> Vec<&'static str> {
        let mut columns = vec!["model_name", "img_link", "released"];
        columns.extend(HEADER_FIELDS.iter().map(|field| field.name));
        columns
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let mut fields = vec![
            ("model_name", FieldValue::Text(&self.model_name)),
            (
                "img_link",
                FieldValue::from_option(self.image_link.as_deref()),
            ),
            ("released", FieldValue::Text(&self.released)),
        ];
        fields.extend(table_values(self, HEADER_FIELDS));
        fields
    }
}

/// The full specification table of a device page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFullSpecs {
    pub model_name: String,
    #[serde(rename = "img_link")]
    pub image_link: Option<String>,
    pub comment: Option<String>,
    pub network_technology: Option<String>,
    pub network_speed: Option<String>,
    pub launch_announced: Option<String>,
    pub launch_status: Option<String>,
    pub body_dimensions: Option<String>,
    pub body_weight: Option<String>,
    pub body_build: Option<String>,
    pub body_sim: Option<String>,
    pub body_other: Option<String>,
    pub display_type: Option<String>,
    pub display_size: Option<String>,
    pub display_resolution: Option<String>,
    pub display_protection: Option<String>,
    pub display_other: Option<String>,
    pub platform_os: Option<String>,
    pub platform_chipset: Option<String>,
    pub platform_cpu: Option<String>,
    pub platform_gpu: Option<String>,
    pub memory_card_slot: Option<String>,
    pub memory_internal: Option<String>,
    pub memory_other: Option<String>,
    pub main_camera_type: Option<String>,
    pub main_camera_specs: Option<String>,
    pub main_camera_features: Option<String>,
    pub main_camera_video: Option<String>,
    pub selfie_camera_type: Option<String>,
    pub selfie_camera_specs: Option<String>,
    pub selfie_camera_features: Option<String>,
    pub selfie_camera_video: Option<String>,
    pub comms_wlan: Option<String>,
    pub comms_bluetooth: Option<String>,
    pub comms_gps: Option<String>,
    pub comms_nfc: Option<String>,
    pub comms_radio: Option<String>,
    pub comms_usb: Option<String>,
    pub features_sensors: Option<String>,
    pub features_other: Option<String>,
    pub battery_type: Option<String>,
    pub misc_colors: Option<String>,
    pub misc_models: Option<String>,
    pub misc_price: Option<String>,
}

impl Record for DeviceFullSpecs {
    fn columns() -> Vec<&'static str> {
        let mut columns = vec!["model_name", "img_link"];
        columns.extend(SPEC_FIELDS.iter().map(|field| field.name));
        columns
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let mut fields = vec![
            ("model_name", FieldValue::Text(&self.model_name)),
            (
                "img_link",
                FieldValue::from_option(self.image_link.as_deref()),
            ),
        ];
        fields.extend(table_values(self, SPEC_FIELDS));
        fields
    }
}

/// Reads every table-driven field of `record` back out, in table order
fn table_values<'r, R>(
    record: &'r R,
    table: &'static [Field<R>],
) -> impl Iterator<Item = (&'static str, FieldValue<'r>)> + 'r {
    table
        .iter()
        .map(move |field| (field.name, FieldValue::from_option((field.get)(record).as_deref())))
}
