//! Full specification table extraction for device detail pages

use crate::catalog::fields::{apply, field, Field, Source};
use crate::catalog::header::{image_link, required_text};
use crate::catalog::models::DeviceFullSpecs;
use crate::document::{Locator, Node, Page};
use crate::CatalogError;

/// Container of the specification tables
pub const SPECS_CONTAINER: Locator = Locator::tag("div").id("specs-list");

const MODEL_NAME: Locator = Locator::marked("h1", "modelname");

/// Glossary entry the main camera row links to
pub const MAIN_CAMERA_GLOSSARY: &str = "glossary.php3?term=camera";

/// Glossary entry the selfie camera row links to
pub const SELFIE_CAMERA_GLOSSARY: &str = "glossary.php3?term=secondary-camera";

/// Optional specification fields, in column order
///
/// Cells holding several lines (`<br>` separated, e.g. SIM or camera modules)
/// are kept as their raw joined text.
pub static SPEC_FIELDS: &[Field<DeviceFullSpecs>] = &[
    field!(comment, Source::marked("p", "comment")),
    // Network
    field!(network_technology, Source::marked("a", "nettech")),
    field!(network_speed, Source::marked("td", "speed")),
    // Launch
    field!(launch_announced, Source::marked("td", "year")),
    field!(launch_status, Source::marked("td", "status")),
    // Body
    field!(body_dimensions, Source::marked("td", "dimensions")),
    field!(body_weight, Source::marked("td", "weight")),
    field!(body_build, Source::marked("td", "build")),
    field!(body_sim, Source::marked("td", "sim")),
    field!(body_other, Source::marked("td", "bodyother")),
    // Display
    field!(display_type, Source::marked("td", "displaytype")),
    field!(display_size, Source::marked("td", "displaysize")),
    field!(display_resolution, Source::marked("td", "displayresolution")),
    field!(display_protection, Source::marked("td", "displayprotection")),
    field!(display_other, Source::marked("td", "displayother")),
    // Platform
    field!(platform_os, Source::marked("td", "os")),
    field!(platform_chipset, Source::marked("td", "chipset")),
    field!(platform_cpu, Source::marked("td", "cpu")),
    field!(platform_gpu, Source::marked("td", "gpu")),
    // Memory
    field!(memory_card_slot, Source::marked("td", "memoryslot")),
    field!(memory_internal, Source::marked("td", "internalmemory")),
    field!(memory_other, Source::marked("td", "memoryother")),
    // Main camera
    field!(main_camera_type, Source::camera_layout(MAIN_CAMERA_GLOSSARY)),
    field!(main_camera_specs, Source::marked("td", "cam1modules")),
    field!(main_camera_features, Source::marked("td", "cam1features")),
    field!(main_camera_video, Source::marked("td", "cam1video")),
    // Selfie camera
    field!(selfie_camera_type, Source::camera_layout(SELFIE_CAMERA_GLOSSARY)),
    field!(selfie_camera_specs, Source::marked("td", "cam2modules")),
    field!(selfie_camera_features, Source::marked("td", "cam2features")),
    field!(selfie_camera_video, Source::marked("td", "cam2video")),
    // Comms
    field!(comms_wlan, Source::marked("td", "wlan")),
    field!(comms_bluetooth, Source::marked("td", "bluetooth")),
    field!(comms_gps, Source::marked("td", "gps")),
    field!(comms_nfc, Source::marked("td", "nfc")),
    field!(comms_radio, Source::marked("td", "radio")),
    field!(comms_usb, Source::marked("td", "usb")),
    // Features
    field!(features_sensors, Source::marked("td", "sensors")),
    field!(features_other, Source::marked("td", "featuresother")),
    // Battery
    field!(battery_type, Source::marked("td", "batdescription1")),
    // Misc
    field!(misc_colors, Source::marked("td", "colors")),
    field!(misc_models, Source::marked("td", "models")),
    field!(misc_price, Source::marked("td", "price")),
];

/// Extracts the full specification table of a device page
///
/// The model name and photo sit above the table on catalog pages, so they are
/// looked up across the whole document; every other field is looked up inside
/// the [`SPECS_CONTAINER`].
///
/// # Errors
///
/// * `PageLayout` - the specification container is missing
/// * `MissingRequiredField` - the model name is missing
pub fn extract_full_specs(page: &Page) -> Result<DeviceFullSpecs, CatalogError> {
    let url = page.url().as_str();
    let root = page.root();
    let table = root
        .find(&SPECS_CONTAINER)
        .ok_or_else(|| CatalogError::page_layout(url, "specification container not found"))?;

    let mut specs = DeviceFullSpecs {
        model_name: required_text(&root, &MODEL_NAME, url, "model_name")?,
        image_link: image_link(&root, page)?,
        ..Default::default()
    };

    let found = apply(&mut specs, &table, SPEC_FIELDS);
    tracing::debug!(
        "Specs of '{}': {}/{} fields present",
        specs.model_name,
        found,
        SPEC_FIELDS.len()
    );

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/device_page.html");
    const URL: &str = "https://www.gsmarena.com/samsung_galaxy_s24_ultra-12771.php";

    fn extract(html: &str) -> Result<DeviceFullSpecs, CatalogError> {
        extract_full_specs(&Page::from_html(URL, html).unwrap())
    }

    /// Text that identifies a field's marker in the fixture
    fn needle(field: &Field<DeviceFullSpecs>) -> String {
        let locator = field.source.locator();
        match locator.attr_value("data-spec") {
            Some(marker) => format!("data-spec=\"{}\"", marker),
            None => format!("href=\"{}\"", locator.attr_value("href").unwrap()),
        }
    }

    #[test]
    fn test_every_field_present_in_fixture() {
        let specs = extract(FIXTURE).unwrap();
        for field in SPEC_FIELDS {
            assert!((field.get)(&specs).is_some(), "{} missing", field.name);
        }
        assert_eq!(specs.model_name, "Samsung Galaxy S24 Ultra");
        assert!(specs.image_link.is_some());
    }

    #[test]
    fn test_selected_values() {
        let specs = extract(FIXTURE).unwrap();
        assert_eq!(specs.network_technology.as_deref(), Some("GSM / CDMA / HSPA / EVDO / LTE / 5G"));
        assert_eq!(specs.launch_announced.as_deref(), Some("2024, January 17"));
        assert_eq!(specs.platform_os.as_deref(), Some("Android 14, One UI 6.1"));
        assert_eq!(specs.battery_type.as_deref(), Some("Li-Ion 5000 mAh, non-removable"));
        assert_eq!(specs.misc_price.as_deref(), Some("$ 1,079.99"));
        assert_eq!(specs.comment.as_deref(), Some("Versions: SM-S928B (International)"));
    }

    #[test]
    fn test_multiline_cells_kept_raw() {
        let specs = extract(FIXTURE).unwrap();
        assert_eq!(
            specs.body_sim.as_deref(),
            Some("Nano-SIM and eSIMNano-SIM and eSIM (2 eSIMs)")
        );
        assert_eq!(specs.display_size.as_deref(), Some("6.8 inches, 113.5 cm2 (~88.5% screen-to-body ratio)"));
    }

    #[test]
    fn test_camera_types_follow_glossary_target() {
        let specs = extract(FIXTURE).unwrap();
        assert_eq!(specs.main_camera_type.as_deref(), Some("Quad"));
        assert_eq!(specs.selfie_camera_type.as_deref(), Some("Single"));
    }

    #[test]
    fn test_camera_types_both_triple() {
        let html = FIXTURE
            .replace(">Quad</a>", ">Triple</a>")
            .replace(">Single</a>", ">Triple</a>");
        let specs = extract(&html).unwrap();
        assert_eq!(specs.main_camera_type.as_deref(), Some("Triple"));
        assert_eq!(specs.selfie_camera_type.as_deref(), Some("Triple"));

        let without_selfie = html.replace(
            &format!("href=\"{}\"", SELFIE_CAMERA_GLOSSARY),
            "href=\"glossary.php3?term=other\"",
        );
        let specs = extract(&without_selfie).unwrap();
        assert_eq!(specs.main_camera_type.as_deref(), Some("Triple"));
        assert_eq!(specs.selfie_camera_type, None);
    }

    #[test]
    fn test_every_field_is_independent() {
        let baseline = extract(FIXTURE).unwrap();

        for field in SPEC_FIELDS {
            let needle = needle(field);
            assert_eq!(
                FIXTURE.matches(&needle).count(),
                1,
                "marker {} must appear exactly once",
                needle
            );

            let stripped = extract(&FIXTURE.replace(&needle, "data-removed=\"1\"")).unwrap();

            assert_eq!(stripped.model_name, baseline.model_name);
            assert_eq!(stripped.image_link, baseline.image_link);
            for other in SPEC_FIELDS {
                if other.name == field.name {
                    assert_eq!((other.get)(&stripped), &None, "{} should be absent", other.name);
                } else {
                    assert_eq!(
                        (other.get)(&stripped),
                        (other.get)(&baseline),
                        "{} changed when {} was removed",
                        other.name,
                        field.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_fields_outside_table_are_ignored() {
        let html = r#"<html><body>
            <h1 data-spec="modelname">Nokia 3310</h1>
            <table><tr><td data-spec="year">2000</td></tr></table>
            <div id="specs-list"><table><tr><td data-spec="status">Discontinued</td></tr></table></div>
            </body></html>"#;
        let specs = extract(html).unwrap();
        assert_eq!(specs.model_name, "Nokia 3310");
        assert_eq!(specs.launch_announced, None);
        assert_eq!(specs.launch_status.as_deref(), Some("Discontinued"));
        assert_eq!(specs.image_link, None);
    }

    #[test]
    fn test_missing_model_name_is_an_error() {
        let html = FIXTURE.replace("data-spec=\"modelname\"", "data-spec=\"gone\"");
        assert!(matches!(
            extract(&html),
            Err(CatalogError::MissingRequiredField { field: "model_name", .. })
        ));
    }

    #[test]
    fn test_missing_container_is_page_level_error() {
        let html = FIXTURE.replace("id=\"specs-list\"", "id=\"renamed\"");
        assert!(matches!(extract(&html), Err(CatalogError::PageLayout { .. })));
    }
}
