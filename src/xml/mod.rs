//! XML Import/Export für Kalibrierungsdaten.
//!
//! Aufbau: `ballisticData` → Fahrzeug → `ammo` (Marker je Munition) und
//! `images` (Referenzbilder als Base64-JPEG in Attributen).

pub mod image_codec;
pub mod parser;
pub mod writer;

pub use image_codec::{decode_image_base64, encode_image_base64};
pub use parser::parse_calibration_xml;
pub use writer::write_calibration_xml;

/// Name des Wurzelelements
pub const ROOT_TAG: &str = "ballisticData";
/// Container der Munitions-Einträge
pub const AMMO_TAG: &str = "ammo";
/// Container der Referenzbilder
pub const IMAGES_TAG: &str = "images";
/// Element mit den Entfernungsmarkern einer Munition
pub const MARKER_RANGES_TAG: &str = "markerRanges";
