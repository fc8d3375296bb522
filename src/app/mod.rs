//! Application-Layer: Projekt laden und Dateien exportieren.

pub mod use_cases;

pub use use_cases::file_io::{load_calibration_file, CalibrationXmlEncoder, SightTextEncoder};
pub use use_cases::project::{load_project, parse_project, Project};
