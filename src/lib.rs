//! WT Sight Editor Library.
//! Export von Kalibrierungen (XML) und Visieren (Block-Textformat) für War Thunder.

pub mod app;
pub mod blk;
pub mod core;
pub mod error;
pub mod shared;
pub mod xml;

pub use app::{
    load_calibration_file, load_project, CalibrationXmlEncoder, Project, SightTextEncoder,
};
pub use blk::{sight_config_lines, write_sight_config};
pub use core::{
    Ammo, AmmoCalibration, CalibrationModel, Element, ElementType, GeneralSettings, SightModel,
    SightModelError, Vehicle,
};
pub use error::EncodeError;
pub use shared::{BuildInfo, EncoderOptions};
pub use xml::{parse_calibration_xml, write_calibration_xml};
