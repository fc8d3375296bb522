//! Core-Domänentypen: Kalibrierung, Visier-Elemente, Visier-Modell.

pub mod calibration;
pub mod elements;
pub mod sight;

pub use calibration::{Ammo, AmmoCalibration, CalibrationModel, Vehicle};
pub use elements::{
    BallisticRangeIndicators, CentralLine, CustomCircle, CustomLine, CustomQuad, CustomText,
    DistanceIndicator, DistanceScale, Element, ElementType, HorzIndicator, HorzRangeIndicators,
    Movement, RadialMovement, Rangefinder, Rgba, ScaleMode, ShellBlock, TextAlign,
};
pub use sight::{GeneralSettings, SightModel, SightModelError};
