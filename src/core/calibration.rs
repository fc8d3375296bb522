//! Kalibrierungsdaten: Fahrzeug, Munitions-Marker und Referenzbilder.

use glam::IVec2;
use image::DynamicImage;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fahrzeug, für das kalibriert wurde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Interner Fahrzeugname (wird im XML als Tag-Name verwendet)
    pub name: String,
    /// Sichtfeld ohne Zoom
    pub fov_out: f64,
    /// Sichtfeld mit Zoom
    pub fov_in: f64,
}

impl Vehicle {
    /// Erstellt ein neues Fahrzeug
    pub fn new(name: impl Into<String>, fov_out: f64, fov_in: f64) -> Self {
        Self {
            name: name.into(),
            fov_out,
            fov_in,
        }
    }
}

/// Munitionstyp eines Fahrzeugs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ammo {
    /// Interner Name (z.B. `75mm_kwk40_apcbc`)
    pub name: String,
    /// Geschosstyp (z.B. `apcbc_tank`)
    pub ammo_type: String,
    /// Mündungsgeschwindigkeit in m/s
    pub speed: f64,
}

/// Gemessene Marker-Positionen für eine Munition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoCalibration {
    /// Name der Munition (wird im XML als Tag-Name verwendet)
    pub ammo_name: String,
    /// Kalibrierung im gezoomten Zustand
    pub zoomed_in: bool,
    /// Schlüssel des Referenzbilds in [`CalibrationModel::images`]
    pub image_name: String,
    /// Pixelposition des Visier-Zentrums
    pub marker_center: IVec2,
    /// Pixelpositionen der Entfernungsmarker (Reihenfolge ist signifikant)
    #[serde(default)]
    pub marker_ranges: Vec<IVec2>,
}

/// Vollständige Kalibrierung eines Fahrzeugs.
///
/// Jedes `image_name` einer [`AmmoCalibration`] sollte einen Eintrag in
/// `images` haben; fehlende Einträge erscheinen schlicht nicht im Export.
#[derive(Debug, Clone)]
pub struct CalibrationModel {
    pub vehicle: Vehicle,
    pub ammo: Vec<AmmoCalibration>,
    /// Referenzbilder nach Name, in Einfügereihenfolge
    pub images: IndexMap<String, DynamicImage>,
}

impl CalibrationModel {
    /// Erstellt eine leere Kalibrierung für ein Fahrzeug
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            ammo: Vec::new(),
            images: IndexMap::new(),
        }
    }

    /// Bildnamen, die von einer Munition referenziert werden, aber fehlen.
    pub fn missing_images(&self) -> Vec<&str> {
        self.ammo
            .iter()
            .map(|a| a.image_name.as_str())
            .filter(|name| !self.images.contains_key(*name))
            .collect()
    }
}
