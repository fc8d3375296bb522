//! Projektdatei (JSON): Kalibrierung und Visier für den Export.
//!
//! Bildpfade sind relativ zum Verzeichnis der Projektdatei.

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{
    AmmoCalibration, CalibrationModel, Element, GeneralSettings, SightModel, Vehicle,
};

/// Kalibrierungsteil der Projektdatei.
#[derive(Debug, Deserialize)]
struct CalibrationSection {
    vehicle: Vehicle,
    #[serde(default)]
    ammo: Vec<AmmoCalibration>,
    /// Bildname → Pfad der Bilddatei
    #[serde(default)]
    images: IndexMap<String, PathBuf>,
}

/// Visierteil der Projektdatei.
#[derive(Debug, Deserialize)]
struct SightSection {
    #[serde(default)]
    general: GeneralSettings,
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    calibration: Option<CalibrationSection>,
    #[serde(default)]
    sight: Option<SightSection>,
}

/// Geladenes Projekt. Beide Teile sind optional.
#[derive(Debug, Clone)]
pub struct Project {
    pub calibration: Option<CalibrationModel>,
    pub sight: Option<SightModel>,
}

/// Lädt eine Projektdatei und alle referenzierten Bilder.
pub fn load_project(path: &Path) -> anyhow::Result<Project> {
    log::info!("Lade Projekt: {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Projektdatei nicht lesbar: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_project(&content, base_dir)
        .with_context(|| format!("Projektdatei ungueltig: {}", path.display()))
}

/// Parst den Inhalt einer Projektdatei; Bildpfade relativ zu `base_dir`.
pub fn parse_project(content: &str, base_dir: &Path) -> anyhow::Result<Project> {
    let file: ProjectFile = serde_json::from_str(content).context("JSON-Struktur fehlerhaft")?;

    let calibration = file
        .calibration
        .map(|section| load_calibration(section, base_dir))
        .transpose()?;

    let sight = match file.sight {
        Some(section) => Some(
            SightModel::from_elements(section.general, section.elements)
                .context("Visier-Elemente unvollstaendig")?,
        ),
        None => None,
    };

    log::info!(
        "Projekt geladen: Kalibrierung {}, Visier {}",
        if calibration.is_some() { "ja" } else { "nein" },
        sight
            .as_ref()
            .map_or("nein".to_string(), |s| format!("{} Elemente", s.element_count()))
    );

    Ok(Project { calibration, sight })
}

fn load_calibration(
    section: CalibrationSection,
    base_dir: &Path,
) -> anyhow::Result<CalibrationModel> {
    let mut model = CalibrationModel::new(section.vehicle);
    model.ammo = section.ammo;

    for (name, relative) in section.images {
        let image_path = base_dir.join(&relative);
        let image = image::open(&image_path)
            .with_context(|| format!("Bild '{}' nicht ladbar: {}", name, image_path.display()))?;
        log::debug!(
            "Bild '{}' geladen: {}x{}",
            name,
            image.width(),
            image.height()
        );
        model.images.insert(name, image);
    }

    Ok(model)
}
