//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.
//!
//! Beide Encoder sind einmalige, synchrone Aufrufe: Modell und Zielpfad
//! rein, Erfolg oder Fehler raus. Fehler werden geloggt und typisiert
//! zurückgegeben; eine teilweise geschriebene Datei gilt als ungültig.

use anyhow::Context;
use std::path::Path;

use crate::blk::write_sight_config;
use crate::core::{CalibrationModel, SightModel};
use crate::error::EncodeError;
use crate::shared::{BuildInfo, EncoderOptions};
use crate::xml::{parse_calibration_xml, write_calibration_xml};

/// Exportiert Kalibrierungsdaten als XML-Datei.
#[derive(Debug, Clone, Default)]
pub struct CalibrationXmlEncoder {
    options: EncoderOptions,
}

impl CalibrationXmlEncoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Schreibt `model` nach `destination` (vorhandene Datei wird überschrieben).
    pub fn encode(
        &self,
        model: Option<&CalibrationModel>,
        destination: Option<&Path>,
    ) -> Result<(), EncodeError> {
        let Some(model) = model else {
            log::warn!("Keine Kalibrierungsdaten zum Speichern vorhanden");
            return Err(EncodeError::InvalidInput);
        };
        let Some(destination) = destination else {
            log::warn!("Kein Zielpfad fuer die Kalibrierungsdatei angegeben");
            return Err(EncodeError::InvalidDestination);
        };

        log::info!("Schreibe Kalibrierungsdatei nach {}", destination.display());
        let missing = model.missing_images();
        if !missing.is_empty() {
            log::warn!("Referenzbilder fehlen und werden nicht exportiert: {:?}", missing);
        }

        let result = write_calibration_xml(model, &self.options)
            .and_then(|xml| write_file(destination, &xml));
        match &result {
            Ok(()) => log::info!("Kalibrierungsdatei gespeichert"),
            Err(e) => log::error!("Kalibrierungsdatei konnte nicht gespeichert werden: {}", e),
        }
        result
    }
}

/// Exportiert ein Visier als Textdatei im Block-Format.
#[derive(Debug, Clone, Default)]
pub struct SightTextEncoder {
    build: BuildInfo,
}

impl SightTextEncoder {
    pub fn new(build: BuildInfo) -> Self {
        Self { build }
    }

    /// Schreibt `model` nach `destination` (UTF-8, eine Anweisung pro Zeile).
    ///
    /// `calibration` liefert nur den Fahrzeugnamen für den Kopfkommentar.
    pub fn encode(
        &self,
        model: Option<&SightModel>,
        calibration: Option<&CalibrationModel>,
        destination: Option<&Path>,
    ) -> Result<(), EncodeError> {
        let Some(model) = model else {
            log::warn!("Keine Visier-Daten zum Speichern vorhanden");
            return Err(EncodeError::InvalidInput);
        };
        let Some(destination) = destination else {
            log::warn!("Kein Zielpfad fuer die Visier-Datei angegeben");
            return Err(EncodeError::InvalidDestination);
        };

        log::info!("Schreibe Visier-Datei nach {}", destination.display());
        let text = write_sight_config(model, calibration, &self.build);
        match write_file(destination, &text) {
            Ok(()) => {
                log::info!("Visier-Datei gespeichert: {}", destination.display());
                Ok(())
            }
            Err(e) => {
                log::error!("Fehler beim Speichern des Visiers: {}", e);
                Err(e)
            }
        }
    }
}

/// Lädt eine zuvor exportierte Kalibrierungsdatei.
pub fn load_calibration_file(path: &Path) -> anyhow::Result<CalibrationModel> {
    let xml_content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    parse_calibration_xml(&xml_content)
        .with_context(|| format!("Kalibrierungsdatei ungueltig: {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<(), EncodeError> {
    std::fs::write(path, content).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
