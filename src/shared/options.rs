//! Zentrale Konfiguration für den Export.
//!
//! `EncoderOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Standard-JPEG-Qualität der eingebetteten Referenzbilder.
pub const JPEG_QUALITY: u8 = 90;
/// Name des Werkzeugs im Kopfkommentar der Visier-Dateien.
pub const TOOL_NAME: &str = "WTSightEdit";
/// Dateiname der Optionen-Datei neben der Binary.
pub const OPTIONS_FILE_NAME: &str = "wt_sight_editor.toml";

/// Alle zur Laufzeit änderbaren Export-Optionen.
/// Wird als `wt_sight_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderOptions {
    /// JPEG-Qualität (1–100) für Bilder im Kalibrierungs-XML
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Bilder im XML nach Schlüssel sortieren statt in Einfügereihenfolge
    #[serde(default)]
    pub sort_images_by_key: bool,
    /// Werkzeugname im Kopfkommentar
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: JPEG_QUALITY,
            sort_images_by_key: false,
            tool_name: TOOL_NAME.to_string(),
        }
    }
}

/// Serde-Default für `jpeg_quality` (Abwärtskompatibilität).
fn default_jpeg_quality() -> u8 {
    JPEG_QUALITY
}

/// Serde-Default für `tool_name`.
fn default_tool_name() -> String {
    TOOL_NAME.to_string()
}

impl EncoderOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei, die JPEG-Qualität bereits begrenzt.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let stored = Self {
            jpeg_quality: self.effective_jpeg_quality(),
            ..self.clone()
        };
        let content =
            toml::to_string_pretty(&stored).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Übernimmt gesetzte Werte von der Kommandozeile.
    pub fn apply_overrides(
        &mut self,
        jpeg_quality: Option<u8>,
        sort_images_by_key: Option<bool>,
        tool_name: Option<String>,
    ) {
        if let Some(quality) = jpeg_quality {
            self.jpeg_quality = quality;
        }
        if let Some(sort) = sort_images_by_key {
            self.sort_images_by_key = sort;
        }
        if let Some(name) = tool_name {
            self.tool_name = name;
        }
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("wt_sight_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(OPTIONS_FILE_NAME)
    }

    /// JPEG-Qualität, begrenzt auf den gültigen Bereich 1–100.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
