//! Fehlertypen der Export-Schnittstellen.

use std::path::PathBuf;
use thiserror::Error;

/// Fehler beim Schreiben einer Visier- oder Kalibrierungsdatei.
///
/// Nach einem Fehler gilt die Zieldatei als nicht zuverlässig geschrieben.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Kein Modell übergeben
    #[error("keine Daten zum Exportieren vorhanden")]
    InvalidInput,
    /// Kein Zielpfad übergeben
    #[error("kein Zielpfad angegeben")]
    InvalidDestination,
    /// Zieldatei konnte nicht erstellt oder geschrieben werden
    #[error("Schreiben nach '{}' fehlgeschlagen: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Bild- oder XML-Kodierung fehlgeschlagen
    #[error("Kodierung fehlgeschlagen: {0}")]
    Encoding(String),
}

impl EncodeError {
    pub(crate) fn encoding(context: &str, err: impl std::fmt::Display) -> Self {
        EncodeError::Encoding(format!("{}: {}", context, err))
    }
}
