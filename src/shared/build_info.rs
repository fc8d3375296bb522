//! Build-Kennung für den Kopfkommentar exportierter Dateien.

use super::options::EncoderOptions;

/// Werkzeugname und Build-Kennung, explizit an den Writer übergeben.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub tool_name: String,
    pub build: String,
}

impl BuildInfo {
    pub fn new(tool_name: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            build: build.into(),
        }
    }

    /// Werkzeugname aus den Optionen, Build-Kennung aus der Paketversion.
    pub fn from_options(options: &EncoderOptions) -> Self {
        Self::new(options.tool_name.clone(), env!("CARGO_PKG_VERSION"))
    }

    /// `"{tool_name} {build}"`
    pub fn label(&self) -> String {
        format!("{} {}", self.tool_name, self.build)
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::from_options(&EncoderOptions::default())
    }
}
