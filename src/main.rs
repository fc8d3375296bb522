//! WT Sight Editor (Kommandozeile).
//!
//! Exportiert Kalibrierungen und Visiere aus einer JSON-Projektdatei.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wt_sight_editor::{
    load_calibration_file, load_project, BuildInfo, CalibrationXmlEncoder, EncoderOptions,
    SightTextEncoder,
};

#[derive(Parser)]
#[command(name = "WT-Sight-Editor")]
#[command(about = "Export War Thunder sight files and calibration data")]
#[command(version)]
struct Cli {
    /// Optionen-Datei (Standard: wt_sight_editor.toml neben der Binary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Kalibrierung eines Projekts als XML exportieren.
    Calibration {
        /// Projektdatei (JSON)
        #[arg(long)]
        project: PathBuf,
        /// Ziel-XML-Datei
        #[arg(long)]
        out: PathBuf,
    },
    /// Visier eines Projekts als Block-Textdatei exportieren.
    Sight {
        /// Projektdatei (JSON)
        #[arg(long)]
        project: PathBuf,
        /// Ziel-Visierdatei
        #[arg(long)]
        out: PathBuf,
    },
    /// Exportierte Kalibrierungsdatei einlesen und zusammenfassen.
    Inspect {
        #[arg(long)]
        calibration: PathBuf,
    },
    /// Optionen ändern und in die Optionen-Datei schreiben.
    Config {
        /// JPEG-Qualität der Referenzbilder (1-100)
        #[arg(long)]
        jpeg_quality: Option<u8>,
        /// Bilder im XML nach Namen sortieren
        #[arg(long)]
        sort_images: Option<bool>,
        /// Werkzeugname im Kopfkommentar
        #[arg(long)]
        tool_name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("WT Sight Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(EncoderOptions::config_path);
    let mut options = EncoderOptions::load_from_file(&config_path);

    match cli.command {
        Commands::Calibration { project, out } => export_calibration(&project, &out, options),
        Commands::Sight { project, out } => export_sight(&project, &out, &options),
        Commands::Inspect { calibration } => inspect_calibration(&calibration),
        Commands::Config {
            jpeg_quality,
            sort_images,
            tool_name,
        } => {
            options.apply_overrides(jpeg_quality, sort_images, tool_name);
            options.save_to_file(&config_path)
        }
    }
}

fn export_calibration(project: &Path, out: &Path, options: EncoderOptions) -> anyhow::Result<()> {
    let project = load_project(project)?;
    if project.calibration.is_none() {
        log::warn!("Projekt enthaelt keine Kalibrierung");
    }
    CalibrationXmlEncoder::new(options)
        .encode(project.calibration.as_ref(), Some(out))
        .context("Export der Kalibrierung fehlgeschlagen")
}

fn export_sight(project: &Path, out: &Path, options: &EncoderOptions) -> anyhow::Result<()> {
    let project = load_project(project)?;
    if project.sight.is_none() {
        log::warn!("Projekt enthaelt kein Visier");
    }
    SightTextEncoder::new(BuildInfo::from_options(options))
        .encode(
            project.sight.as_ref(),
            project.calibration.as_ref(),
            Some(out),
        )
        .context("Export des Visiers fehlgeschlagen")
}

fn inspect_calibration(path: &Path) -> anyhow::Result<()> {
    let model = load_calibration_file(path)?;
    log::info!(
        "Fahrzeug '{}': fovOut {}, fovIn {}",
        model.vehicle.name,
        model.vehicle.fov_out,
        model.vehicle.fov_in
    );
    for ammo in &model.ammo {
        log::info!(
            "  {} (Bild '{}', Zoom {}): Zentrum {},{} / {} Marker",
            ammo.ammo_name,
            ammo.image_name,
            ammo.zoomed_in,
            ammo.marker_center.x,
            ammo.marker_center.y,
            ammo.marker_ranges.len()
        );
    }
    for (name, image) in &model.images {
        log::info!("  Bild '{}': {}x{}", name, image.width(), image.height());
    }
    Ok(())
}
