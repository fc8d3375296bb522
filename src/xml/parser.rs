//! Parser für Kalibrierungsdaten im XML-Format.
//!
//! Gegenstück zu [`super::writer::write_calibration_xml`]: liest Fahrzeug,
//! Munitions-Marker und eingebettete Referenzbilder zurück.

mod markers;
#[cfg(test)]
mod tests;

use crate::core::{AmmoCalibration, CalibrationModel, Vehicle};
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use super::image_codec::decode_image_base64;
use super::{AMMO_TAG, IMAGES_TAG, MARKER_RANGES_TAG, ROOT_TAG};
use markers::{parse_marker_ranges, parse_point};

/// Abschnitt unterhalb des Fahrzeug-Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Ammo,
    Images,
    Unknown,
}

/// Parsed eine Kalibrierung aus einem XML-String
pub fn parse_calibration_xml(xml_content: &str) -> Result<CalibrationModel> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut state = ParseState::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                state.element(e, depth)?;
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => state.element(e, depth)?,
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth == 2 {
                    state.section = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let vehicle = state.vehicle.context("Kein Fahrzeug-Element gefunden")?;
    log::info!(
        "Kalibrierung gelesen: {} ({} Munitionen, {} Bilder)",
        vehicle.name,
        state.ammo.len(),
        state.images.len()
    );

    Ok(CalibrationModel {
        vehicle,
        ammo: state.ammo,
        images: state.images,
    })
}

#[derive(Default)]
struct ParseState {
    vehicle: Option<Vehicle>,
    section: Option<Section>,
    ammo: Vec<AmmoCalibration>,
    images: IndexMap<String, image::DynamicImage>,
}

impl ParseState {
    /// Verarbeitet ein öffnendes oder leeres Element auf Tiefe `depth`.
    fn element(&mut self, e: &BytesStart<'_>, depth: usize) -> Result<()> {
        let tag = std::str::from_utf8(e.name().as_ref())
            .context("Tag-Name ist kein UTF-8")?
            .to_string();
        let attrs = attributes(e)?;

        match depth {
            0 => {
                if tag != ROOT_TAG {
                    bail!("Unerwartetes Wurzelelement '{}'", tag);
                }
            }
            1 => {
                self.vehicle = Some(Vehicle {
                    fov_out: parse_real(&attrs, "fovOut", &tag)?,
                    fov_in: parse_real(&attrs, "fovIn", &tag)?,
                    name: tag,
                });
            }
            2 => {
                self.section = Some(match tag.as_str() {
                    AMMO_TAG => Section::Ammo,
                    IMAGES_TAG => Section::Images,
                    _ => {
                        log::warn!("Unbekannter Abschnitt <{}> wird ignoriert", tag);
                        Section::Unknown
                    }
                });
            }
            3 => match self.section {
                Some(Section::Ammo) => self.ammo.push(parse_ammo(tag, &attrs)?),
                Some(Section::Images) => {
                    let data = required(&attrs, "encodedData", &tag)?;
                    let image = decode_image_base64(data)
                        .with_context(|| format!("Bild '{}' nicht lesbar", tag))?;
                    self.images.insert(tag, image);
                }
                _ => {}
            },
            4 if tag == MARKER_RANGES_TAG && self.section == Some(Section::Ammo) => {
                if let Some(ammo) = self.ammo.last_mut() {
                    ammo.marker_ranges = parse_marker_ranges(&attrs)
                        .with_context(|| format!("Marker von '{}' ungueltig", ammo.ammo_name))?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_ammo(tag: String, attrs: &HashMap<String, String>) -> Result<AmmoCalibration> {
    let zoomed_in = match required(attrs, "zoomedIn", &tag)? {
        "true" => true,
        "false" => false,
        other => bail!("zoomedIn von '{}' ist kein Wahrheitswert: '{}'", tag, other),
    };
    let image_name = required(attrs, "imageName", &tag)?.to_string();
    let marker_center = parse_point(required(attrs, "markerCenter", &tag)?)
        .with_context(|| format!("markerCenter von '{}' ungueltig", tag))?;

    Ok(AmmoCalibration {
        ammo_name: tag,
        zoomed_in,
        image_name,
        marker_center,
        marker_ranges: Vec::new(),
    })
}

fn attributes(e: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .context("Attributname ist kein UTF-8")?
            .to_string();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn required<'a>(attrs: &'a HashMap<String, String>, key: &str, tag: &str) -> Result<&'a str> {
    attrs
        .get(key)
        .map(String::as_str)
        .with_context(|| format!("Attribut '{}' fehlt an <{}>", key, tag))
}

fn parse_real(attrs: &HashMap<String, String>, key: &str, tag: &str) -> Result<f64> {
    let raw = required(attrs, key, tag)?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("'{}' an <{}> ist keine Zahl: '{}'", key, tag, raw))
}
