//! Writer für Kalibrierungsdaten im XML-Format.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::image_codec::encode_image_base64;
use super::{AMMO_TAG, IMAGES_TAG, MARKER_RANGES_TAG, ROOT_TAG};
use crate::blk::format_real;
use crate::core::{AmmoCalibration, CalibrationModel};
use crate::error::EncodeError;
use crate::shared::EncoderOptions;

/// Schreibt eine Kalibrierung als XML-Dokument (2 Leerzeichen Einrückung).
///
/// # Parameter
/// - `model`: Die zu exportierende Kalibrierung
/// - `options`: JPEG-Qualität und Bild-Reihenfolge
pub fn write_calibration_xml(
    model: &CalibrationModel,
    options: &EncoderOptions,
) -> Result<String, EncodeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;

    let vehicle = &model.vehicle;
    check_tag_name(&vehicle.name)?;
    let mut vehicle_start = BytesStart::new(vehicle.name.as_str());
    vehicle_start.push_attribute(("fovOut", format_real(vehicle.fov_out).as_str()));
    vehicle_start.push_attribute(("fovIn", format_real(vehicle.fov_in).as_str()));
    emit(&mut writer, Event::Start(vehicle_start))?;

    write_ammo_section(&mut writer, &model.ammo)?;
    write_image_section(&mut writer, model, options)?;

    emit(&mut writer, Event::End(BytesEnd::new(vehicle.name.as_str())))?;
    emit(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| EncodeError::encoding("XML ist kein gueltiges UTF-8", e))
}

fn write_ammo_section(
    writer: &mut Writer<Vec<u8>>,
    ammo: &[AmmoCalibration],
) -> Result<(), EncodeError> {
    if ammo.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new(AMMO_TAG)));
    }

    emit(writer, Event::Start(BytesStart::new(AMMO_TAG)))?;
    // Reihenfolge wie im Modell, nicht sortiert
    for entry in ammo {
        check_tag_name(&entry.ammo_name)?;
        let center = format!("{},{}", entry.marker_center.x, entry.marker_center.y);

        let mut start = BytesStart::new(entry.ammo_name.as_str());
        start.push_attribute(("zoomedIn", if entry.zoomed_in { "true" } else { "false" }));
        start.push_attribute(("imageName", entry.image_name.as_str()));
        start.push_attribute(("markerCenter", center.as_str()));
        emit(writer, Event::Start(start))?;

        let markers: Vec<(String, String)> = entry
            .marker_ranges
            .iter()
            .enumerate()
            .map(|(i, m)| (format!("marker_{}", i), format!("{}, {}", m.x, m.y)))
            .collect();
        let mut ranges = BytesStart::new(MARKER_RANGES_TAG);
        for (key, value) in &markers {
            ranges.push_attribute((key.as_str(), value.as_str()));
        }
        emit(writer, Event::Empty(ranges))?;

        emit(writer, Event::End(BytesEnd::new(entry.ammo_name.as_str())))?;
    }
    emit(writer, Event::End(BytesEnd::new(AMMO_TAG)))
}

fn write_image_section(
    writer: &mut Writer<Vec<u8>>,
    model: &CalibrationModel,
    options: &EncoderOptions,
) -> Result<(), EncodeError> {
    if model.images.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new(IMAGES_TAG)));
    }

    let mut entries: Vec<_> = model.images.iter().collect();
    if options.sort_images_by_key {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    emit(writer, Event::Start(BytesStart::new(IMAGES_TAG)))?;
    for (name, image) in entries {
        check_tag_name(name)?;
        let encoded = encode_image_base64(image, options.effective_jpeg_quality())?;
        log::debug!("Bild '{}' kodiert: {} Base64-Zeichen", name, encoded.len());

        let mut element = BytesStart::new(name.as_str());
        element.push_attribute(("encodedData", encoded.as_str()));
        emit(writer, Event::Empty(element))?;
    }
    emit(writer, Event::End(BytesEnd::new(IMAGES_TAG)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), EncodeError> {
    writer
        .write_event(event)
        .map_err(|e| EncodeError::encoding("XML-Serialisierung fehlgeschlagen", e))
}

/// Fahrzeug-, Munitions- und Bildnamen werden zu Tag-Namen und müssen
/// daher gültige XML-Namen sein.
fn check_tag_name(name: &str) -> Result<(), EncodeError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(EncodeError::Encoding(format!(
            "ungueltiger XML-Elementname: '{}'",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vehicle;
    use glam::IVec2;

    fn model() -> CalibrationModel {
        let mut model = CalibrationModel::new(Vehicle::new("germ_pzkpfw_IV_ausf_G", 40.0, 12.5));
        model.ammo.push(AmmoCalibration {
            ammo_name: "pzgr39".into(),
            zoomed_in: true,
            image_name: "img_pzgr39".into(),
            marker_center: IVec2::new(960, 540),
            marker_ranges: vec![IVec2::new(960, 500), IVec2::new(960, 470)],
        });
        model
    }

    #[test]
    fn test_marker_ranges_are_positional_with_space() {
        let xml = write_calibration_xml(&model(), &EncoderOptions::default()).unwrap();

        assert!(xml.contains(r#"<pzgr39 zoomedIn="true" imageName="img_pzgr39" markerCenter="960,540">"#));
        assert!(xml.contains(r#"<markerRanges marker_0="960, 500" marker_1="960, 470"/>"#));
    }

    #[test]
    fn test_document_layout_and_indent() {
        let xml = write_calibration_xml(&model(), &EncoderOptions::default()).unwrap();
        let lines: Vec<&str> = xml.lines().collect();

        assert!(lines[0].starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\""));
        assert_eq!(lines[1], "<ballisticData>");
        assert_eq!(
            lines[2],
            r#"  <germ_pzkpfw_IV_ausf_G fovOut="40.0" fovIn="12.5">"#
        );
        assert_eq!(lines[3], "    <ammo>");
        assert!(lines[5].starts_with("        <markerRanges "));
        assert_eq!(lines[lines.len() - 1], "</ballisticData>");
        assert!(xml.contains("    <images/>"));
    }

    #[test]
    fn test_invalid_tag_name_is_encoding_error() {
        let mut model = model();
        model.ammo[0].ammo_name = "75mm shell".into();

        let err = write_calibration_xml(&model, &EncoderOptions::default())
            .expect_err("Ungueltiger Name muss abgelehnt werden");
        assert!(matches!(err, EncodeError::Encoding(_)));
    }

    #[test]
    fn test_check_tag_name() {
        assert!(check_tag_name("us_m4a1").is_ok());
        assert!(check_tag_name("_x.y-z").is_ok());
        assert!(check_tag_name("").is_err());
        assert!(check_tag_name("1abc").is_err());
        assert!(check_tag_name("a<b").is_err());
    }
}
