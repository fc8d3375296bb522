//! Kodierung der Referenzbilder als Base64-JPEG.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::EncodeError;

/// Kodiert ein Bild verlustbehaftet als JPEG und anschließend als Base64.
///
/// Ein Alphakanal wird verworfen, da JPEG ihn nicht abbilden kann.
pub fn encode_image_base64(image: &DynamicImage, quality: u8) -> Result<String, EncodeError> {
    let rgb = image.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| EncodeError::encoding("JPEG-Kodierung fehlgeschlagen", e))?;
    Ok(STANDARD.encode(&jpeg))
}

/// Dekodiert ein Base64-kodiertes Bild (Format wird am Inhalt erkannt).
pub fn decode_image_base64(encoded: &str) -> Result<DynamicImage> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .context("Ungueltige Base64-Daten")?;
    image::load_from_memory(&bytes).context("Bilddaten konnten nicht dekodiert werden")
}
