//! PNG data URI encoding.
//!
//! Snapshots and previews travel as `data:image/png;base64,...` strings, the
//! same form a browser canvas exports. Encoding is deterministic: identical
//! pixels always produce an identical string, which is what lets the
//! history skip checkpoints that changed nothing.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};

use crate::{Result, TextureError};

/// Prefix of every URI this module produces.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode an image as a PNG data URI.
pub fn encode_data_uri(image: &RgbaImage) -> Result<String> {
    let bytes = encode_png(image)?;
    Ok(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(bytes)))
}

/// Extract the base64 payload of a data URI.
pub fn data_uri_payload(uri: &str) -> Result<&str> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| TextureError::InvalidDataUri(truncate(uri)))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| TextureError::InvalidDataUri(truncate(uri)))?;
    if !meta.ends_with(";base64") {
        return Err(TextureError::InvalidDataUri(truncate(uri)));
    }
    Ok(payload)
}

/// Decode any image data URI into RGBA pixels.
pub fn decode_data_uri(uri: &str) -> Result<RgbaImage> {
    let payload = data_uri_payload(uri)?;
    let bytes = STANDARD.decode(payload.trim())?;
    decode_image(&bytes)
}

/// Decode encoded image bytes (format sniffed) into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.into_rgba8())
}

fn truncate(s: &str) -> String {
    s.chars().take(32).collect()
}
