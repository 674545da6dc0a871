//! Opaque RGB brush colours written as `#RRGGBB`.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::TextureError;

/// An opaque brush colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional, case-insensitive).
    pub fn parse(s: &str) -> Result<Self, TextureError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TextureError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| TextureError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 0xFF])
    }

    /// Colour of a pixel, ignoring alpha. `None` for fully transparent pixels.
    pub fn from_pixel(pixel: Rgba<u8>) -> Option<Self> {
        let [r, g, b, a] = pixel.0;
        (a > 0).then_some(Self::rgb(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = TextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = TextureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!(Color::parse("#F44336").unwrap(), Color::rgb(0xF4, 0x43, 0x36));
        assert_eq!(Color::parse("f44336").unwrap(), Color::rgb(0xF4, 0x43, 0x36));
        assert_eq!(" #ffffff ".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#fff", "#gggggg", "#1234567", "red"] {
            assert!(matches!(Color::parse(bad), Err(TextureError::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn test_hex_is_lowercase() {
        assert_eq!(Color::rgb(0xAB, 0x0C, 0xFF).to_hex(), "#ab0cff");
    }

    #[test]
    fn test_from_pixel_ignores_transparent() {
        assert_eq!(Color::from_pixel(Rgba([1, 2, 3, 0])), None);
        assert_eq!(Color::from_pixel(Rgba([1, 2, 3, 10])), Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0x21, 0x96, 0xF3)).unwrap();
        assert_eq!(json, "\"#2196f3\"");
        let parsed: Color = serde_json::from_str("\"#2196F3\"").unwrap();
        assert_eq!(parsed, Color::rgb(0x21, 0x96, 0xF3));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
