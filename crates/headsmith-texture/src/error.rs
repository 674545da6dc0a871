//! Error types for texture encoding and decoding.

use thiserror::Error;

/// Errors that can occur while loading, saving, or parsing texture data.
#[derive(Error, Debug)]
pub enum TextureError {
    /// Input is not a `data:<mime>;base64,<payload>` URI.
    #[error("not a base64 data URI: {0}")]
    InvalidDataUri(String),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Decoded image is not a 64×64 skin.
    #[error("skin must be {expected}x{expected}, got {width}x{height}")]
    Dimensions {
        width: u32,
        height: u32,
        expected: u32,
    },

    /// Colour string is not `#RRGGBB`.
    #[error("invalid colour '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
