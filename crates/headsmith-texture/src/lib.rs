//! Skin texture canvas for Headsmith.
//!
//! A Minecraft skin is a 64×64 RGBA texture; the head occupies the top
//! 16 rows, with a base layer on the left half and an overlay (hat) layer on
//! the right. This crate owns that texture: the painting tools, the
//! front-of-head preview, the UV table that maps a 3D hit to a pixel, and
//! the PNG data URI form that history snapshots are stored in.

pub mod canvas;
pub mod codec;
pub mod color;
pub mod error;
pub mod uv;

pub use canvas::SkinCanvas;
pub use codec::{PNG_DATA_URI_PREFIX, decode_data_uri, encode_data_uri};
pub use color::Color;
pub use error::TextureError;
pub use image::{Rgba, RgbaImage};
pub use uv::{BASE_UVS, Face, FaceRegion, OVERLAY_UVS, SkinLayer, face_at, face_region, uv_to_pixel};

/// Side of the skin texture in pixels.
pub const CANVAS_SIZE: u32 = 64;

/// Side of the head preview image in pixels.
pub const PREVIEW_SIZE: u32 = 32;

/// Side of one head face on the texture in pixels.
pub const HEAD_FACE: u32 = 8;

/// Result type for texture operations.
pub type Result<T> = std::result::Result<T, TextureError>;
