//! The 64×64 skin canvas and the tools that paint on it.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage, imageops};

use crate::codec;
use crate::color::Color;
use crate::uv::{Face, SkinLayer, face_region};
use crate::{CANVAS_SIZE, HEAD_FACE, PREVIEW_SIZE, Result, TextureError};

/// Fill colours of the starter head, one per base-layer face.
const BASE_FACE_COLORS: [(Face, Color); 6] = [
    (Face::Top, Color::rgb(0xFF, 0xFF, 0xFF)),
    (Face::Bottom, Color::rgb(0x80, 0x80, 0x80)),
    (Face::Right, Color::rgb(0x4C, 0xAF, 0x50)),
    (Face::Front, Color::rgb(0xF4, 0x43, 0x36)),
    (Face::Left, Color::rgb(0xFF, 0xEB, 0x3B)),
    (Face::Back, Color::rgb(0x21, 0x96, 0xF3)),
];

/// A skin texture being edited.
///
/// Always exactly [`CANVAS_SIZE`]×[`CANVAS_SIZE`]; constructors reject
/// anything else so the tools never need to re-check bounds against a
/// different size.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinCanvas {
    image: RgbaImage,
}

impl SkinCanvas {
    /// Fully transparent canvas.
    pub fn blank() -> Self {
        Self { image: RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE) }
    }

    /// Transparent canvas with each base head face filled in its own colour.
    pub fn base_skin() -> Self {
        let mut canvas = Self::blank();
        for (face, color) in BASE_FACE_COLORS {
            let region = face_region(SkinLayer::Base, face);
            canvas.fill_rect(
                region.x() as i32,
                region.y() as i32,
                region.width(),
                region.height(),
                color.to_rgba(),
            );
        }
        canvas
    }

    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width != CANVAS_SIZE || height != CANVAS_SIZE {
            tracing::warn!(width, height, "rejected skin with wrong dimensions");
            return Err(TextureError::Dimensions { width, height, expected: CANVAS_SIZE });
        }
        Ok(Self { image })
    }

    pub fn from_data_uri(uri: &str) -> Result<Self> {
        Self::from_image(codec::decode_data_uri(uri)?)
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_image(codec::decode_image(bytes)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_png_bytes(&bytes)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    pub fn to_data_uri(&self) -> Result<String> {
        codec::encode_data_uri(&self.image)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        codec::encode_png(&self.image)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        let (x, y) = in_bounds(x, y)?;
        Some(*self.image.get_pixel(x, y))
    }

    // ── Tools ──────────────────────────────────────────────────────────────

    /// Fill a `size`×`size` square with `color`, its top-left corner at
    /// `(x, y)`. Returns `false` when the anchor is off-canvas.
    pub fn brush(&mut self, x: i32, y: i32, size: u32, color: Color) -> bool {
        if in_bounds(x, y).is_none() {
            return false;
        }
        self.fill_rect(x, y, size.max(1), size.max(1), color.to_rgba());
        true
    }

    /// Restore a `size`×`size` square from `original`.
    pub fn erase(&mut self, x: i32, y: i32, size: u32, original: &SkinCanvas) -> bool {
        if in_bounds(x, y).is_none() {
            return false;
        }
        let size = size.max(1) as i32;
        for py in y..y + size {
            for px in x..x + size {
                if let (Some((cx, cy)), Some(src)) = (in_bounds(px, py), original.pixel(px, py)) {
                    self.image.put_pixel(cx, cy, src);
                }
            }
        }
        true
    }

    /// Colour under `(x, y)`; `None` off-canvas or on a transparent pixel.
    pub fn pick(&self, x: i32, y: i32) -> Option<Color> {
        self.pixel(x, y).and_then(Color::from_pixel)
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: Rgba<u8>) {
        for py in y..y.saturating_add(height as i32) {
            for px in x..x.saturating_add(width as i32) {
                if let Some((cx, cy)) = in_bounds(px, py) {
                    self.image.put_pixel(cx, cy, rgba);
                }
            }
        }
    }

    // ── Preview ────────────────────────────────────────────────────────────

    /// Front of the head, base with the overlay composited on top, upscaled
    /// to [`PREVIEW_SIZE`] with nearest-neighbour sampling.
    pub fn head_preview(&self) -> RgbaImage {
        let front = face_region(SkinLayer::Base, Face::Front);
        let hat = face_region(SkinLayer::Overlay, Face::Front);

        let mut face = imageops::crop_imm(&self.image, front.x(), front.y(), HEAD_FACE, HEAD_FACE).to_image();
        let overlay = imageops::crop_imm(&self.image, hat.x(), hat.y(), HEAD_FACE, HEAD_FACE).to_image();
        imageops::overlay(&mut face, &overlay, 0, 0);

        imageops::resize(&face, PREVIEW_SIZE, PREVIEW_SIZE, imageops::FilterType::Nearest)
    }

    pub fn head_preview_data_uri(&self) -> Result<String> {
        codec::encode_data_uri(&self.head_preview())
    }

    pub fn save_head_preview(&self, path: impl AsRef<Path>) -> Result<()> {
        self.head_preview().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Default for SkinCanvas {
    fn default() -> Self {
        Self::base_skin()
    }
}

fn in_bounds(x: i32, y: i32) -> Option<(u32, u32)> {
    let size = CANVAS_SIZE as i32;
    ((0..size).contains(&x) && (0..size).contains(&y)).then_some((x as u32, y as u32))
}
