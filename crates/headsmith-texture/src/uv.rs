//! Where each head face lives on the skin texture.
//!
//! A head is a cube; each of its six faces maps to an 8×8 square of the
//! 64×64 texture, once for the base layer and once for the overlay (hat)
//! layer. Face order matches the usual box-geometry order: right, left,
//! top, bottom, front, back.

use serde::{Deserialize, Serialize};

use crate::HEAD_FACE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinLayer {
    Base,
    Overlay,
}

/// Texture rectangle of one face, in pixels (`u` horizontal, `v` vertical,
/// half-open ranges).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRegion {
    pub face: Face,
    pub u: (u32, u32),
    pub v: (u32, u32),
}

impl FaceRegion {
    const fn new(face: Face, u: u32, v: u32) -> Self {
        Self { face, u: (u, u + HEAD_FACE), v: (v, v + HEAD_FACE) }
    }

    pub fn x(&self) -> u32 {
        self.u.0
    }

    pub fn y(&self) -> u32 {
        self.v.0
    }

    pub fn width(&self) -> u32 {
        self.u.1 - self.u.0
    }

    pub fn height(&self) -> u32 {
        self.v.1 - self.v.0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.u.0..self.u.1).contains(&x) && (self.v.0..self.v.1).contains(&y)
    }
}

/// Base layer faces.
pub const BASE_UVS: [FaceRegion; 6] = [
    FaceRegion::new(Face::Right, 0, 8),
    FaceRegion::new(Face::Left, 16, 8),
    FaceRegion::new(Face::Top, 8, 0),
    FaceRegion::new(Face::Bottom, 16, 0),
    FaceRegion::new(Face::Front, 8, 8),
    FaceRegion::new(Face::Back, 24, 8),
];

/// Overlay layer faces, 32px to the right of their base counterparts.
pub const OVERLAY_UVS: [FaceRegion; 6] = [
    FaceRegion::new(Face::Right, 32, 8),
    FaceRegion::new(Face::Left, 48, 8),
    FaceRegion::new(Face::Top, 40, 0),
    FaceRegion::new(Face::Bottom, 48, 0),
    FaceRegion::new(Face::Front, 40, 8),
    FaceRegion::new(Face::Back, 56, 8),
];

pub fn face_region(layer: SkinLayer, face: Face) -> FaceRegion {
    let table = match layer {
        SkinLayer::Base => &BASE_UVS,
        SkinLayer::Overlay => &OVERLAY_UVS,
    };
    // Every face appears exactly once per table
    table.iter().copied().find(|r| r.face == face).unwrap_or(table[0])
}

/// Which layer and face a texture pixel belongs to, if any.
pub fn face_at(x: u32, y: u32) -> Option<(SkinLayer, Face)> {
    BASE_UVS
        .iter()
        .map(|r| (SkinLayer::Base, r))
        .chain(OVERLAY_UVS.iter().map(|r| (SkinLayer::Overlay, r)))
        .find(|(_, r)| r.contains(x, y))
        .map(|(layer, r)| (layer, r.face))
}

/// Convert a UV hit (origin bottom-left) to canvas pixel coordinates
/// (origin top-left).
///
/// The result may land one pixel outside the canvas for `u == 1.0` or
/// `v == 0.0`; canvas tools treat out-of-range coordinates as a no-op.
pub fn uv_to_pixel(u: f32, v: f32, width: u32, height: u32) -> (i32, i32) {
    let x = (u * width as f32).floor() as i32;
    let y = ((1.0 - v) * height as f32).floor() as i32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_flips_vertical_axis() {
        assert_eq!(uv_to_pixel(0.0, 1.0, 64, 64), (0, 0));
        assert_eq!(uv_to_pixel(0.5, 0.5, 64, 64), (32, 32));
        assert_eq!(uv_to_pixel(0.99, 0.01, 64, 64), (63, 63));
        assert_eq!(uv_to_pixel(1.0, 0.0, 64, 64), (64, 64));
    }

    #[test]
    fn test_face_regions_are_8x8() {
        for region in BASE_UVS.iter().chain(OVERLAY_UVS.iter()) {
            assert_eq!(region.width(), 8);
            assert_eq!(region.height(), 8);
            assert!(region.y() < 16);
        }
    }

    #[test]
    fn test_front_faces() {
        let base = face_region(SkinLayer::Base, Face::Front);
        assert_eq!((base.x(), base.y()), (8, 8));
        let overlay = face_region(SkinLayer::Overlay, Face::Front);
        assert_eq!((overlay.x(), overlay.y()), (40, 8));
    }

    #[test]
    fn test_face_at() {
        assert_eq!(face_at(8, 0), Some((SkinLayer::Base, Face::Top)));
        assert_eq!(face_at(15, 15), Some((SkinLayer::Base, Face::Front)));
        assert_eq!(face_at(63, 15), Some((SkinLayer::Overlay, Face::Back)));
        // Corners of the head strip are unused
        assert_eq!(face_at(0, 0), None);
        assert_eq!(face_at(10, 40), None);
    }
}
