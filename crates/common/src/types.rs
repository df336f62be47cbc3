use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 8-bit-per-channel RGBA color, laid out as it is uploaded to the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One box in the grid: where it sits, how large it is, and its color.
///
/// `position` is the minimum corner of the unit cube after scaling, so a box
/// covers `position..position + scale`. Height lives in `scale.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub position: Vec3,
    pub scale: Vec3,
    pub color: Rgba,
}

impl Instance {
    /// Height of the box (its Y scale).
    pub fn height(&self) -> f32 {
        self.scale.y
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Rgba::default(),
        }
    }
}
