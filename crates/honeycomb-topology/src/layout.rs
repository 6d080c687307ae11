//! Pixel projection of grid slots.

use glam::Vec2;

use crate::HexCoord;

/// Default hex size in logical pixels.
pub const DEFAULT_HEX_SIZE: f32 = 100.0;

const SQRT_3: f32 = 1.732_050_8;

/// Centre of `coord` relative to the origin slot, pointy-top orientation.
///
/// `x = size * (√3·q + √3/2·r)`, `y = size * 1.5·r`
#[inline]
pub fn axial_to_pixel(coord: HexCoord, hex_size: f32) -> Vec2 {
    let q = coord.q as f32;
    let r = coord.r as f32;
    Vec2::new(
        hex_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        hex_size * (1.5 * r),
    )
}

/// Fixed-size hex layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLayout {
    /// Distance from a hex centre to any of its corners
    pub hex_size: f32,
}

impl HexLayout {
    pub const fn new(hex_size: f32) -> Self {
        Self { hex_size }
    }

    /// Pixel offset of `coord` from the origin.
    #[inline]
    pub fn project(&self, coord: HexCoord) -> Vec2 {
        axial_to_pixel(coord, self.hex_size)
    }

    /// Distance between the centres of two adjacent slots.
    pub fn neighbor_spacing(&self) -> f32 {
        self.hex_size * SQRT_3
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(DEFAULT_HEX_SIZE)
    }
}
