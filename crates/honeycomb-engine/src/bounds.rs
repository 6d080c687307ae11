//! Axis-aligned boxes in grid pixel space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Zero-size box at the origin.
    pub const EMPTY: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    /// Box of `size` centred on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box holding every point, or [`Rect::EMPTY`] for none.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::EMPTY;
        };
        points.fold(Self { min: first, max: first }, |rect, p| Self {
            min: rect.min.min(p),
            max: rect.max.max(p),
        })
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True when the box has no area.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    /// True when any edge of `view` reaches within `threshold` of the
    /// matching edge of `self`, or past it.
    pub fn near_edge(&self, view: &Rect, threshold: f32) -> bool {
        view.max.x >= self.max.x - threshold
            || view.min.x <= self.min.x + threshold
            || view.max.y >= self.max.y - threshold
            || view.min.y <= self.min.y + threshold
    }
}

/// Bounding box over every item's pixel position.
pub type GridBounds = Rect;
