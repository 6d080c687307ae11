//! Axial hexagonal coordinates.
//!
//! A slot is addressed by two axes (q, r) 60 degrees apart. The cube axis
//! s = -q - r is derived, never stored.

use std::ops::{Add, Mul, Neg, Sub};

/// A slot on the hexagonal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    /// Column axis
    pub q: i64,
    /// Row axis
    pub r: i64,
}

impl HexCoord {
    /// Origin of the grid.
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// The six unit directions, in the order the spiral walks its sides.
    pub const DIRECTIONS: [Self; 6] = [
        Self { q: 1, r: 0 },  // East
        Self { q: 1, r: -1 }, // Northeast
        Self { q: 0, r: -1 }, // Northwest
        Self { q: -1, r: 0 }, // West
        Self { q: -1, r: 1 }, // Southwest
        Self { q: 0, r: 1 },  // Southeast
    ];

    /// Index into [`Self::DIRECTIONS`] of the direction a ring starts from.
    pub const RING_START_DIRECTION: usize = 4;

    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    /// Third cube axis, `-q - r`.
    pub const fn s(&self) -> i64 {
        -self.q - self.r
    }

    /// Hexagonal distance: max(|dq|, |dr|, |ds|).
    pub fn hex_distance(&self, other: &Self) -> u64 {
        // Widened so far-apart coordinates cannot overflow.
        let dq = self.q as i128 - other.q as i128;
        let dr = self.r as i128 - other.r as i128;
        let d = dq.unsigned_abs().max(dr.unsigned_abs()).max((dq + dr).unsigned_abs());
        d.min(u64::MAX as u128) as u64
    }

    /// Ring number around the origin (0 = origin).
    pub fn ring(&self) -> u64 {
        self.hex_distance(&Self::ORIGIN)
    }

    /// The six adjacent slots.
    pub fn neighbors(&self) -> [Self; 6] {
        Self::DIRECTIONS.map(|d| *self + d)
    }

    /// First slot of ring `k` in spiral order.
    pub fn ring_start(k: u64) -> Self {
        Self::DIRECTIONS[Self::RING_START_DIRECTION] * k as i64
    }
}

impl Add for HexCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl Sub for HexCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            q: self.q - other.q,
            r: self.r - other.r,
        }
    }
}

impl Neg for HexCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            q: -self.q,
            r: -self.r,
        }
    }
}

impl Mul<i64> for HexCoord {
    type Output = Self;

    #[inline]
    fn mul(self, k: i64) -> Self {
        Self {
            q: self.q * k,
            r: self.r * k,
        }
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
