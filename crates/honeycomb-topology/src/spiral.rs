//! Spiral slot enumeration.
//!
//! Slots are numbered by a [`SpiralIndex`]: index 0 is the origin, then
//! ring 1 takes indices 1..=6, ring 2 takes 7..=18, and so on. Within ring
//! `k` the walk starts at `k * DIRECTIONS[4]` and takes `k` steps along each
//! of the six directions in order, ending one step short of where it began.
//!
//! Two entry points produce the same order:
//!
//! - [`Spiral`] advances a [`SpiralCursor`] one slot at a time, for grids
//!   that grow page by page.
//! - [`spiral_coords`] computes a fixed batch from the closed-form
//!   [`spiral_to_coord`] mapping.

use crate::HexCoord;

/// Outermost ring whose slots all have a `u64` index.
///
/// Index arithmetic is exact up to this ring; [`coord_to_spiral`] panics for
/// slots beyond it and [`try_coord_to_spiral`] returns `None`.
pub const MAX_RING: u64 = 2_479_700_524;

/// A slot number in spiral order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiralIndex(pub u64);

impl SpiralIndex {
    pub const ORIGIN: Self = Self(0);

    #[inline]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Which ring the slot sits on. Ring k > 0 spans the half-open range
    /// `total_slots_through(k - 1)..total_slots_through(k)`.
    pub fn ring(&self) -> u64 {
        if self.0 == 0 {
            return 0;
        }

        // Binary search for the first ring whose cumulative count passes the
        // index; counts past MAX_RING overflow and always pass it.
        let mut lo = 1u64;
        let mut hi = MAX_RING + 1;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match checked_total_slots_through(mid) {
                Some(total) if total <= self.0 => lo = mid + 1,
                _ => hi = mid,
            }
        }
        lo
    }

    /// Steps from the ring's first slot, in `0..6k` on ring k.
    pub fn offset_in_ring(&self) -> u64 {
        match self.ring() {
            0 => 0,
            ring => self.0 - total_slots_through(ring - 1),
        }
    }
}

impl From<u64> for SpiralIndex {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl From<SpiralIndex> for u64 {
    fn from(index: SpiralIndex) -> Self {
        index.0
    }
}

/// Slots on ring `ring`: the origin alone, then six sides of `ring` each.
#[inline]
pub const fn slots_in_ring(ring: u64) -> u64 {
    match ring {
        0 => 1,
        k => 6 * k,
    }
}

/// Slots on rings `0..=ring`, i.e. `1 + 3 * ring * (ring + 1)`.
///
/// Overflows past [`MAX_RING`]; see [`checked_total_slots_through`].
#[inline]
pub const fn total_slots_through(ring: u64) -> u64 {
    1 + 3 * ring * (ring + 1)
}

/// [`total_slots_through`], or `None` when the count does not fit a `u64`.
pub const fn checked_total_slots_through(ring: u64) -> Option<u64> {
    if ring > MAX_RING {
        None
    } else {
        Some(total_slots_through(ring))
    }
}

/// First slot of side `side` on ring `ring`.
fn side_corner(ring: u64, side: usize) -> HexCoord {
    HexCoord::DIRECTIONS[..side]
        .iter()
        .fold(HexCoord::ring_start(ring), |corner, &dir| {
            corner + dir * ring as i64
        })
}

/// Convert a spiral index to its slot.
pub fn spiral_to_coord(index: SpiralIndex) -> HexCoord {
    if index.0 == 0 {
        return HexCoord::ORIGIN;
    }

    let ring = index.ring();
    let offset = index.offset_in_ring();
    let side = (offset / ring) as usize;
    let step = offset % ring;

    side_corner(ring, side) + HexCoord::DIRECTIONS[side] * step as i64
}

/// Convert a slot to its spiral index. Inverse of [`spiral_to_coord`].
///
/// # Panics
///
/// If `coord` lies beyond [`MAX_RING`].
pub fn coord_to_spiral(coord: HexCoord) -> SpiralIndex {
    match try_coord_to_spiral(coord) {
        Some(index) => index,
        None => panic!("{coord} lies past ring {MAX_RING}, outside the u64 index range"),
    }
}

/// Spiral index of `coord`, or `None` if it lies beyond [`MAX_RING`].
pub fn try_coord_to_spiral(coord: HexCoord) -> Option<SpiralIndex> {
    if coord == HexCoord::ORIGIN {
        return Some(SpiralIndex::ORIGIN);
    }

    let ring = coord.ring();
    if ring > MAX_RING {
        return None;
    }
    let base = total_slots_through(ring - 1);

    for (side, &dir) in HexCoord::DIRECTIONS.iter().enumerate() {
        let delta = coord - side_corner(ring, side);
        // Direction components are 0 or ±1, so projecting is a multiply.
        let step = if dir.q != 0 { delta.q * dir.q } else { delta.r * dir.r };
        if step >= 0 && (step as u64) < ring && dir * step == delta {
            return Some(SpiralIndex(base + side as u64 * ring + step as u64));
        }
    }

    unreachable!("{coord} lies on ring {ring} but on none of its sides")
}

/// Compute the first `count` slots in spiral order.
pub fn spiral_coords(count: usize) -> Vec<HexCoord> {
    (0..count as u64)
        .map(|i| spiral_to_coord(SpiralIndex(i)))
        .collect()
}

/// Explicit walk state of the spiral.
///
/// [`SpiralCursor::advance`] is pure: it returns the slot under the cursor
/// together with the cursor for the following slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralCursor {
    index: u64,
    ring: u64,
    side: usize,
    step: u64,
    coord: HexCoord,
}

impl SpiralCursor {
    /// Cursor positioned on the origin.
    pub const ORIGIN: Self = Self {
        index: 0,
        ring: 0,
        side: 0,
        step: 0,
        coord: HexCoord::ORIGIN,
    };

    /// Cursor positioned on an arbitrary slot.
    pub fn at(index: SpiralIndex) -> Self {
        let ring = index.ring();
        if ring == 0 {
            return Self::ORIGIN;
        }
        let offset = index.offset_in_ring();
        Self {
            index: index.0,
            ring,
            side: (offset / ring) as usize,
            step: offset % ring,
            coord: spiral_to_coord(index),
        }
    }

    /// Index of the slot under the cursor.
    pub fn index(&self) -> SpiralIndex {
        SpiralIndex(self.index)
    }

    /// Slot under the cursor.
    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Yield the slot under the cursor and the cursor for the next slot.
    pub fn advance(self) -> (HexCoord, Self) {
        let next = if self.ring == 0 {
            Self {
                index: 1,
                ring: 1,
                side: 0,
                step: 0,
                coord: HexCoord::ring_start(1),
            }
        } else if self.step + 1 < self.ring {
            Self {
                index: self.index + 1,
                step: self.step + 1,
                coord: self.coord + HexCoord::DIRECTIONS[self.side],
                ..self
            }
        } else if self.side + 1 < HexCoord::DIRECTIONS.len() {
            Self {
                index: self.index + 1,
                side: self.side + 1,
                step: 0,
                coord: self.coord + HexCoord::DIRECTIONS[self.side],
                ..self
            }
        } else {
            let ring = self.ring + 1;
            Self {
                index: self.index + 1,
                ring,
                side: 0,
                step: 0,
                coord: HexCoord::ring_start(ring),
            }
        };
        (self.coord, next)
    }
}

impl Default for SpiralCursor {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Iterator over spiral slots.
///
/// Unbounded by default; restart by building a new one or calling
/// [`Spiral::reset`].
#[derive(Debug, Clone)]
pub struct Spiral {
    cursor: SpiralCursor,
    limit: Option<u64>,
}

impl Spiral {
    /// Unbounded walk from the origin.
    pub fn new() -> Self {
        Self {
            cursor: SpiralCursor::ORIGIN,
            limit: None,
        }
    }

    /// Create an infinite spiral iterator resuming at `index`.
    pub fn starting_at(index: SpiralIndex) -> Self {
        Self {
            cursor: SpiralCursor::at(index),
            limit: None,
        }
    }

    /// The first `count` slots, then stop.
    pub fn take_slots(count: u64) -> Self {
        Self {
            cursor: SpiralCursor::ORIGIN,
            limit: Some(count),
        }
    }

    /// Create a spiral iterator for a closed ring range.
    pub fn rings(start_ring: u64, end_ring: u64) -> Self {
        let start_slot = if start_ring == 0 {
            0
        } else {
            total_slots_through(start_ring - 1)
        };

        Self {
            cursor: SpiralCursor::at(SpiralIndex(start_slot)),
            limit: Some(total_slots_through(end_ring)),
        }
    }

    /// Index of the next slot this iterator will yield.
    pub fn position(&self) -> SpiralIndex {
        self.cursor.index()
    }

    /// Rewind to the origin, keeping the limit.
    pub fn reset(&mut self) {
        self.cursor = SpiralCursor::ORIGIN;
    }
}

impl Default for Spiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Spiral {
    type Item = HexCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(limit) = self.limit {
            if self.cursor.index >= limit {
                return None;
            }
        }

        let (coord, next) = self.cursor.advance();
        self.cursor = next;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(self.cursor.index) as usize;
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}
