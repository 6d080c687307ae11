//! Honeycomb Topology
//!
//! Slot assignment and geometry for an infinite hexagonal grid.
//!
//! # Coordinates
//!
//! Every slot is an axial coordinate (q, r) with the implicit third axis
//! s = -q - r. Slots are handed out in concentric rings around the origin:
//!
//! - Ring 0: the origin (1 slot)
//! - Ring k > 0: 6k slots, walked side by side starting from `k * DIRECTIONS[4]`
//!
//! The walk never revisits a slot, so a grid filled in spiral order is
//! hole-free and duplicate-free no matter how far it grows.
//!
//! # Projection
//!
//! [`HexLayout`] maps a slot to the pixel offset of its centre for a
//! pointy-top layout with a fixed hex size.

mod hex;
mod layout;
mod spiral;

pub use hex::HexCoord;
pub use layout::{axial_to_pixel, HexLayout, DEFAULT_HEX_SIZE};
pub use spiral::{
    checked_total_slots_through, coord_to_spiral, slots_in_ring, spiral_coords, spiral_to_coord,
    total_slots_through, try_coord_to_spiral, Spiral, SpiralCursor, SpiralIndex, MAX_RING,
};

/// Number of sides (and slots in ring 1) of a hexagon.
pub const SIDES: usize = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_one_matches_direction_count() {
        assert_eq!(slots_in_ring(1) as usize, SIDES);
        assert_eq!(HexCoord::DIRECTIONS.len(), SIDES);
    }
}
