//! The item collection and its slot assignment.
//!
//! Items get slots from a spiral cursor in arrival order. Growth is
//! append-only: existing items never change slot, and removing an item
//! leaves its slot empty rather than pulling later items inward. The cursor
//! only moves forward, so a vacated slot is never handed out again until
//! [`Honeycomb::reset`].

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use honeycomb_topology::{spiral_coords, HexCoord, HexLayout, Spiral, SpiralIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bounds::{GridBounds, Rect};
use crate::error::{Error, Result};

/// Stable identifier of a grid item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entity placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem<T> {
    id: ItemId,
    coord: HexCoord,
    position: Vec2,
    payload: T,
}

impl<T> GridItem<T> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Pixel offset of the slot centre from the origin slot.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Ordered collection of grid items.
#[derive(Debug, Clone)]
pub struct Honeycomb<T> {
    layout: HexLayout,
    spiral: Spiral,
    items: Vec<GridItem<T>>,
    index: HashMap<ItemId, usize>,
    occupied: HashSet<HexCoord>,
    bounds: GridBounds,
}

impl<T> Honeycomb<T> {
    /// An empty grid.
    pub fn new(layout: HexLayout) -> Self {
        Self {
            layout,
            spiral: Spiral::new(),
            items: Vec::new(),
            index: HashMap::new(),
            occupied: HashSet::new(),
            bounds: GridBounds::EMPTY,
        }
    }

    /// A grid laid out in one batch. Later appends continue the spiral.
    pub fn with_items(
        layout: HexLayout,
        items: impl IntoIterator<Item = (ItemId, T)>,
    ) -> Result<Self> {
        let items: Vec<_> = items.into_iter().collect();
        check_unique(&HashMap::new(), &items)?;

        let coords = spiral_coords(items.len());
        let mut grid = Self::new(layout);
        grid.spiral = Spiral::starting_at(SpiralIndex(coords.len() as u64));
        for ((id, payload), coord) in items.into_iter().zip(coords) {
            grid.place(id, coord, payload);
        }
        grid.refresh_bounds();

        debug!(count = grid.len(), "laid out grid");
        Ok(grid)
    }

    /// Append items in order, each on the next free spiral slot.
    ///
    /// Fails without changing anything if any id is already present or
    /// repeats within `items`.
    pub fn append(&mut self, items: impl IntoIterator<Item = (ItemId, T)>) -> Result<usize> {
        let items: Vec<_> = items.into_iter().collect();
        check_unique(&self.index, &items)?;

        let count = items.len();
        for (id, payload) in items {
            let coord = self.next_coord();
            self.place(id, coord, payload);
        }
        self.refresh_bounds();

        debug!(appended = count, total = self.len(), "grid grew");
        Ok(count)
    }

    /// Remove one item. Every other item keeps its slot.
    pub fn remove(&mut self, id: ItemId) -> Option<GridItem<T>> {
        let position = self.index.remove(&id)?;
        let item = self.items.remove(position);
        self.occupied.remove(&item.coord);
        for later in &self.items[position..] {
            if let Some(slot) = self.index.get_mut(&later.id) {
                *slot -= 1;
            }
        }
        self.refresh_bounds();

        debug!(%id, coord = %item.coord, remaining = self.len(), "removed item");
        Some(item)
    }

    /// Drop every item and restart the spiral at the origin.
    pub fn reset(&mut self) {
        self.items.clear();
        self.index.clear();
        self.occupied.clear();
        self.spiral.reset();
        self.bounds = GridBounds::EMPTY;
    }

    pub fn get(&self, id: ItemId) -> Option<&GridItem<T>> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridItem<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    /// Bounding box of every item position; zero box at the origin when empty.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Spiral index the next appended item will take.
    pub fn next_slot(&self) -> SpiralIndex {
        self.spiral.position()
    }

    /// Item whose position is closest to `point`.
    ///
    /// Ties go to the earliest item in collection order.
    pub fn nearest(&self, point: Vec2) -> Option<&GridItem<T>> {
        let mut best: Option<(&GridItem<T>, f32)> = None;
        for item in &self.items {
            let d = item.position.distance_squared(point);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((item, d));
            }
        }
        best.map(|(item, _)| item)
    }

    /// Item sitting exactly on `point`, if any.
    pub fn at_position(&self, point: Vec2) -> Option<&GridItem<T>> {
        self.items.iter().find(|item| item.position == point)
    }

    fn next_coord(&mut self) -> HexCoord {
        match self.spiral.next() {
            Some(coord) => coord,
            None => unreachable!("unbounded spiral ended"),
        }
    }

    fn place(&mut self, id: ItemId, coord: HexCoord, payload: T) {
        assert!(
            self.occupied.insert(coord),
            "slot {coord} assigned twice (item {id})"
        );
        trace!(%id, %coord, "placed item");
        self.index.insert(id, self.items.len());
        self.items.push(GridItem {
            id,
            coord,
            position: self.layout.project(coord),
            payload,
        });
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Rect::from_points(self.items.iter().map(|item| item.position));
    }
}

impl<'a, T> IntoIterator for &'a Honeycomb<T> {
    type Item = &'a GridItem<T>;
    type IntoIter = std::slice::Iter<'a, GridItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn check_unique<T>(existing: &HashMap<ItemId, usize>, items: &[(ItemId, T)]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for (id, _) in items {
        if existing.contains_key(id) || !seen.insert(*id) {
            return Err(Error::DuplicateItem(*id));
        }
    }
    Ok(())
}
