//! Item selection.
//!
//! The selection holds ids only and never touches the grid geometry. Ids may
//! outlive their items; callers decide whether to drop them on removal.

use serde::{Deserialize, Serialize};

use crate::grid::ItemId;

/// What a tap does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TapPolicy {
    /// Tapping flips membership of the tapped item (multi-select).
    #[default]
    Toggle,
    /// Tapping makes the tapped item the only selected one.
    Single,
}

/// Selected item ids, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: Vec<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns true if `id` is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Ensure `id` is selected. Returns true if it was newly added.
    pub fn select(&mut self, id: ItemId) -> bool {
        if self.contains(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Ensure `id` is not selected. Returns true if it was removed.
    pub fn deselect(&mut self, id: ItemId) -> bool {
        match self.ids.iter().position(|&selected| selected == id) {
            Some(i) => {
                self.ids.remove(i);
                true
            }
            None => false,
        }
    }

    /// Apply a tap under `policy`. Returns true if `id` is selected afterwards.
    pub fn tap(&mut self, id: ItemId, policy: TapPolicy) -> bool {
        match policy {
            TapPolicy::Toggle => self.toggle(id),
            TapPolicy::Single => {
                self.ids.clear();
                self.ids.push(id);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(ItemId(1)));
        assert!(selection.contains(ItemId(1)));
        assert!(!selection.toggle(ItemId(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_is_idempotent() {
        let mut selection = SelectionSet::new();
        assert!(selection.select(ItemId(2)));
        assert!(!selection.select(ItemId(2)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn keeps_selection_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(ItemId(3));
        selection.toggle(ItemId(1));
        selection.toggle(ItemId(2));
        selection.toggle(ItemId(1));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![ItemId(3), ItemId(2)]);
    }

    #[test]
    fn single_policy_replaces_selection() {
        let mut selection = SelectionSet::new();
        selection.tap(ItemId(1), TapPolicy::Single);
        selection.tap(ItemId(2), TapPolicy::Single);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![ItemId(2)]);

        assert!(selection.tap(ItemId(2), TapPolicy::Single));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn clear_empties() {
        let mut selection = SelectionSet::new();
        selection.select(ItemId(1));
        selection.select(ItemId(2));
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.deselect(ItemId(1)));
    }
}
