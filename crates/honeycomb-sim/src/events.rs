//! Session events for the report timeline.

use glam::Vec2;
use honeycomb_engine::{HexCoord, ItemId, Viewport};
use serde::{Deserialize, Serialize};

/// Things that happen during a scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// The first page arrived and the grid was laid out
    GridReady {
        items: usize,
        viewport: Viewport,
        frame: u64,
    },

    /// A release or tap started a snap
    SnapStarted {
        item: ItemId,
        coord: HexCoord,
        predicted: Vec2,
        frame: u64,
    },

    /// A snap came to rest on an item
    Settled {
        item: ItemId,
        coord: HexCoord,
        pan: Vec2,
        frame: u64,
    },

    /// The engine asked for another page
    LoadRequested { started: bool, frame: u64 },

    /// A page was appended to the grid
    PageLoaded {
        count: usize,
        total: usize,
        frame: u64,
    },

    /// A tap changed the selection
    Selected {
        item: ItemId,
        selected: bool,
        frame: u64,
    },

    /// An item left the grid
    Dismissed { item: ItemId, frame: u64 },

    /// The long-press zoom engaged or released
    ZoomChanged { active: bool, frame: u64 },
}

impl SessionEvent {
    /// Variant name, as it appears in the JSON `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::GridReady { .. } => "GridReady",
            SessionEvent::SnapStarted { .. } => "SnapStarted",
            SessionEvent::Settled { .. } => "Settled",
            SessionEvent::LoadRequested { .. } => "LoadRequested",
            SessionEvent::PageLoaded { .. } => "PageLoaded",
            SessionEvent::Selected { .. } => "Selected",
            SessionEvent::Dismissed { .. } => "Dismissed",
            SessionEvent::ZoomChanged { .. } => "ZoomChanged",
        }
    }

    pub fn frame(&self) -> u64 {
        match self {
            SessionEvent::GridReady { frame, .. }
            | SessionEvent::SnapStarted { frame, .. }
            | SessionEvent::Settled { frame, .. }
            | SessionEvent::LoadRequested { frame, .. }
            | SessionEvent::PageLoaded { frame, .. }
            | SessionEvent::Selected { frame, .. }
            | SessionEvent::Dismissed { frame, .. }
            | SessionEvent::ZoomChanged { frame, .. } => *frame,
        }
    }
}

/// Outcome of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub frames: u64,
    pub items: usize,
    pub load_requests: u64,
    pub focused: Option<ItemId>,
    pub pan: Vec2,
    pub selection: Vec<ItemId>,
    pub events: Vec<SessionEvent>,
}

impl SessionReport {
    /// Events of one kind, by variant name.
    pub fn events_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SessionEvent> + 'a {
        self.events.iter().filter(move |event| event.name() == name)
    }
}
