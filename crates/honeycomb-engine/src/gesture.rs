//! Pan offset ownership and the drag/snap state machine.
//!
//! ```text
//!            begin_drag                 end_drag (grid non-empty)
//!   Idle ───────────────▶ Dragging ──────────────────────────▶ Snapping
//!    ▲                      ▲  │ end_drag (grid empty)             │ │
//!    │                      │  └──────────────────▶ Idle           │ │
//!    │                      └──── begin_drag (cancels spring) ─────┘ │
//!    └────────────────────────── spring settles ─────────────────────┘
//! ```
//!
//! The pan offset is written only here: directly while dragging, through
//! the spring while snapping. At rest after a snap it equals the negated
//! position of exactly one item, the focused one.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::SnapConfig;
use crate::grid::{Honeycomb, ItemId};
use crate::spring::Spring;
use crate::viewport::Viewport;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    /// Pan offset at rest
    Idle,
    /// A pan gesture is moving the offset directly
    Dragging,
    /// A spring is carrying the offset to a snap target
    Snapping,
}

/// Where a drag release is headed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapTarget {
    /// Item that will end up on the focal point
    pub item: ItemId,
    /// Pan offset at rest
    pub pan: Vec2,
    /// Velocity-predicted pan offset the search started from
    pub predicted: Vec2,
}

/// Outcome of ending a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragRelease {
    /// None when the grid is empty or no drag was active
    pub snap: Option<SnapTarget>,
    /// The resting viewport comes close to the edge of the grid
    pub load_more: bool,
}

/// Owner of the pan offset.
#[derive(Debug, Clone)]
pub struct PanController {
    config: SnapConfig,
    pan: Spring<Vec2>,
    state: GestureState,
    drag_origin: Vec2,
    focused: Option<ItemId>,
    heading_to: Option<ItemId>,
}

impl PanController {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            pan: Spring::new(Vec2::ZERO),
            state: GestureState::Idle,
            drag_origin: Vec2::ZERO,
            focused: None,
            heading_to: None,
        }
    }

    /// Current pan offset.
    pub fn pan(&self) -> Vec2 {
        self.pan.value()
    }

    /// Current pan velocity, zero unless snapping.
    pub fn velocity(&self) -> Vec2 {
        self.pan.velocity()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Item the offset rests on, when idle after a snap.
    pub fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    /// Item an in-flight snap is carrying to the focal point.
    pub fn heading_to(&self) -> Option<ItemId> {
        self.heading_to
    }

    /// A pan gesture started. Interrupts any snap in flight.
    pub fn begin_drag(&mut self) {
        if self.state == GestureState::Snapping {
            debug!(pan = ?self.pan.value(), "snap interrupted by drag");
            self.pan.stop();
        }
        self.drag_origin = self.pan.value();
        self.state = GestureState::Dragging;
        self.focused = None;
        self.heading_to = None;
        trace!(origin = ?self.drag_origin, "drag began");
    }

    /// The pan gesture moved; `translation` is cumulative since it began.
    pub fn update_drag(&mut self, translation: Vec2) {
        if self.state != GestureState::Dragging {
            trace!("drag update outside a drag ignored");
            return;
        }
        self.pan.set_immediate(self.drag_origin + translation);
    }

    /// The pan gesture ended with `velocity` (pixels per second).
    ///
    /// Picks the item nearest to where the offset would coast to, starts a
    /// spring toward it seeded with `velocity`, and reports whether the
    /// resting viewport nears the grid edge. With an empty grid the offset
    /// simply stays where the drag left it.
    pub fn end_drag<T>(
        &mut self,
        velocity: Vec2,
        grid: &Honeycomb<T>,
        viewport: &Viewport,
    ) -> DragRelease {
        if self.state != GestureState::Dragging {
            trace!("drag end outside a drag ignored");
            return DragRelease::default();
        }

        let predicted = self.pan.value() + velocity * self.config.prediction_secs;
        let Some(nearest) = grid.nearest(-predicted) else {
            debug!("drag ended over empty grid");
            self.state = GestureState::Idle;
            return DragRelease::default();
        };

        let target = SnapTarget {
            item: nearest.id(),
            pan: -nearest.position(),
            predicted,
        };
        debug!(item = %target.item, coord = %nearest.coord(), ?predicted, "snapping");

        self.pan
            .animate_to(target.pan, self.config.release_spring, Some(velocity));
        self.state = GestureState::Snapping;
        self.heading_to = Some(target.item);

        let resting_view = viewport.visible_rect(target.pan);
        let load_more = grid
            .bounds()
            .near_edge(&resting_view, self.config.load_more_threshold);
        if load_more {
            info!(item = %target.item, "resting view nears grid edge");
        }

        DragRelease {
            snap: Some(target),
            load_more,
        }
    }

    /// Carry `item` to the focal point with the tap spring.
    ///
    /// Ignored while a drag is in progress. Returns whether a snap started.
    pub fn center_on(&mut self, item: ItemId, position: Vec2) -> bool {
        if self.state == GestureState::Dragging {
            debug!(%item, "centre request during drag ignored");
            return false;
        }
        self.pan.animate_to(-position, self.config.tap_spring, None);
        self.state = GestureState::Snapping;
        self.focused = None;
        self.heading_to = Some(item);
        debug!(%item, "centring on item");
        true
    }

    /// Advance the snap spring. Returns the item that just came to rest.
    pub fn tick(&mut self, dt: f32) -> Option<ItemId> {
        if self.state != GestureState::Snapping || self.pan.tick(dt) {
            return None;
        }
        self.state = GestureState::Idle;
        self.focused = self.heading_to.take();
        debug!(item = ?self.focused, pan = ?self.pan.value(), "snap settled");
        self.focused
    }

    /// Mark `item` as focused if the offset already rests exactly on it.
    pub fn adopt_focus(&mut self, item: ItemId, position: Vec2) -> bool {
        if self.state == GestureState::Idle && self.focused.is_none() && self.pan.value() == -position {
            self.focused = Some(item);
            return true;
        }
        false
    }

    /// An item left the grid. The offset stays put.
    pub fn forget(&mut self, item: ItemId) {
        if self.focused == Some(item) {
            self.focused = None;
        }
        if self.heading_to == Some(item) {
            self.heading_to = None;
        }
    }

    /// Back to the origin, idle, nothing focused.
    pub fn reset(&mut self) {
        self.pan.set_immediate(Vec2::ZERO);
        self.state = GestureState::Idle;
        self.drag_origin = Vec2::ZERO;
        self.focused = None;
        self.heading_to = None;
    }
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}
