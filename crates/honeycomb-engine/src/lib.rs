//! Honeycomb Engine
//!
//! A pannable, snapping hexagonal layout for a growing collection of items.
//!
//! # Architecture
//!
//! - **Grid**: items take spiral slots in arrival order and never move
//! - **Gesture**: drags move the pan offset, releases spring it onto the
//!   item nearest to where the fling would coast
//! - **Proximity**: per-frame scale, opacity and stacking from distance to
//!   the focal point, with culling outside the screen
//! - **Zoom**: a long press shrinks the whole canvas while held
//! - **Effects**: load-more and selection requests are queued for the host
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = HoneycombEngine::with_items(config, Viewport::new(400.0, 800.0), users)?;
//!
//! engine.handle(GestureEvent::PanBegin)?;
//! engine.handle(GestureEvent::PanUpdate { translation })?;
//! engine.handle(GestureEvent::PanEnd { velocity })?;
//!
//! // Every frame
//! engine.tick(dt);
//! engine.render(&mut renderer);
//! engine.dispatch(&mut feed, &mut on_select);
//! ```

mod bounds;
mod config;
mod curve;
mod engine;
mod error;
mod gesture;
mod grid;
mod selection;
mod spring;
mod viewport;
mod zoom;

pub use bounds::{GridBounds, Rect};
pub use config::{EngineConfig, ProximityConfig, SnapConfig, ZoomConfig};
pub use curve::Curve;
pub use engine::{DataSource, Effect, GestureEvent, HoneycombEngine, ItemRenderer, SelectionSink};
pub use error::{Error, Result};
pub use gesture::{DragRelease, GestureState, PanController, SnapTarget};
pub use grid::{GridItem, Honeycomb, ItemId};
pub use selection::{SelectionSet, TapPolicy};
pub use spring::{Animatable, Spring, SpringConfig};
pub use viewport::{item_style, render_pairs, styles, ItemStyle, ProximityEngine, Viewport};
pub use zoom::CanvasZoom;

pub use honeycomb_topology::{HexCoord, HexLayout};
