//! The engine facade and its collaborator interfaces.
//!
//! Inputs arrive as [`GestureEvent`]s and frame ticks on one thread. Work
//! with side effects outside the grid (fetching more items, reacting to a
//! selection) is not done inline: it is queued as an [`Effect`] and handed to
//! the [`DataSource`] and [`SelectionSink`] when the host calls
//! [`HoneycombEngine::dispatch`] from its own event loop.

use std::collections::VecDeque;

use glam::Vec2;
use honeycomb_topology::HexLayout;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::gesture::{GestureState, PanController, SnapTarget};
use crate::grid::{GridItem, Honeycomb, ItemId};
use crate::selection::{SelectionSet, TapPolicy};
use crate::viewport::{render_pairs, ItemStyle, ProximityEngine, Viewport};
use crate::zoom::CanvasZoom;

/// Touch input, already recognised by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GestureEvent {
    /// A pan gesture started
    PanBegin,
    /// The pan moved; translation is cumulative since `PanBegin`
    PanUpdate { translation: Vec2 },
    /// The pan lifted with this velocity, in pixels per second
    PanEnd { velocity: Vec2 },
    /// Pointer down, possibly the start of a long press
    PressBegin,
    /// Pointer up or gesture cancelled
    PressEnd,
    /// An item was tapped
    Tap { item: ItemId },
}

/// Work the engine asks the host to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// The resting viewport nears the grid edge; fetch another page
    LoadMore,
    /// An item was tapped; `selected` is its membership after the tap
    ItemTapped { item: ItemId, selected: bool },
    /// A snap began toward this target
    SnapStarted { target: SnapTarget },
    /// A snap finished with this item on the focal point
    Settled { item: ItemId },
}

/// Supplies more items on request.
///
/// Calls may arrive while an earlier fetch is still running; the source is
/// responsible for ignoring them. Results come back through
/// [`HoneycombEngine::append_items`].
pub trait DataSource {
    fn load_more(&mut self);
}

/// Receives items that a tap added to the selection.
pub trait SelectionSink {
    fn on_item_selected(&mut self, item: ItemId);
}

/// Draws one item per call, back to front.
pub trait ItemRenderer<T> {
    fn render(&mut self, item: &GridItem<T>, style: &ItemStyle);
}

impl<F: FnMut()> DataSource for F {
    fn load_more(&mut self) {
        self()
    }
}

impl<F: FnMut(ItemId)> SelectionSink for F {
    fn on_item_selected(&mut self, item: ItemId) {
        self(item)
    }
}

/// A pannable, snapping honeycomb of `T`.
#[derive(Debug)]
pub struct HoneycombEngine<T> {
    viewport: Viewport,
    grid: Honeycomb<T>,
    pan: PanController,
    proximity: ProximityEngine,
    zoom: CanvasZoom,
    selection: SelectionSet,
    tap_policy: TapPolicy,
    effects: VecDeque<Effect>,
}

impl<T> HoneycombEngine<T> {
    /// An engine over an empty grid.
    pub fn new(config: EngineConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let grid = Honeycomb::new(HexLayout::new(config.hex_size));
        Ok(Self::assemble(config, viewport, grid))
    }

    /// An engine over items laid out in one batch.
    pub fn with_items(
        config: EngineConfig,
        viewport: Viewport,
        items: impl IntoIterator<Item = (ItemId, T)>,
    ) -> Result<Self> {
        config.validate()?;
        let grid = Honeycomb::with_items(HexLayout::new(config.hex_size), items)?;
        let mut engine = Self::assemble(config, viewport, grid);
        engine.adopt_resting_item();
        Ok(engine)
    }

    fn assemble(config: EngineConfig, viewport: Viewport, grid: Honeycomb<T>) -> Self {
        Self {
            viewport,
            grid,
            pan: PanController::new(config.snap),
            proximity: ProximityEngine::new(config.proximity),
            zoom: CanvasZoom::new(config.zoom),
            selection: SelectionSet::new(),
            tap_policy: TapPolicy::default(),
            effects: VecDeque::new(),
        }
    }

    pub fn with_tap_policy(mut self, policy: TapPolicy) -> Self {
        self.tap_policy = policy;
        self
    }

    /// Feed one gesture event.
    ///
    /// Fails for a tap on an item that is not on the grid, and for a pan
    /// update or release carrying a NaN or infinite vector. A rejected event
    /// leaves the engine as it was.
    pub fn handle(&mut self, event: GestureEvent) -> Result<()> {
        match event {
            GestureEvent::PanBegin => self.pan.begin_drag(),
            GestureEvent::PanUpdate { translation } => {
                check_finite("translation", translation)?;
                self.pan.update_drag(translation);
                self.zoom.press_move(translation);
            }
            GestureEvent::PanEnd { velocity } => {
                check_finite("velocity", velocity)?;
                let release = self.pan.end_drag(velocity, &self.grid, &self.viewport);
                if let Some(target) = release.snap {
                    self.effects.push_back(Effect::SnapStarted { target });
                }
                if release.load_more {
                    self.effects.push_back(Effect::LoadMore);
                }
            }
            GestureEvent::PressBegin => self.zoom.press_begin(),
            GestureEvent::PressEnd => self.zoom.press_end(),
            GestureEvent::Tap { item } => self.tap(item)?,
        }
        Ok(())
    }

    fn tap(&mut self, item: ItemId) -> Result<()> {
        let position = self
            .grid
            .get(item)
            .map(GridItem::position)
            .ok_or(Error::UnknownItem(item))?;

        self.pan.center_on(item, position);
        let selected = self.selection.tap(item, self.tap_policy);
        debug!(%item, selected, "item tapped");
        self.effects.push_back(Effect::ItemTapped { item, selected });
        Ok(())
    }

    /// Advance animations by `dt` seconds and rebuild the render set.
    pub fn tick(&mut self, dt: f32) -> &[ItemStyle] {
        if let Some(item) = self.pan.tick(dt) {
            self.effects.push_back(Effect::Settled { item });
        }
        self.zoom.tick(dt);
        self.proximity.update(
            &self.grid,
            self.pan.pan(),
            &self.viewport,
            self.zoom.scale(),
            dt,
        )
    }

    /// Append a page of items after the existing ones.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = (ItemId, T)>) -> Result<usize> {
        let count = self.grid.append(items)?;
        self.adopt_resting_item();
        Ok(count)
    }

    /// Take an item off the grid. Nothing else moves.
    pub fn remove_item(&mut self, id: ItemId) -> Option<GridItem<T>> {
        let Some(item) = self.grid.remove(id) else {
            warn!(%id, "removal of item not on grid ignored");
            return None;
        };
        self.pan.forget(id);
        self.proximity.forget(id);
        self.selection.deselect(id);
        Some(item)
    }

    /// Empty the grid and return the view to the origin.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.pan.reset();
        self.proximity.clear();
        self.selection.clear();
        self.effects.clear();
        debug!("engine reset");
    }

    /// Screen size changed.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Queued effects in the order they were raised.
    pub fn drain_effects(&mut self) -> impl Iterator<Item = Effect> + '_ {
        self.effects.drain(..)
    }

    /// Hand queued effects to the collaborators. Returns how many were queued.
    pub fn dispatch(&mut self, source: &mut dyn DataSource, sink: &mut dyn SelectionSink) -> usize {
        let mut count = 0;
        while let Some(effect) = self.effects.pop_front() {
            count += 1;
            match effect {
                Effect::LoadMore => source.load_more(),
                Effect::ItemTapped {
                    item,
                    selected: true,
                } => sink.on_item_selected(item),
                Effect::ItemTapped { .. } | Effect::SnapStarted { .. } | Effect::Settled { .. } => {}
            }
        }
        count
    }

    /// Draw the current render set back to front.
    pub fn render<R: ItemRenderer<T>>(&self, renderer: &mut R) {
        for (item, style) in render_pairs(&self.grid, self.proximity.frame()) {
            renderer.render(item, style);
        }
    }

    pub fn grid(&self) -> &Honeycomb<T> {
        &self.grid
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current pan offset.
    pub fn pan(&self) -> Vec2 {
        self.pan.pan()
    }

    pub fn state(&self) -> GestureState {
        self.pan.state()
    }

    pub fn focused(&self) -> Option<ItemId> {
        self.pan.focused()
    }

    pub fn canvas_scale(&self) -> f32 {
        self.zoom.scale()
    }

    /// True while a long press holds the canvas zoomed out.
    pub fn zoom_active(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Render set from the last tick.
    pub fn frame(&self) -> &[ItemStyle] {
        self.proximity.frame()
    }

    /// True when no gesture, snap or zoom is in motion.
    pub fn is_at_rest(&self) -> bool {
        self.pan.state() == GestureState::Idle && self.zoom.is_at_rest()
    }

    fn adopt_resting_item(&mut self) {
        if let Some(item) = self.grid.at_position(-self.pan.pan()) {
            self.pan.adopt_focus(item.id(), item.position());
        }
    }
}

fn check_finite(name: &str, v: Vec2) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        warn!(input = name, x = v.x, y = v.y, "non-finite gesture vector rejected");
        Err(Error::InvalidInput(format!("{name} ({}, {}) is not finite", v.x, v.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeycomb_topology::HexCoord;

    const SCREEN: Viewport = Viewport::new(400.0, 800.0);
    const FRAME: f32 = 1.0 / 60.0;

    fn engine(n: u64) -> HoneycombEngine<String> {
        HoneycombEngine::with_items(
            EngineConfig::default(),
            SCREEN,
            (0..n).map(|i| (ItemId(i), format!("user {i}"))),
        )
        .unwrap()
    }

    fn run(engine: &mut HoneycombEngine<String>, secs: f32) {
        for _ in 0..(secs / FRAME).round() as usize {
            engine.tick(FRAME);
        }
    }

    fn fling(engine: &mut HoneycombEngine<String>, translation: Vec2, velocity: Vec2) {
        engine.handle(GestureEvent::PanBegin).unwrap();
        engine
            .handle(GestureEvent::PanUpdate { translation })
            .unwrap();
        engine.handle(GestureEvent::PanEnd { velocity }).unwrap();
    }

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<(ItemId, i32)>,
    }

    impl ItemRenderer<String> for Recorder {
        fn render(&mut self, item: &GridItem<String>, style: &ItemStyle) {
            assert_eq!(item.id(), style.id);
            self.drawn.push((item.id(), style.z_index));
        }
    }

    #[test]
    fn starts_focused_on_origin_item() {
        let engine = engine(30);
        assert_eq!(engine.focused(), Some(ItemId(0)));
        assert!(engine.is_at_rest());
    }

    #[test]
    fn fling_snaps_and_settles() {
        let mut engine = engine(30);
        fling(&mut engine, Vec2::new(-150.0, 0.0), Vec2::new(-100.0, 0.0));
        assert_eq!(engine.state(), GestureState::Snapping);

        run(&mut engine, 5.0);
        assert!(engine.is_at_rest());
        let focused = engine.focused().unwrap();
        let item = engine.grid().get(focused).unwrap();
        assert_eq!(item.coord(), HexCoord::new(1, 0));
        assert_eq!(engine.pan(), -item.position());

        let effects: Vec<_> = engine.drain_effects().collect();
        assert!(matches!(effects[0], Effect::SnapStarted { .. }));
        assert!(effects.contains(&Effect::Settled { item: focused }));
    }

    #[test]
    fn load_more_raised_once_per_release() {
        let mut engine = engine(30);
        fling(&mut engine, Vec2::new(-150.0, 0.0), Vec2::ZERO);
        run(&mut engine, 1.0);

        let mut loads = 0;
        let mut source = || loads += 1;
        let mut sink = |_: ItemId| {};
        engine.dispatch(&mut source, &mut sink);
        assert_eq!(loads, 1);

        let mut loads_again = 0;
        let mut source = || loads_again += 1;
        run(&mut engine, 1.0);
        engine.dispatch(&mut source, &mut sink);
        assert_eq!(loads_again, 0);
    }

    #[test]
    fn empty_engine_never_requests_more() {
        let mut engine: HoneycombEngine<String> =
            HoneycombEngine::new(EngineConfig::default(), SCREEN).unwrap();
        fling(&mut engine, Vec2::new(50.0, 20.0), Vec2::new(300.0, 0.0));
        run(&mut engine, 0.5);

        assert_eq!(engine.pan(), Vec2::new(50.0, 20.0));
        assert_eq!(engine.drain_effects().count(), 0);
        assert!(engine.frame().is_empty());
    }

    #[test]
    fn appended_page_keeps_existing_layout() {
        let mut engine = engine(30);
        let before: Vec<_> = engine
            .grid()
            .iter()
            .map(|i| (i.id(), i.coord(), i.position()))
            .collect();

        let added = engine
            .append_items((30..50).map(|i| (ItemId(i), format!("user {i}"))))
            .unwrap();
        assert_eq!(added, 20);

        let after: Vec<_> = engine
            .grid()
            .iter()
            .take(30)
            .map(|i| (i.id(), i.coord(), i.position()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn tap_centres_and_selects() {
        let mut engine = engine(30);
        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        engine.handle(GestureEvent::Tap { item: ItemId(8) }).unwrap();
        run(&mut engine, 5.0);

        assert_eq!(engine.focused(), Some(ItemId(8)));
        assert!(engine.selection().contains(ItemId(5)));
        assert!(engine.selection().contains(ItemId(8)));

        let mut selected = Vec::new();
        let mut source = || {};
        let mut sink = |item: ItemId| selected.push(item);
        engine.dispatch(&mut source, &mut sink);
        assert_eq!(selected, vec![ItemId(5), ItemId(8)]);
    }

    #[test]
    fn second_tap_deselects_without_notifying() {
        let mut engine = engine(30);
        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        assert!(!engine.selection().contains(ItemId(5)));

        let effects: Vec<_> = engine.drain_effects().collect();
        let taps: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::ItemTapped { item, selected } => Some((*item, *selected)),
                _ => None,
            })
            .collect();
        assert_eq!(taps, vec![(ItemId(5), true), (ItemId(5), false)]);

        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        let mut notified = Vec::new();
        let mut source = || {};
        let mut sink = |item: ItemId| notified.push(item);
        engine.dispatch(&mut source, &mut sink);
        assert_eq!(notified, vec![ItemId(5)]);
    }

    #[test]
    fn infinite_release_velocity_is_rejected() {
        let mut engine = engine(7);
        engine.handle(GestureEvent::PanBegin).unwrap();
        let err = engine
            .handle(GestureEvent::PanEnd {
                velocity: Vec2::new(f32::INFINITY, 0.0),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        for _ in 0..600 {
            engine.tick(FRAME);
        }
        assert_ne!(engine.state(), GestureState::Snapping);
        assert!(engine.pan().is_finite());
        assert_eq!(engine.drain_effects().count(), 0);

        // The drag is still live; a sane release finishes it.
        engine
            .handle(GestureEvent::PanEnd { velocity: Vec2::ZERO })
            .unwrap();
        run(&mut engine, 5.0);
        assert!(engine.is_at_rest());
        assert_eq!(engine.focused(), Some(ItemId(0)));
    }

    #[test]
    fn nan_translation_is_rejected() {
        let mut engine = engine(7);
        engine.handle(GestureEvent::PanBegin).unwrap();
        engine
            .handle(GestureEvent::PanUpdate {
                translation: Vec2::new(-40.0, 0.0),
            })
            .unwrap();
        let err = engine
            .handle(GestureEvent::PanUpdate {
                translation: Vec2::new(f32::NAN, 3.0),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(engine.pan(), Vec2::new(-40.0, 0.0));
        assert_eq!(engine.state(), GestureState::Dragging);
    }

    #[test]
    fn single_policy_keeps_one_selected() {
        let mut engine = engine(30).with_tap_policy(TapPolicy::Single);
        engine.handle(GestureEvent::Tap { item: ItemId(5) }).unwrap();
        engine.handle(GestureEvent::Tap { item: ItemId(8) }).unwrap();
        assert_eq!(engine.selection().iter().collect::<Vec<_>>(), vec![ItemId(8)]);
    }

    #[test]
    fn selection_does_not_move_pan_without_tap() {
        let mut engine = engine(30);
        engine.selection_mut().toggle(ItemId(12));
        run(&mut engine, 0.5);
        assert_eq!(engine.pan(), Vec2::ZERO);
    }

    #[test]
    fn tap_on_unknown_item_fails() {
        let mut engine = engine(3);
        let err = engine.handle(GestureEvent::Tap { item: ItemId(99) }).unwrap_err();
        assert!(matches!(err, Error::UnknownItem(ItemId(99))));
    }

    #[test]
    fn dismiss_removes_only_that_item() {
        let mut engine = engine(30);
        engine.selection_mut().select(ItemId(4));
        let coords: Vec<_> = engine
            .grid()
            .iter()
            .filter(|i| i.id() != ItemId(4))
            .map(|i| (i.id(), i.coord()))
            .collect();

        let removed = engine.remove_item(ItemId(4)).unwrap();
        assert_eq!(removed.payload(), "user 4");
        assert!(!engine.selection().contains(ItemId(4)));

        let remaining: Vec<_> = engine.grid().iter().map(|i| (i.id(), i.coord())).collect();
        assert_eq!(coords, remaining);
        assert!(engine.remove_item(ItemId(4)).is_none());
    }

    #[test]
    fn render_draws_back_to_front() {
        let mut engine = engine(60);
        engine.tick(FRAME);

        let mut recorder = Recorder::default();
        engine.render(&mut recorder);
        assert_eq!(recorder.drawn.len(), engine.frame().len());
        assert!(recorder.drawn.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(recorder.drawn.last().unwrap().0, ItemId(0));
    }

    #[test]
    fn long_press_scales_rendered_items() {
        let mut engine = engine(7);
        engine.handle(GestureEvent::PressBegin).unwrap();
        run(&mut engine, 3.0);
        assert_eq!(engine.canvas_scale(), 0.5);
        let centre = engine.frame().iter().find(|s| s.id == ItemId(0)).unwrap();
        assert_eq!(centre.scale, 0.9);
        assert_eq!(engine.pan(), Vec2::ZERO);

        engine.handle(GestureEvent::PressEnd).unwrap();
        run(&mut engine, 5.0);
        assert_eq!(engine.canvas_scale(), 1.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut engine = engine(30);
        engine.handle(GestureEvent::Tap { item: ItemId(3) }).unwrap();
        engine.reset();

        assert!(engine.grid().is_empty());
        assert!(engine.selection().is_empty());
        assert_eq!(engine.pan(), Vec2::ZERO);
        assert_eq!(engine.drain_effects().count(), 0);
        assert_eq!(engine.grid().next_slot().0, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            hex_size: -1.0,
            ..EngineConfig::default()
        };
        assert!(HoneycombEngine::<()>::new(config, SCREEN).is_err());
    }

    #[test]
    fn gesture_events_deserialize_from_tagged_json() {
        let event: GestureEvent =
            serde_json::from_str(r#"{ "type": "PanEnd", "velocity": [120.0, -40.0] }"#).unwrap();
        assert_eq!(
            event,
            GestureEvent::PanEnd {
                velocity: Vec2::new(120.0, -40.0)
            }
        );
    }
}
