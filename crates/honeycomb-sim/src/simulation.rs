//! Scripted session driver with event recording.
//!
//! Runs the engine at a fixed 60 Hz frame rate against the simulated feed.
//! Every frame drains delivered pages into the grid, advances animations,
//! then acts on the engine's queued effects.

use std::time::Duration;

use glam::Vec2;
use honeycomb_engine::{Effect, Error as EngineError, GestureEvent, HoneycombEngine, ItemId};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::error::Result;
use crate::events::{SessionEvent, SessionReport};
use crate::feed::{FeedLoader, PageReceiver};
use crate::profile::Profile;
use crate::script::ScriptStep;

/// Frame interval.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Longest the session keeps running after the script to let things settle.
const SETTLE_LIMIT: Duration = Duration::from_secs(10);

fn frames_for(ms: u64) -> u64 {
    (ms as f64 / (FRAME.as_secs_f64() * 1000.0)).round() as u64
}

/// A running session.
pub struct Simulation {
    engine: HoneycombEngine<Profile>,
    feed: FeedLoader,
    pages: PageReceiver,
    events: Vec<SessionEvent>,
    frame: u64,
    zoom_active: bool,
}

impl Simulation {
    /// Load the first page and lay out the grid.
    pub async fn start(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let (mut feed, pages) = FeedLoader::new(config.feed.clone());
        let initial = feed.fetch_initial().await;

        let engine = HoneycombEngine::with_items(
            config.engine,
            config.viewport,
            initial.into_iter().map(|profile| (profile.id, profile)),
        )?
        .with_tap_policy(config.tap_policy);

        let mut sim = Self {
            engine,
            feed,
            pages,
            events: Vec::new(),
            frame: 0,
            zoom_active: false,
        };
        sim.record(SessionEvent::GridReady {
            items: sim.engine.grid().len(),
            viewport: config.viewport,
            frame: 0,
        });
        info!(items = sim.engine.grid().len(), "session started");
        Ok(sim)
    }

    pub fn engine(&self) -> &HoneycombEngine<Profile> {
        &self.engine
    }

    pub fn feed(&self) -> &FeedLoader {
        &self.feed
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Play every step, then run until animations and loads finish.
    pub async fn run(&mut self, script: &[ScriptStep]) -> Result<SessionReport> {
        for step in script {
            debug!(?step, frame = self.frame, "script step");
            self.apply(step).await?;
        }
        self.settle().await;
        Ok(self.report())
    }

    /// Play one step.
    pub async fn apply(&mut self, step: &ScriptStep) -> Result<()> {
        match *step {
            ScriptStep::Drag { dx, dy, duration_ms } => {
                self.drag(Vec2::new(dx, dy), duration_ms, false).await?
            }
            ScriptStep::Fling { dx, dy, duration_ms } => {
                self.drag(Vec2::new(dx, dy), duration_ms, true).await?
            }
            ScriptStep::Tap { item } => {
                match self.engine.handle(GestureEvent::Tap { item: ItemId(item) }) {
                    Ok(()) => {}
                    Err(EngineError::UnknownItem(id)) => warn!(%id, "tap on missing item skipped"),
                    Err(err) => return Err(err.into()),
                }
                self.step().await;
            }
            ScriptStep::LongPress { hold_ms } => {
                self.engine.handle(GestureEvent::PressBegin)?;
                self.wait(hold_ms).await;
                self.engine.handle(GestureEvent::PressEnd)?;
                self.step().await;
            }
            ScriptStep::Wait { ms } => self.wait(ms).await,
            ScriptStep::Dismiss { item } => {
                let id = ItemId(item);
                if self.engine.remove_item(id).is_some() {
                    self.record(SessionEvent::Dismissed {
                        item: id,
                        frame: self.frame,
                    });
                }
                self.step().await;
            }
        }
        Ok(())
    }

    async fn drag(&mut self, delta: Vec2, duration_ms: u64, fling: bool) -> Result<()> {
        let frames = frames_for(duration_ms).max(1);

        self.engine.handle(GestureEvent::PressBegin)?;
        self.engine.handle(GestureEvent::PanBegin)?;
        for i in 1..=frames {
            let translation = delta * (i as f32 / frames as f32);
            self.engine.handle(GestureEvent::PanUpdate { translation })?;
            self.step().await;
        }

        let velocity = if fling {
            delta / (duration_ms.max(1) as f32 / 1000.0)
        } else {
            Vec2::ZERO
        };
        self.engine.handle(GestureEvent::PanEnd { velocity })?;
        self.engine.handle(GestureEvent::PressEnd)?;
        self.step().await;
        Ok(())
    }

    async fn wait(&mut self, ms: u64) {
        for _ in 0..frames_for(ms) {
            self.step().await;
        }
    }

    async fn settle(&mut self) {
        let limit = frames_for(SETTLE_LIMIT.as_millis() as u64);
        for _ in 0..limit {
            self.step().await;
            if self.engine.is_at_rest() && !self.feed.is_loading() {
                // One more frame picks up a page sent just before the flag cleared.
                self.step().await;
                return;
            }
        }
        warn!(frames = limit, "session still moving at settle limit");
    }

    /// Advance one frame.
    pub async fn step(&mut self) {
        tokio::time::sleep(FRAME).await;
        self.frame += 1;

        while let Ok(page) = self.pages.try_recv() {
            let count = page.len();
            match self
                .engine
                .append_items(page.into_iter().map(|profile| (profile.id, profile)))
            {
                Ok(_) => self.record(SessionEvent::PageLoaded {
                    count,
                    total: self.engine.grid().len(),
                    frame: self.frame,
                }),
                Err(err) => warn!(%err, "page rejected"),
            }
        }

        self.engine.tick(FRAME.as_secs_f32());

        let zoom_active = self.engine.zoom_active();
        if zoom_active != self.zoom_active {
            self.zoom_active = zoom_active;
            self.record(SessionEvent::ZoomChanged {
                active: zoom_active,
                frame: self.frame,
            });
        }

        let effects: Vec<Effect> = self.engine.drain_effects().collect();
        for effect in effects {
            self.on_effect(effect);
        }
    }

    fn on_effect(&mut self, effect: Effect) {
        let frame = self.frame;
        let event = match effect {
            Effect::LoadMore => SessionEvent::LoadRequested {
                started: self.feed.request_page(),
                frame,
            },
            Effect::ItemTapped { item, selected } => SessionEvent::Selected {
                item,
                selected,
                frame,
            },
            Effect::SnapStarted { target } => {
                let Some(coord) = self.engine.grid().get(target.item).map(|i| i.coord()) else {
                    return;
                };
                SessionEvent::SnapStarted {
                    item: target.item,
                    coord,
                    predicted: target.predicted,
                    frame,
                }
            }
            Effect::Settled { item } => {
                let Some(coord) = self.engine.grid().get(item).map(|i| i.coord()) else {
                    return;
                };
                SessionEvent::Settled {
                    item,
                    coord,
                    pan: self.engine.pan(),
                    frame,
                }
            }
        };
        self.record(event);
    }

    fn record(&mut self, event: SessionEvent) {
        debug!(event = event.name(), frame = event.frame(), "session event");
        self.events.push(event);
    }

    /// Snapshot of the session so far.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            frames: self.frame,
            items: self.engine.grid().len(),
            load_requests: self.feed.requests(),
            focused: self.engine.focused(),
            pan: self.engine.pan(),
            selection: self.engine.selection().iter().collect(),
            events: self.events.clone(),
        }
    }
}
