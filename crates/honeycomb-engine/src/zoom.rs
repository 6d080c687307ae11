//! Long-press canvas zoom.
//!
//! Holding a press for the minimum duration without moving springs the whole
//! canvas down to the zoom scale; lifting springs it back to 1x. The canvas
//! scale is independent of the pan offset and multiplies each item's own
//! proximity scale.

use glam::Vec2;
use tracing::debug;

use crate::config::ZoomConfig;
use crate::spring::Spring;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Press {
    Idle,
    /// Held for `held` seconds, not yet long enough
    Pending { held: f32 },
    Active,
}

/// Canvas scale driven by a long-press recogniser.
#[derive(Debug, Clone)]
pub struct CanvasZoom {
    config: ZoomConfig,
    scale: Spring<f32>,
    press: Press,
}

impl CanvasZoom {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            scale: Spring::new(1.0),
            press: Press::Idle,
        }
    }

    /// Current canvas scale.
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// True while the long press is recognised and held.
    pub fn is_active(&self) -> bool {
        self.press == Press::Active
    }

    /// True when the canvas is at 1x and nothing is held.
    pub fn is_at_rest(&self) -> bool {
        self.press == Press::Idle && self.scale.is_settled()
    }

    /// Pointer went down.
    pub fn press_begin(&mut self) {
        if self.press == Press::Idle {
            self.press = Press::Pending { held: 0.0 };
        }
    }

    /// Pointer moved by `translation` since going down.
    ///
    /// Travelling too far before activation means this is a drag, not a
    /// long press.
    pub fn press_move(&mut self, translation: Vec2) {
        if matches!(self.press, Press::Pending { .. }) && translation.length() > self.config.max_travel {
            self.press = Press::Idle;
        }
    }

    /// Pointer lifted or the gesture was cancelled.
    pub fn press_end(&mut self) {
        if self.press == Press::Active {
            debug!("canvas zoom released");
            self.scale
                .animate_to(1.0, self.config.release_spring, None);
        }
        self.press = Press::Idle;
    }

    /// Advance timers and the scale spring.
    pub fn tick(&mut self, dt: f32) {
        if let Press::Pending { held } = self.press {
            let held = held + dt;
            if held * 1000.0 >= self.config.min_duration_ms as f32 {
                debug!(scale = self.config.scale, "canvas zoom engaged");
                self.press = Press::Active;
                self.scale
                    .animate_to(self.config.scale, self.config.press_spring, None);
            } else {
                self.press = Press::Pending { held };
            }
        }
        self.scale.tick(dt);
    }
}

impl Default for CanvasZoom {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
