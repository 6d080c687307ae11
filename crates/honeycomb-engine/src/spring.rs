//! Damped spring animation.
//!
//! A spring pulls its value toward a target with force `-k·x - c·v` over a
//! mass `m`. It is integrated with semi-implicit Euler in fixed sub-steps so
//! large frame deltas stay stable, and it settles once both displacement and
//! speed drop under the configured thresholds. On settle the value is pinned
//! exactly to the target.

use std::ops::{Add, Mul, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Largest integration step in seconds.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Spring tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub damping: f32,
    pub stiffness: f32,
    pub mass: f32,
    /// Settled when |target - value| is below this
    pub rest_displacement: f32,
    /// Settled when |velocity| is below this
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Pan snap after a drag release.
    pub const SNAP: Self = Self::new(18.0, 90.0);
    /// Pan snap after tapping an item.
    pub const TAP: Self = Self::new(18.0, 100.0);
    /// Per-item proximity scale.
    pub const ITEM_SCALE: Self = Self::new(20.0, 90.0).with_rest(0.001, 0.01);
    /// Canvas zoom-out while long-pressing.
    pub const ZOOM_PRESS: Self = Self::new(20.0, 150.0).with_rest(0.001, 0.01);
    /// Canvas zoom back to 1x on release.
    pub const ZOOM_RELEASE: Self = Self::new(10.0, 100.0).with_rest(0.001, 0.01);

    pub const fn new(damping: f32, stiffness: f32) -> Self {
        Self {
            damping,
            stiffness,
            mass: 1.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }

    pub const fn with_rest(self, rest_displacement: f32, rest_speed: f32) -> Self {
        Self {
            rest_displacement,
            rest_speed,
            ..self
        }
    }

    /// Reason this config is unusable, if any.
    pub fn problem(&self) -> Option<&'static str> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            Some("stiffness must be positive")
        } else if !(self.mass.is_finite() && self.mass > 0.0) {
            Some("mass must be positive")
        } else if !(self.damping.is_finite() && self.damping >= 0.0) {
            Some("damping must be non-negative")
        } else if !(self.rest_displacement >= 0.0 && self.rest_speed >= 0.0) {
            Some("rest thresholds must be non-negative")
        } else {
            None
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(10.0, 100.0)
    }
}

/// A value a spring can drive.
pub trait Animatable:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;

    fn magnitude(self) -> f32;
}

impl Animatable for f32 {
    const ZERO: Self = 0.0;

    fn magnitude(self) -> f32 {
        self.abs()
    }
}

impl Animatable for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn magnitude(self) -> f32 {
        self.length()
    }
}

/// A spring-driven value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring<V: Animatable> {
    value: V,
    velocity: V,
    target: V,
    config: SpringConfig,
    settled: bool,
}

impl<V: Animatable> Spring<V> {
    /// A spring resting at `value`.
    pub fn new(value: V) -> Self {
        Self {
            value,
            velocity: V::ZERO,
            target: value,
            config: SpringConfig::default(),
            settled: true,
        }
    }

    pub fn value(&self) -> V {
        self.value
    }

    pub fn velocity(&self) -> V {
        self.velocity
    }

    pub fn target(&self) -> V {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Start animating toward `target`.
    ///
    /// `velocity` seeds the animation; `None` keeps the current velocity.
    pub fn animate_to(&mut self, target: V, config: SpringConfig, velocity: Option<V>) {
        self.target = target;
        self.config = config;
        if let Some(v) = velocity {
            self.velocity = v;
        }
        self.settled = false;
    }

    /// Jump to `value` with no motion.
    pub fn set_immediate(&mut self, value: V) {
        self.value = value;
        self.target = value;
        self.velocity = V::ZERO;
        self.settled = true;
    }

    /// Cancel any animation, freezing the current value.
    pub fn stop(&mut self) {
        let value = self.value;
        self.set_immediate(value);
    }

    /// Advance by `dt` seconds. Returns true while still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.settled {
            return false;
        }

        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0);
        let h = dt / steps;
        let SpringConfig {
            damping,
            stiffness,
            mass,
            ..
        } = self.config;

        for _ in 0..steps as u32 {
            let displacement = self.value - self.target;
            let accel = (displacement * -stiffness - self.velocity * damping) * (1.0 / mass);
            self.velocity = self.velocity + accel * h;
            self.value = self.value + self.velocity * h;
        }

        if (self.target - self.value).magnitude() < self.config.rest_displacement
            && self.velocity.magnitude() < self.config.rest_speed
        {
            let target = self.target;
            self.set_immediate(target);
        }

        !self.settled
    }
}

impl<V: Animatable> Default for Spring<V> {
    fn default() -> Self {
        Self::new(V::ZERO)
    }
}
