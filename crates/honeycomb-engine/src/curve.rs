//! Clamped piecewise-linear interpolation.

use serde::{Deserialize, Serialize};

/// Three-breakpoint curve, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Input breakpoints, strictly ascending
    pub input: [f32; 3],
    /// Output value at each breakpoint
    pub output: [f32; 3],
}

impl Curve {
    pub const fn new(input: [f32; 3], output: [f32; 3]) -> Self {
        Self { input, output }
    }

    /// Evaluate the curve at `x`.
    ///
    /// Below the first breakpoint yields the first output, above the last
    /// yields the last output.
    pub fn sample(&self, x: f32) -> f32 {
        let [x0, x1, x2] = self.input;
        let [y0, y1, y2] = self.output;

        if x <= x0 {
            y0
        } else if x <= x1 {
            lerp(y0, y1, (x - x0) / (x1 - x0))
        } else if x <= x2 {
            lerp(y1, y2, (x - x1) / (x2 - x1))
        } else {
            y2
        }
    }

    /// True when the input breakpoints are strictly ascending and finite.
    pub fn is_well_formed(&self) -> bool {
        let [x0, x1, x2] = self.input;
        self.input.iter().chain(self.output.iter()).all(|v| v.is_finite()) && x0 < x1 && x1 < x2
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
