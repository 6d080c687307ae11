//! Scripted user input.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptStep {
    /// Drag by (dx, dy) over `duration_ms` and let go without momentum
    Drag { dx: f32, dy: f32, duration_ms: u64 },
    /// Drag by (dx, dy) over `duration_ms` and let go at that speed
    Fling { dx: f32, dy: f32, duration_ms: u64 },
    /// Tap an item by id
    Tap { item: u64 },
    /// Press and hold without moving
    LongPress { hold_ms: u64 },
    /// Do nothing while animations and loads run
    Wait { ms: u64 },
    /// Remove an item, as after a like or a pass
    Dismiss { item: u64 },
}

/// Parse a JSON array of steps.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

/// A short session that pans toward the edge, taps and dismisses.
pub fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Wait { ms: 200 },
        ScriptStep::Drag {
            dx: -80.0,
            dy: 0.0,
            duration_ms: 300,
        },
        ScriptStep::Wait { ms: 1000 },
        ScriptStep::Fling {
            dx: -200.0,
            dy: -120.0,
            duration_ms: 150,
        },
        ScriptStep::Wait { ms: 1000 },
        ScriptStep::Tap { item: 3 },
        ScriptStep::Wait { ms: 1000 },
        ScriptStep::LongPress { hold_ms: 800 },
        ScriptStep::Wait { ms: 1000 },
        ScriptStep::Dismiss { item: 3 },
        ScriptStep::Fling {
            dx: -400.0,
            dy: 250.0,
            duration_ms: 120,
        },
        ScriptStep::Wait { ms: 2500 },
    ]
}
