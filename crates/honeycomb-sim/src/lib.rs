//! Honeycomb Session Simulator
//!
//! Drives a honeycomb engine through scripted gestures against a simulated,
//! paged profile feed, recording what happens for inspection.
//!
//! # Architecture
//!
//! - **Feed**: async paged loader with simulated latency and failures
//! - **Script**: drags, flings, taps, long presses and dismissals as JSON
//! - **Simulation**: 60 Hz frame loop feeding gestures and pages to the engine
//! - **Events**: a timeline of snaps, loads and selections, tagged for JSON
//!
//! # Usage
//!
//! ```ignore
//! let mut sim = Simulation::start(SimConfig::from_env()?).await?;
//! let report = sim.run(&default_script()).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod config;
mod error;
mod events;
mod feed;
mod profile;
mod script;
mod simulation;

pub use config::{parse_viewport, FeedConfig, SimConfig};
pub use error::{Result, SimError};
pub use events::{SessionEvent, SessionReport};
pub use feed::{FeedLoader, PageReceiver};
pub use profile::{Profile, ProfileGenerator};
pub use script::{default_script, parse_script, ScriptStep};
pub use simulation::{Simulation, FRAME};
