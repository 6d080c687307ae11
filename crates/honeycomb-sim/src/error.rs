//! Error types for honeycomb-sim.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while setting up or running a session.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine error: {0}")]
    Engine(#[from] honeycomb_engine::Error),

    #[error("script or config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },
}
