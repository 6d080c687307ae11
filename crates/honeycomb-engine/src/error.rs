//! Error types for honeycomb-engine.

use thiserror::Error;

use crate::grid::ItemId;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An item with this id is already on the grid.
    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),

    /// A gesture carried a vector the engine cannot animate.
    #[error("invalid gesture input: {0}")]
    InvalidInput(String),

    /// No item with this id is on the grid.
    #[error("unknown item id {0}")]
    UnknownItem(ItemId),
}
