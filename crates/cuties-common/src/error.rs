//! Error types shared across Creepy Cuties crates.

use thiserror::Error;

/// Failure to resolve a textual identifier against one of the closed catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    /// No item has this name or slug
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    /// No boss has this id
    #[error("Unknown boss: {0}")]
    UnknownBoss(String),
    /// No location has this name
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
}

/// Result type alias for identifier parsing.
pub type ParseIdResult<T> = Result<T, ParseIdError>;
