//! # Cuties Common
//!
//! Common types shared by every Creepy Cuties crate.
//!
//! This crate provides:
//! - Closed identifier enums (items, bosses, locations, stations, NPCs)
//! - Recipe identifiers
//! - Story flag identifiers
//! - Identifier parse errors
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;
