//! # Cuties Gameplay
//!
//! The crafting and progression core of Creepy Cuties.
//!
//! This crate provides:
//! - Domain tables (bosses, recipes, decomposition index)
//! - Inventory, coin wallet and NPC relationships
//! - The narrative journal
//! - The immutable game state and the actions that change it
//! - The reducer: navigation, boss fights, crafting, decomposition, reset
//! - Read-only query helpers for views
//! - Sessions that own the live state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod action;
pub mod catalog;
pub mod economy;
pub mod inventory;
pub mod journal;
pub mod query;
pub mod reducer;
pub mod relationship;
pub mod session;
pub mod state;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::*;
    pub use crate::catalog::*;
    pub use crate::economy::*;
    pub use crate::inventory::*;
    pub use crate::journal::*;
    pub use crate::query::*;
    pub use crate::reducer::*;
    pub use crate::relationship::*;
    pub use crate::session::*;
    pub use crate::state::*;
    pub use cuties_common::prelude::*;
}

pub use prelude::*;
