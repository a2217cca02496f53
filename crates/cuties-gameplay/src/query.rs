//! Read-only helpers over a [`GameState`], shared by the reducer and views.

use cuties_common::{BossId, ItemId};
use serde::Serialize;

use crate::catalog::{Boss, Catalog, Recipe};
use crate::state::GameState;

/// Whether a boss can be fought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnlockStatus {
    /// The boss may be fought (or refought)
    Unlocked,
    /// The predecessor has not been defeated yet
    Locked {
        /// Boss to defeat first
        requires: BossId,
    },
}

impl UnlockStatus {
    /// Checks if the boss may be fought.
    #[must_use]
    pub const fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked)
    }

    /// Player-facing explanation for a locked boss.
    #[must_use]
    pub fn reason(self, catalog: &Catalog) -> Option<String> {
        match self {
            Self::Unlocked => None,
            Self::Locked { requires } => {
                Some(format!("Defeat {} first.", catalog.boss_name(requires)))
            },
        }
    }
}

/// A boss is unlocked when it has no predecessor or the predecessor has been
/// defeated at least once.
#[must_use]
pub fn unlock_status(state: &GameState, boss: &Boss) -> UnlockStatus {
    match boss.unlock_after {
        Some(requires) if state.kills(requires) == 0 => UnlockStatus::Locked { requires },
        _ => UnlockStatus::Unlocked,
    }
}

/// Checks coins and every ingredient. Does not consider the station.
#[must_use]
pub fn has_requirements(state: &GameState, recipe: &Recipe) -> bool {
    state.wallet.can_afford(recipe.coin_cost)
        && state.inventory().check_all(&recipe.requires).is_ok()
}

/// Defeat count as shown next to a boss.
#[must_use]
pub fn format_progress(kills: u32) -> String {
    match kills {
        0 => "Not fought".to_string(),
        n => format!("Defeated ({n}\u{d7})"),
    }
}

/// "Locked", or the defeat count for an unlocked boss.
#[must_use]
pub fn boss_status(state: &GameState, boss: &Boss) -> String {
    if unlock_status(state, boss).is_unlocked() {
        format_progress(state.kills(boss.id))
    } else {
        "Locked".to_string()
    }
}

/// `"A x1, B x2"` in the order given.
#[must_use]
pub fn format_quantities(entries: &[(ItemId, u32)]) -> String {
    entries
        .iter()
        .map(|(item, quantity)| format!("{item} x{quantity}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Story beat reached, keyed on the furthest boss defeated.
#[must_use]
pub fn narrative_stage(state: &GameState) -> &'static str {
    if state.kills(BossId::Disease) > 0 {
        "Act I \u{2192} Disease confronted"
    } else if state.kills(BossId::ShiverFever) > 0 {
        "Act I \u{2192} Cold & Fever faced"
    } else if state.kills(BossId::Toxic) > 0 {
        "Act I \u{2192} Toxicity revealed"
    } else if state.kills(BossId::Wound) > 0 {
        "Act I \u{2192} First wound opened"
    } else {
        "Act I \u{2192} The Arena calls"
    }
}

/// Held items sorted by display name.
#[must_use]
pub fn inventory_list(state: &GameState) -> Vec<(ItemId, u32)> {
    let mut items: Vec<_> = state.inventory().iter().collect();
    items.sort_by_key(|(item, _)| item.name());
    items
}

/// A held item that can be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposableEntry<'a> {
    /// Item held
    pub item: ItemId,
    /// How many are held
    pub quantity: u32,
    /// Recipe whose ingredients come back
    pub recipe: &'a Recipe,
}

/// Held items with a decomposition recipe, sorted by display name.
#[must_use]
pub fn decomposable_list<'a>(
    state: &GameState,
    catalog: &'a Catalog,
) -> Vec<DecomposableEntry<'a>> {
    inventory_list(state)
        .into_iter()
        .filter_map(|(item, quantity)| {
            catalog
                .decomposition_for(item)
                .map(|recipe| DecomposableEntry { item, quantity, recipe })
        })
        .collect()
}
