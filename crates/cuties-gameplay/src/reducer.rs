//! The state transition function.
//!
//! [`Reducer::reduce`] maps `(state, action)` to a new state. Inapplicable
//! actions come back as the same state plus one journal line explaining why;
//! ids the catalog does not know come back untouched.

use cuties_common::{BossId, ItemId, Location, RecipeId, StoryFlag};
use thiserror::Error;
use tracing::{debug, info};

use crate::action::Action;
use crate::catalog::{
    Catalog, Recipe, BONUS_BOSS, BONUS_KILL_THRESHOLD, RANK_ITEM, RANK_ITEM_NPC,
};
use crate::economy::EconomyError;
use crate::inventory::InventoryError;
use crate::journal::{now_millis, Timestamp};
use crate::query::{format_quantities, unlock_status, UnlockStatus};
use crate::state::GameState;

/// Why a craft could not be paid for.
#[derive(Debug, Error)]
enum PaymentError {
    #[error(transparent)]
    Funds(#[from] EconomyError),
    #[error(transparent)]
    Items(#[from] InventoryError),
}

/// Applies actions against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Reducer<'a> {
    catalog: &'a Catalog,
}

impl Reducer<'static> {
    /// Reducer over [`Catalog::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }
}

impl<'a> Reducer<'a> {
    /// Creates a reducer over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// The tables this reducer reads.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Applies `action`, stamping any journal entries with the current time.
    #[must_use]
    pub fn reduce(&self, state: &GameState, action: &Action) -> GameState {
        self.reduce_at(state, action, now_millis())
    }

    /// Applies `action` with an explicit journal timestamp.
    #[must_use]
    pub fn reduce_at(&self, state: &GameState, action: &Action, timestamp: Timestamp) -> GameState {
        debug!("Reducing {}", action);
        match action {
            Action::Navigate { location } => navigate(state, *location, timestamp),
            Action::FightBoss { boss } => self.fight_boss(state, *boss, timestamp),
            Action::Craft { recipe } => self.craft(state, recipe, timestamp),
            Action::Decompose { item } => self.decompose(state, *item, timestamp),
            Action::Reset => GameState::reset_at(timestamp),
        }
    }

    fn fight_boss(&self, state: &GameState, boss_id: BossId, timestamp: Timestamp) -> GameState {
        let Some(boss) = self.catalog.boss(boss_id) else {
            debug!("Ignoring fight against unknown boss {boss_id}");
            return state.clone();
        };

        if let UnlockStatus::Locked { requires } = unlock_status(state, boss) {
            debug!("{} is locked behind {}", boss.name, requires);
            return state.with_log(
                timestamp,
                format!(
                    "Can't fight {}. Defeat {} first.",
                    boss.name,
                    self.catalog.boss_name(requires)
                ),
            );
        }

        let mut next = state.clone();
        next.wallet.earn(boss.coin_reward);
        for &(item, quantity) in &boss.drops {
            next.inventory.add(item, quantity);
        }
        let kills = next.boss_kills.entry(boss.id).or_insert(0);
        *kills = kills.saturating_add(1);
        let kills = *kills;

        if boss.id == BONUS_BOSS
            && kills >= BONUS_KILL_THRESHOLD
            && next.story_flags.insert(StoryFlag::DiseaseSecondKillBonus)
        {
            next.inventory.add(RANK_ITEM, 1);
            next.relationships.adjust(RANK_ITEM_NPC, 1);
            info!("{} bonus granted: {}", boss.name, RANK_ITEM);
            next.log.record(
                timestamp,
                format!(
                    "Defeated {} again \u{2192} gained NPC Rank Item: {}. {} relationship +1.",
                    boss.name, RANK_ITEM, RANK_ITEM_NPC
                ),
            );
        }

        debug!("Won vs {} (kill #{kills})", boss.name);
        next.log.record(
            timestamp,
            format!(
                "Won vs {}. +{} coins. Drops: {}.",
                boss.name,
                boss.coin_reward,
                format_quantities(&boss.drops)
            ),
        );
        next
    }

    fn craft(&self, state: &GameState, recipe_id: &RecipeId, timestamp: Timestamp) -> GameState {
        let Some(recipe) = self.catalog.recipe(recipe_id) else {
            debug!("Ignoring unknown recipe {recipe_id}");
            return state.clone();
        };

        if state.location != recipe.station.location() {
            debug!("{} needs {}, player is at {}", recipe.id, recipe.station, state.location);
            return state.with_log(
                timestamp,
                format!("Can't craft here. Go to {}.", recipe.station),
            );
        }

        let mut next = state.clone();
        if let Err(e) = pay_for(&mut next, recipe) {
            debug!("Cannot craft {}: {e}", recipe.id);
            return state.with_log(timestamp, format!("Missing requirements for {}.", recipe.name));
        }

        let had_before = next.inventory.count(recipe.produces);
        next.inventory.add(recipe.produces, recipe.output_quantity);

        if recipe.produces == RANK_ITEM && had_before == 0 {
            next.relationships.adjust(RANK_ITEM_NPC, 1);
            info!("Rank item crafted: {}", RANK_ITEM);
            next.log.record(
                timestamp,
                format!(
                    "Crafted NPC Rank Item: {}. {} relationship +1.",
                    RANK_ITEM, RANK_ITEM_NPC
                ),
            );
        }

        debug!("Crafted {} x{}", recipe.produces, recipe.output_quantity);
        next.log.record(
            timestamp,
            format!("Crafted {} (cost: {} coins).", recipe.produces, recipe.coin_cost),
        );
        next
    }

    fn decompose(&self, state: &GameState, item: ItemId, timestamp: Timestamp) -> GameState {
        let Some(recipe) = self.catalog.decomposition_for(item) else {
            return state.with_log(
                timestamp,
                format!("Can't decompose {item}. No decomposition recipe defined."),
            );
        };

        if state.location.station().is_none() {
            return state.with_log(
                timestamp,
                format!(
                    "Decomposition is only available in {} or {}.",
                    Location::SarahsLab,
                    Location::SamsWeaponry
                ),
            );
        }

        let mut next = state.clone();
        if next.inventory.remove(item, 1).is_err() {
            return state.with_log(timestamp, format!("You don't have {item} to decompose."));
        }
        for &(ingredient, quantity) in &recipe.requires {
            next.inventory.add(ingredient, quantity);
        }

        let returned = if recipe.requires.is_empty() {
            "(nothing)".to_string()
        } else {
            format_quantities(&recipe.requires)
        };
        debug!("Decomposed {item} via {}", recipe.id);
        next.log.record(
            timestamp,
            format!("Decomposed {item} \u{2192} returned: {returned}. (Coins not returned)"),
        );
        next
    }
}

fn navigate(state: &GameState, location: Location, timestamp: Timestamp) -> GameState {
    let mut next = state.with_log(timestamp, format!("Moved to {location}."));
    next.location = location;
    next
}

/// Deducts the coin cost and ingredients from `state`. Leaves `state` partly
/// paid on error, so callers must discard it.
fn pay_for(state: &mut GameState, recipe: &Recipe) -> Result<(), PaymentError> {
    state.inventory.check_all(&recipe.requires)?;
    state.wallet.spend(recipe.coin_cost)?;
    for &(item, quantity) in &recipe.requires {
        state.inventory.remove(item, quantity)?;
    }
    Ok(())
}

/// Applies `action` with [`Reducer::standard`].
#[must_use]
pub fn reduce(state: &GameState, action: &Action) -> GameState {
    Reducer::standard().reduce(state, action)
}
