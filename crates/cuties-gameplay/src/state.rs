//! Central game state.
//!
//! [`GameState`] is the single source of truth for a run. It is never mutated
//! in place by callers: every action goes through the reducer, which returns a
//! fresh value and leaves the previous one untouched.

use cuties_common::{BossId, ItemId, Location, Npc, StoryFlag};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::economy::Wallet;
use crate::inventory::Inventory;
use crate::journal::{now_millis, Journal, Timestamp};
use crate::relationship::Relationships;

/// Coins held at the start of a run.
pub const STARTING_COINS: u64 = 250;

/// First journal line of a new run.
pub const RUN_STARTED_MESSAGE: &str = "Run started. Wound is available in the Boss Arena.";

/// Only journal line after a reset.
pub const RESET_MESSAGE: &str = "State reset.";

/// Snapshot of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) location: Location,
    pub(crate) wallet: Wallet,
    pub(crate) inventory: Inventory,
    pub(crate) boss_kills: BTreeMap<BossId, u32>,
    pub(crate) story_flags: BTreeSet<StoryFlag>,
    pub(crate) relationships: Relationships,
    pub(crate) log: Journal,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates the starting state, stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::new_at(now_millis())
    }

    /// Creates the starting state with an explicit timestamp.
    #[must_use]
    pub fn new_at(timestamp: Timestamp) -> Self {
        Self::fresh(Journal::with_entry(timestamp, RUN_STARTED_MESSAGE))
    }

    /// Creates the state a reset produces.
    #[must_use]
    pub fn reset_at(timestamp: Timestamp) -> Self {
        Self::fresh(Journal::with_entry(timestamp, RESET_MESSAGE))
    }

    fn fresh(log: Journal) -> Self {
        Self {
            location: Location::Arena,
            wallet: Wallet::new(STARTING_COINS),
            inventory: Inventory::new(),
            boss_kills: BossId::ALL.into_iter().map(|boss| (boss, 0)).collect(),
            story_flags: BTreeSet::new(),
            relationships: Relationships::new(),
            log,
        }
    }

    /// Where the player stands.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Coin balance.
    #[must_use]
    pub const fn coins(&self) -> u64 {
        self.wallet.balance()
    }

    /// Held items.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Shorthand for `inventory().count(item)`.
    #[must_use]
    pub fn item_count(&self, item: ItemId) -> u32 {
        self.inventory.count(item)
    }

    /// Times a boss has been defeated.
    #[must_use]
    pub fn kills(&self, boss: BossId) -> u32 {
        self.boss_kills.get(&boss).copied().unwrap_or(0)
    }

    /// Defeat counts for every boss.
    pub fn boss_kills(&self) -> impl Iterator<Item = (BossId, u32)> + '_ {
        self.boss_kills.iter().map(|(&boss, &kills)| (boss, kills))
    }

    /// Checks if a one-shot trigger has fired.
    #[must_use]
    pub fn has_flag(&self, flag: StoryFlag) -> bool {
        self.story_flags.contains(&flag)
    }

    /// Every trigger fired so far.
    pub fn story_flags(&self) -> impl Iterator<Item = StoryFlag> + '_ {
        self.story_flags.iter().copied()
    }

    /// NPC relationships.
    #[must_use]
    pub const fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Relationship level with an NPC.
    #[must_use]
    pub fn relationship_level(&self, npc: Npc) -> u32 {
        self.relationships.level(npc)
    }

    /// Narrative log, newest first.
    #[must_use]
    pub const fn log(&self) -> &Journal {
        &self.log
    }

    /// Copy of this state with one more log entry and nothing else changed.
    pub(crate) fn with_log(&self, timestamp: Timestamp, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.log.record(timestamp, message);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let state = GameState::new_at(7);
        assert_eq!(state.location(), Location::Arena);
        assert_eq!(state.coins(), STARTING_COINS);
        assert!(state.inventory().is_empty());
        assert!(state.boss_kills().all(|(_, kills)| kills == 0));
        assert_eq!(state.boss_kills().count(), BossId::ALL.len());
        assert_eq!(state.story_flags().count(), 0);
        assert_eq!(state.relationship_level(Npc::Sarah), 0);
        assert_eq!(state.relationship_level(Npc::Sam), 0);
        assert_eq!(state.log().len(), 1);
        assert_eq!(
            state.log().latest().map(|e| (e.timestamp, e.message.as_str())),
            Some((7, RUN_STARTED_MESSAGE))
        );
    }

    #[test]
    fn test_reset_state_differs_only_in_log() {
        let started = GameState::new_at(1);
        let reset = GameState::reset_at(1);
        assert_eq!(reset.log().messages().collect::<Vec<_>>(), vec![RESET_MESSAGE]);
        assert_eq!(
            GameState {
                log: started.log.clone(),
                ..reset
            },
            started
        );
    }

    #[test]
    fn test_with_log_leaves_source_untouched() {
        let state = GameState::new_at(1);
        let next = state.with_log(2, "hello");
        assert_eq!(state.log().len(), 1);
        assert_eq!(next.log().len(), 2);
        assert_eq!(next.coins(), state.coins());
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new_at(1);
        let json = serde_json::to_string(&state).expect("serialize state");
        assert!(json.contains("\"location\":\"arena\""));
        assert!(json.contains("\"wallet\":250"));
        let back: GameState = serde_json::from_str(&json).expect("deserialize state");
        assert_eq!(back, state);
    }

    #[test]
    fn test_deserialize_rejects_broken_invariants() {
        let state = GameState::new_at(1);
        let mut value = serde_json::to_value(&state).expect("state to value");
        value["relationships"]["sarah"]["level"] = 9.into();
        assert!(serde_json::from_value::<GameState>(value).is_err());

        let mut value = serde_json::to_value(&state).expect("state to value");
        value["inventory"]["axe"] = 0.into();
        assert!(serde_json::from_value::<GameState>(value).is_err());
    }
}
