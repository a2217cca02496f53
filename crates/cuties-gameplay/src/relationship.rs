//! NPC relationship levels.

use cuties_common::Npc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Level cap every NPC starts with.
pub const DEFAULT_RELATIONSHIP_MAX: u32 = 7;

/// Stored relationship data that breaks the level bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationshipError {
    /// Level above the cap
    #[error("{npc} relationship level {level} exceeds max {max}")]
    LevelAboveMax {
        /// Who the relationship is with
        npc: Npc,
        /// Stored level
        level: u32,
        /// Stored cap
        max: u32,
    },
    /// Entry filed under another NPC
    #[error("Relationship with {found} stored under {key}")]
    WrongNpc {
        /// Map key
        key: Npc,
        /// NPC inside the entry
        found: Npc,
    },
}

#[derive(Deserialize)]
struct RelationshipRecord {
    npc: Npc,
    level: u32,
    max: u32,
}

/// Relationship with one NPC. `level` always stays within `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RelationshipRecord")]
pub struct Relationship {
    /// Who the relationship is with
    pub npc: Npc,
    level: u32,
    max: u32,
}

impl Relationship {
    /// Creates a relationship at level 0.
    #[must_use]
    pub const fn new(npc: Npc, max: u32) -> Self {
        Self { npc, level: 0, max }
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Level cap.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Checks if the level has reached the cap.
    #[must_use]
    pub const fn is_maxed(&self) -> bool {
        self.level >= self.max
    }

    /// Shifts the level by `delta`, clamped to `0..=max`. Returns the new level.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.level) + delta).clamp(0, i64::from(self.max));
        self.level = u32::try_from(next).unwrap_or(self.max);
        self.level
    }
}

impl TryFrom<RelationshipRecord> for Relationship {
    type Error = RelationshipError;

    fn try_from(record: RelationshipRecord) -> Result<Self, Self::Error> {
        let RelationshipRecord { npc, level, max } = record;
        if level > max {
            return Err(RelationshipError::LevelAboveMax { npc, level, max });
        }
        Ok(Self { npc, level, max })
    }
}

/// Relationships with every NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Npc, Relationship>",
    try_from = "BTreeMap<Npc, Relationship>"
)]
pub struct Relationships {
    entries: BTreeMap<Npc, Relationship>,
}

impl TryFrom<BTreeMap<Npc, Relationship>> for Relationships {
    type Error = RelationshipError;

    fn try_from(entries: BTreeMap<Npc, Relationship>) -> Result<Self, Self::Error> {
        if let Some((&key, rel)) = entries.iter().find(|(&key, rel)| key != rel.npc) {
            return Err(RelationshipError::WrongNpc {
                key,
                found: rel.npc,
            });
        }
        Ok(Self { entries })
    }
}

impl From<Relationships> for BTreeMap<Npc, Relationship> {
    fn from(relationships: Relationships) -> Self {
        relationships.entries
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

impl Relationships {
    /// Every NPC at level 0 with the default cap.
    #[must_use]
    pub fn new() -> Self {
        let entries = Npc::ALL
            .into_iter()
            .map(|npc| (npc, Relationship::new(npc, DEFAULT_RELATIONSHIP_MAX)))
            .collect();
        Self { entries }
    }

    /// Gets the relationship with an NPC.
    #[must_use]
    pub fn get(&self, npc: Npc) -> Option<&Relationship> {
        self.entries.get(&npc)
    }

    /// Gets the level with an NPC (0 if untracked).
    #[must_use]
    pub fn level(&self, npc: Npc) -> u32 {
        self.get(npc).map_or(0, Relationship::level)
    }

    /// Shifts the level with an NPC. Returns the new level, or `None` for an
    /// untracked NPC.
    pub fn adjust(&mut self, npc: Npc, delta: i64) -> Option<u32> {
        self.entries.get_mut(&npc).map(|rel| rel.adjust(delta))
    }

    /// Returns every tracked relationship.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.entries.values()
    }
}
