//! Identifier types for items, bosses, recipes, places and characters.
//!
//! The item, boss, location and NPC catalogs are fixed, so they are closed
//! enums. Recipes are keyed by string ids because the catalog names them that
//! way and lookups of ids the catalog does not contain must stay possible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseIdError, ParseIdResult};

/// Lowercases and strips punctuation so "Wound's Feet", "wounds-feet" and
/// "WOUNDS_FEET" compare equal.
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// An item from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    /// Wound's Feet, dropped by Wound or bought from Sarah
    WoundFeet,
    /// Toxic's Tongue
    ToxicTongue,
    /// Shiver's Wing
    ShiverWing,
    /// Fever's Fang
    FeverFang,
    /// Disease's Horn
    DiseaseHorn,
    /// Wooden Pole, the NPC rank item
    WoodenPole,
    /// Spear
    Spear,
    /// Axe
    Axe,
    /// Helbard
    Helbard,
}

impl ItemId {
    /// Every item in catalog order.
    pub const ALL: [Self; 9] = [
        Self::WoundFeet,
        Self::ToxicTongue,
        Self::ShiverWing,
        Self::FeverFang,
        Self::DiseaseHorn,
        Self::WoodenPole,
        Self::Spear,
        Self::Axe,
        Self::Helbard,
    ];

    /// Display name used in logs and listings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WoundFeet => "Wound's Feet",
            Self::ToxicTongue => "Toxic's Tongue",
            Self::ShiverWing => "Shiver's Wing",
            Self::FeverFang => "Fever's Fang",
            Self::DiseaseHorn => "Disease's Horn",
            Self::WoodenPole => "Wooden Pole",
            Self::Spear => "Spear",
            Self::Axe => "Axe",
            Self::Helbard => "Helbard",
        }
    }

    /// Machine-friendly slug, identical to the serialized form.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::WoundFeet => "wound_feet",
            Self::ToxicTongue => "toxic_tongue",
            Self::ShiverWing => "shiver_wing",
            Self::FeverFang => "fever_fang",
            Self::DiseaseHorn => "disease_horn",
            Self::WoodenPole => "wooden_pole",
            Self::Spear => "spear",
            Self::Axe => "axe",
            Self::Helbard => "helbard",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemId {
    type Err = ParseIdError;

    /// Accepts either the display name or the slug, ignoring case and apostrophes.
    fn from_str(s: &str) -> ParseIdResult<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|item| normalize(item.name()) == wanted || item.slug() == wanted)
            .ok_or_else(|| ParseIdError::UnknownItem(s.trim().to_string()))
    }
}

/// A boss in the unlock chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossId {
    /// Wound, the first boss
    Wound,
    /// Toxic
    Toxic,
    /// Shiver & Fever
    ShiverFever,
    /// Disease, the last boss
    Disease,
}

impl BossId {
    /// Every boss in chain order.
    pub const ALL: [Self; 4] = [Self::Wound, Self::Toxic, Self::ShiverFever, Self::Disease];

    /// Stable string id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wound => "wound",
            Self::Toxic => "toxic",
            Self::ShiverFever => "shiver_fever",
            Self::Disease => "disease",
        }
    }
}

impl fmt::Display for BossId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BossId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> ParseIdResult<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|boss| boss.as_str() == wanted)
            .ok_or_else(|| ParseIdError::UnknownBoss(s.trim().to_string()))
    }
}

/// Unique identifier for a recipe.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Creates a recipe ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A crafting station. Recipes are bound to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    /// Sarah's Lab: tokens and rank items
    SarahsLab,
    /// Sam's Weaponry: weapons
    SamsWeaponry,
}

impl Station {
    /// Both stations.
    pub const ALL: [Self; 2] = [Self::SarahsLab, Self::SamsWeaponry];

    /// The location the station sits at.
    #[must_use]
    pub const fn location(self) -> Location {
        match self {
            Self::SarahsLab => Location::SarahsLab,
            Self::SamsWeaponry => Location::SamsWeaponry,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.location().name()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A place the player can stand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The Boss Arena
    #[default]
    Arena,
    /// Sarah's Lab
    SarahsLab,
    /// Sam's Weaponry
    SamsWeaponry,
}

impl Location {
    /// Every location in navigation order.
    pub const ALL: [Self; 3] = [Self::Arena, Self::SarahsLab, Self::SamsWeaponry];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arena => "Boss Arena",
            Self::SarahsLab => "Sarah's Lab",
            Self::SamsWeaponry => "Sam's Weaponry",
        }
    }

    /// The crafting station here, if any.
    #[must_use]
    pub const fn station(self) -> Option<Station> {
        match self {
            Self::Arena => None,
            Self::SarahsLab => Some(Station::SarahsLab),
            Self::SamsWeaponry => Some(Station::SamsWeaponry),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Location {
    type Err = ParseIdError;

    fn from_str(s: &str) -> ParseIdResult<Self> {
        match normalize(s).as_str() {
            "arena" | "boss_arena" => Ok(Self::Arena),
            "sarah" | "lab" | "sarahs_lab" => Ok(Self::SarahsLab),
            "sam" | "weaponry" | "sams_weaponry" => Ok(Self::SamsWeaponry),
            _ => Err(ParseIdError::UnknownLocation(s.trim().to_string())),
        }
    }
}

/// A character the player builds a relationship with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Npc {
    /// Sarah, who runs the lab
    Sarah,
    /// Sam, who runs the weaponry
    Sam,
}

impl Npc {
    /// Every NPC.
    pub const ALL: [Self; 2] = [Self::Sarah, Self::Sam];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sarah => "Sarah",
            Self::Sam => "Sam",
        }
    }
}

impl fmt::Display for Npc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One-shot narrative triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryFlag {
    /// The second Disease kill already granted its Wooden Pole
    DiseaseSecondKillBonus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_parse_accepts_name_and_slug() {
        assert_eq!("Wound's Feet".parse::<ItemId>(), Ok(ItemId::WoundFeet));
        assert_eq!("wound_feet".parse::<ItemId>(), Ok(ItemId::WoundFeet));
        assert_eq!("DISEASE\u{2019}S HORN".parse::<ItemId>(), Ok(ItemId::DiseaseHorn));
        assert_eq!("wooden-pole".parse::<ItemId>(), Ok(ItemId::WoodenPole));
    }

    #[test]
    fn test_item_parse_unknown() {
        assert_eq!(
            "Golden Apple".parse::<ItemId>(),
            Err(ParseIdError::UnknownItem("Golden Apple".to_string()))
        );
    }

    #[test]
    fn test_item_slug_matches_serde() {
        for item in ItemId::ALL {
            let json = serde_json::to_string(&item).expect("serialize item");
            assert_eq!(json, format!("\"{}\"", item.slug()));
        }
    }

    #[test]
    fn test_boss_parse() {
        assert_eq!("shiver_fever".parse::<BossId>(), Ok(BossId::ShiverFever));
        assert_eq!("Shiver-Fever".parse::<BossId>(), Ok(BossId::ShiverFever));
        assert!("dragon".parse::<BossId>().is_err());
    }

    #[test]
    fn test_location_parse_aliases() {
        assert_eq!("sarah".parse::<Location>(), Ok(Location::SarahsLab));
        assert_eq!("Sam's Weaponry".parse::<Location>(), Ok(Location::SamsWeaponry));
        assert_eq!("Boss Arena".parse::<Location>(), Ok(Location::Arena));
        assert!("tavern".parse::<Location>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Location::SarahsLab.to_string(), "Sarah's Lab");
        assert_eq!(Station::SamsWeaponry.to_string(), "Sam's Weaponry");
        assert_eq!(ItemId::WoodenPole.to_string(), "Wooden Pole");
        assert_eq!(Npc::Sarah.to_string(), "Sarah");
    }
}
