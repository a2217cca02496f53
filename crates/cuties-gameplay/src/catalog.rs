//! Domain tables: bosses, recipes and the decomposition index.
//!
//! The tables are assembled with builders and validated once when a
//! [`Catalog`] is constructed. After that they are read-only.

use cuties_common::{BossId, ItemId, Npc, RecipeId, Station};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Item whose first acquisition raises an NPC relationship.
pub const RANK_ITEM: ItemId = ItemId::WoodenPole;

/// NPC whose relationship the rank item raises.
pub const RANK_ITEM_NPC: Npc = Npc::Sarah;

/// Boss whose repeat victory grants the rank item once.
pub const BONUS_BOSS: BossId = BossId::Disease;

/// Kill count of [`BONUS_BOSS`] at which the rank item is granted.
pub const BONUS_KILL_THRESHOLD: u32 = 2;

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two bosses share an id
    #[error("Duplicate boss ID: {0}")]
    DuplicateBoss(BossId),
    /// Two recipes share an id
    #[error("Duplicate recipe ID: {0}")]
    DuplicateRecipe(RecipeId),
    /// Two decomposable recipes produce the same item
    #[error("{item} is decomposed by both {first} and {second}")]
    DuplicateDecomposition {
        /// Contested output item
        item: ItemId,
        /// Recipe registered first
        first: RecipeId,
        /// Recipe that collided with it
        second: RecipeId,
    },
    /// A boss names a predecessor that is not listed before it
    #[error("Boss {boss} unlocks after {predecessor}, which is not defined earlier")]
    PredecessorNotDefined {
        /// Boss with the bad link
        boss: BossId,
        /// Missing predecessor
        predecessor: BossId,
    },
    /// A definition is malformed
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A boss definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    /// Boss identifier
    pub id: BossId,
    /// Display name
    pub name: String,
    /// Boss that must be defeated first
    pub unlock_after: Option<BossId>,
    /// Coins awarded per victory
    pub coin_reward: u64,
    /// Items awarded per victory, in display order
    pub drops: Vec<(ItemId, u32)>,
}

impl Boss {
    /// Creates a new boss builder.
    #[must_use]
    pub fn builder(id: BossId, name: impl Into<String>) -> BossBuilder {
        BossBuilder::new(id, name)
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.name.is_empty() {
            return Err(CatalogError::Validation(format!("Boss {} has empty name", self.id)));
        }
        if self.unlock_after == Some(self.id) {
            return Err(CatalogError::Validation(format!(
                "Boss {} unlocks after itself",
                self.id
            )));
        }
        validate_quantities(&format!("Boss {} drop", self.id), &self.drops)
    }
}

/// Builder for boss definitions.
#[derive(Debug)]
pub struct BossBuilder {
    id: BossId,
    name: String,
    unlock_after: Option<BossId>,
    coin_reward: u64,
    drops: Vec<(ItemId, u32)>,
}

impl BossBuilder {
    fn new(id: BossId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unlock_after: None,
            coin_reward: 0,
            drops: Vec::new(),
        }
    }

    /// Sets the predecessor in the unlock chain.
    #[must_use]
    pub const fn unlock_after(mut self, boss: BossId) -> Self {
        self.unlock_after = Some(boss);
        self
    }

    /// Sets the coin reward.
    #[must_use]
    pub const fn coin_reward(mut self, coins: u64) -> Self {
        self.coin_reward = coins;
        self
    }

    /// Adds a drop.
    #[must_use]
    pub fn drop_item(mut self, item: ItemId, quantity: u32) -> Self {
        self.drops.push((item, quantity));
        self
    }

    /// Builds the boss.
    pub fn build(self) -> CatalogResult<Boss> {
        let boss = Boss {
            id: self.id,
            name: self.name,
            unlock_after: self.unlock_after,
            coin_reward: self.coin_reward,
            drops: self.drops,
        };
        boss.validate()?;
        Ok(boss)
    }
}

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier
    pub id: RecipeId,
    /// Recipe name
    pub name: String,
    /// Output item
    pub produces: ItemId,
    /// Output quantity
    pub output_quantity: u32,
    /// Coins consumed
    pub coin_cost: u64,
    /// Items consumed, in display order
    pub requires: Vec<(ItemId, u32)>,
    /// Where the recipe can be crafted
    pub station: Station,
    /// Whether the output can be broken back into `requires`
    pub decomposable: bool,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(id: impl Into<RecipeId>, name: impl Into<String>) -> RecipeBuilder {
        RecipeBuilder::new(id.into(), name)
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.name.is_empty() {
            return Err(CatalogError::Validation(format!("Recipe {} has empty name", self.id)));
        }
        if self.output_quantity == 0 {
            return Err(CatalogError::Validation(format!(
                "Recipe {} has zero output quantity",
                self.id
            )));
        }
        validate_quantities(&format!("Recipe {} ingredient", self.id), &self.requires)
    }
}

/// Builder for recipes.
#[derive(Debug)]
pub struct RecipeBuilder {
    id: RecipeId,
    name: String,
    produces: Option<(ItemId, u32)>,
    coin_cost: u64,
    requires: Vec<(ItemId, u32)>,
    station: Option<Station>,
    decomposable: bool,
}

impl RecipeBuilder {
    fn new(id: RecipeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            produces: None,
            coin_cost: 0,
            requires: Vec::new(),
            station: None,
            decomposable: false,
        }
    }

    /// Sets the station the recipe is crafted at.
    #[must_use]
    pub const fn station(mut self, station: Station) -> Self {
        self.station = Some(station);
        self
    }

    /// Sets the output item and quantity.
    #[must_use]
    pub const fn output(mut self, item: ItemId, quantity: u32) -> Self {
        self.produces = Some((item, quantity));
        self
    }

    /// Sets the coin cost.
    #[must_use]
    pub const fn coin_cost(mut self, coins: u64) -> Self {
        self.coin_cost = coins;
        self
    }

    /// Adds an ingredient requirement.
    #[must_use]
    pub fn ingredient(mut self, item: ItemId, quantity: u32) -> Self {
        self.requires.push((item, quantity));
        self
    }

    /// Marks the recipe as reversible.
    #[must_use]
    pub const fn decomposable(mut self, decomposable: bool) -> Self {
        self.decomposable = decomposable;
        self
    }

    /// Builds the recipe. Output and station are mandatory.
    pub fn build(self) -> CatalogResult<Recipe> {
        let Some((produces, output_quantity)) = self.produces else {
            return Err(CatalogError::Validation(format!("Recipe {} has no output", self.id)));
        };
        let Some(station) = self.station else {
            return Err(CatalogError::Validation(format!("Recipe {} has no station", self.id)));
        };
        let recipe = Recipe {
            id: self.id,
            name: self.name,
            produces,
            output_quantity,
            coin_cost: self.coin_cost,
            requires: self.requires,
            station,
            decomposable: self.decomposable,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

fn validate_quantities(what: &str, entries: &[(ItemId, u32)]) -> CatalogResult<()> {
    for (i, &(item, quantity)) in entries.iter().enumerate() {
        if quantity == 0 {
            return Err(CatalogError::Validation(format!("{what} {item} has zero quantity")));
        }
        if entries[..i].iter().any(|&(seen, _)| seen == item) {
            return Err(CatalogError::Validation(format!("{what} {item} is listed twice")));
        }
    }
    Ok(())
}

/// The validated set of bosses and recipes plus derived lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    bosses: Vec<Boss>,
    recipes: Vec<Recipe>,
    recipe_index: HashMap<RecipeId, usize>,
    decomposition: BTreeMap<ItemId, usize>,
}

impl Catalog {
    /// Validates the tables and derives the recipe and decomposition indices.
    ///
    /// Bosses must be listed after their predecessor. At most one decomposable
    /// recipe may produce any given item.
    pub fn new(bosses: Vec<Boss>, recipes: Vec<Recipe>) -> CatalogResult<Self> {
        for (i, boss) in bosses.iter().enumerate() {
            if bosses[..i].iter().any(|b| b.id == boss.id) {
                return Err(CatalogError::DuplicateBoss(boss.id));
            }
            if let Some(predecessor) = boss.unlock_after {
                if !bosses[..i].iter().any(|b| b.id == predecessor) {
                    return Err(CatalogError::PredecessorNotDefined {
                        boss: boss.id,
                        predecessor,
                    });
                }
            }
        }

        let mut recipe_index = HashMap::with_capacity(recipes.len());
        let mut decomposition = BTreeMap::new();
        for (i, recipe) in recipes.iter().enumerate() {
            if recipe_index.insert(recipe.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
            if !recipe.decomposable {
                continue;
            }
            if let Some(&first) = decomposition.get(&recipe.produces) {
                let first: &Recipe = &recipes[first];
                return Err(CatalogError::DuplicateDecomposition {
                    item: recipe.produces,
                    first: first.id.clone(),
                    second: recipe.id.clone(),
                });
            }
            decomposition.insert(recipe.produces, i);
        }

        debug!(
            "Catalog built: {} bosses, {} recipes, {} decomposable",
            bosses.len(),
            recipes.len(),
            decomposition.len()
        );

        Ok(Self {
            bosses,
            recipes,
            recipe_index,
            decomposition,
        })
    }

    /// Builds the standard boss chain and recipe book.
    pub fn build_standard() -> CatalogResult<Self> {
        Self::new(standard_bosses()?, standard_recipes()?)
    }

    /// Shared instance of [`Catalog::build_standard`], built on first use.
    ///
    /// # Panics
    /// Panics if the built-in tables fail validation.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::build_standard().expect("built-in catalog tables must validate")
        })
    }

    /// Gets a boss by ID.
    #[must_use]
    pub fn boss(&self, id: BossId) -> Option<&Boss> {
        self.bosses.iter().find(|boss| boss.id == id)
    }

    /// Returns every boss in chain order.
    pub fn bosses(&self) -> impl Iterator<Item = &Boss> {
        self.bosses.iter()
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipe_index.get(id).map(|&i| &self.recipes[i])
    }

    /// Returns every recipe in catalog order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Returns the recipes crafted at a station, in catalog order.
    pub fn recipes_at(&self, station: Station) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |recipe| recipe.station == station)
    }

    /// Returns the recipe that decomposes `item`, if any.
    #[must_use]
    pub fn decomposition_for(&self, item: ItemId) -> Option<&Recipe> {
        self.decomposition.get(&item).map(|&i| &self.recipes[i])
    }

    /// Display name for a boss id, falling back to the raw id.
    #[must_use]
    pub fn boss_name(&self, id: BossId) -> String {
        self.boss(id)
            .map_or_else(|| id.to_string(), |boss| boss.name.clone())
    }
}

fn standard_bosses() -> CatalogResult<Vec<Boss>> {
    Ok(vec![
        Boss::builder(BossId::Wound, "Wound")
            .coin_reward(180)
            .drop_item(ItemId::WoundFeet, 1)
            .build()?,
        Boss::builder(BossId::Toxic, "Toxic")
            .unlock_after(BossId::Wound)
            .coin_reward(240)
            .drop_item(ItemId::ToxicTongue, 1)
            .build()?,
        Boss::builder(BossId::ShiverFever, "Shiver & Fever")
            .unlock_after(BossId::Toxic)
            .coin_reward(320)
            .drop_item(ItemId::ShiverWing, 1)
            .drop_item(ItemId::FeverFang, 1)
            .build()?,
        Boss::builder(BossId::Disease, "Disease")
            .unlock_after(BossId::ShiverFever)
            .coin_reward(420)
            .drop_item(ItemId::DiseaseHorn, 1)
            .build()?,
    ])
}

fn standard_recipes() -> CatalogResult<Vec<Recipe>> {
    use Station::{SamsWeaponry, SarahsLab};

    Ok(vec![
        // Bought outright, so there is nothing to break it back into.
        Recipe::builder("sarah_buy_wound_feet", "Buy Wound's Feet")
            .station(SarahsLab)
            .output(ItemId::WoundFeet, 1)
            .coin_cost(100)
            .build()?,
        Recipe::builder("sarah_craft_wooden_pole", "Craft Wooden Pole")
            .station(SarahsLab)
            .output(ItemId::WoodenPole, 1)
            .coin_cost(300)
            .ingredient(ItemId::WoundFeet, 1)
            .ingredient(ItemId::ShiverWing, 1)
            .ingredient(ItemId::DiseaseHorn, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sarah_craft_toxic_tongue", "Craft Toxic's Tongue")
            .station(SarahsLab)
            .output(ItemId::ToxicTongue, 1)
            .coin_cost(200)
            .ingredient(ItemId::WoundFeet, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sarah_craft_shiver_wing", "Craft Shiver's Wing")
            .station(SarahsLab)
            .output(ItemId::ShiverWing, 1)
            .coin_cost(300)
            .ingredient(ItemId::WoundFeet, 1)
            .ingredient(ItemId::ToxicTongue, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sarah_craft_fever_fang", "Craft Fever's Fang")
            .station(SarahsLab)
            .output(ItemId::FeverFang, 1)
            .coin_cost(300)
            .ingredient(ItemId::WoundFeet, 1)
            .ingredient(ItemId::ToxicTongue, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sarah_craft_disease_horn", "Craft Disease's Horn")
            .station(SarahsLab)
            .output(ItemId::DiseaseHorn, 1)
            .coin_cost(500)
            .ingredient(ItemId::ShiverWing, 1)
            .ingredient(ItemId::FeverFang, 1)
            .ingredient(ItemId::WoundFeet, 1)
            .ingredient(ItemId::ToxicTongue, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sam_craft_spear", "Craft Spear")
            .station(SamsWeaponry)
            .output(ItemId::Spear, 1)
            .coin_cost(400)
            .ingredient(ItemId::WoundFeet, 1)
            .ingredient(ItemId::WoodenPole, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sam_craft_axe", "Craft Axe")
            .station(SamsWeaponry)
            .output(ItemId::Axe, 1)
            .coin_cost(500)
            .ingredient(ItemId::DiseaseHorn, 1)
            .ingredient(ItemId::WoodenPole, 1)
            .decomposable(true)
            .build()?,
        Recipe::builder("sam_craft_helbard", "Craft Helbard")
            .station(SamsWeaponry)
            .output(ItemId::Helbard, 1)
            .coin_cost(1200)
            .ingredient(ItemId::Spear, 1)
            .ingredient(ItemId::Axe, 1)
            .ingredient(ItemId::ShiverWing, 1)
            .decomposable(true)
            .build()?,
    ])
}
