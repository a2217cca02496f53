//! Actions the reducer understands, and their text form.

use cuties_common::{BossId, ItemId, Location, ParseIdError, RecipeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::Catalog;

/// A request to change the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Move to a location
    Navigate {
        /// Destination
        location: Location,
    },
    /// Fight a boss
    FightBoss {
        /// Boss to fight
        boss: BossId,
    },
    /// Craft a recipe at the current station
    Craft {
        /// Recipe to craft
        recipe: RecipeId,
    },
    /// Break one unit of an item back into its ingredients
    Decompose {
        /// Item to break down
        item: ItemId,
    },
    /// Start over
    Reset,
}

impl Action {
    /// Short name used in traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::FightBoss { .. } => "fight_boss",
            Self::Craft { .. } => "craft",
            Self::Decompose { .. } => "decompose",
            Self::Reset => "reset",
        }
    }

    /// Parses `input` and rejects recipe ids the catalog does not define.
    pub fn parse_with(input: &str, catalog: &Catalog) -> ActionParseResult<Self> {
        let action: Self = input.parse()?;
        if let Self::Craft { recipe } = &action {
            if catalog.recipe(recipe).is_none() {
                return Err(ActionParseError::UnknownRecipe(recipe.to_string()));
            }
        }
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate { location } => write!(f, "go {location}"),
            Self::FightBoss { boss } => write!(f, "fight {boss}"),
            Self::Craft { recipe } => write!(f, "craft {recipe}"),
            Self::Decompose { item } => write!(f, "decompose {}", item.slug()),
            Self::Reset => f.write_str("reset"),
        }
    }
}

/// Errors from parsing an action line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    /// Nothing to parse
    #[error("Empty command")]
    Empty,
    /// First word is not an action
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// Action needs an argument
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        /// Command keyword
        command: &'static str,
        /// What should follow it
        expected: &'static str,
    },
    /// Action takes no argument
    #[error("'{0}' takes no argument")]
    UnexpectedArgument(&'static str),
    /// Argument names no known boss, item or location
    #[error(transparent)]
    Id(#[from] ParseIdError),
    /// Recipe id missing from the catalog
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),
}

/// Result type for action parsing.
pub type ActionParseResult<T> = Result<T, ActionParseError>;

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parses `<keyword> [argument]`. Keywords are case-insensitive; the
    /// argument is the rest of the line so item names may contain spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ActionParseError::Empty);
        }
        let (keyword, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(k, r)| (k, r.trim()));

        let require = |command: &'static str, expected: &'static str| {
            if rest.is_empty() {
                Err(ActionParseError::MissingArgument { command, expected })
            } else {
                Ok(rest)
            }
        };

        match keyword.to_ascii_lowercase().as_str() {
            "go" | "nav" | "move" => Ok(Self::Navigate {
                location: require("go", "a location")?.parse()?,
            }),
            "fight" => Ok(Self::FightBoss {
                boss: require("fight", "a boss id")?.parse()?,
            }),
            "craft" => Ok(Self::Craft {
                recipe: RecipeId::new(require("craft", "a recipe id")?),
            }),
            "decompose" => Ok(Self::Decompose {
                item: require("decompose", "an item")?.parse()?,
            }),
            "reset" if rest.is_empty() => Ok(Self::Reset),
            "reset" => Err(ActionParseError::UnexpectedArgument("reset")),
            other => Err(ActionParseError::UnknownCommand(other.to_string())),
        }
    }
}
