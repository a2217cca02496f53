//! Driver commands: game actions plus read-only views.

use cuties_gameplay::{Action, ActionParseResult, Catalog};

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  go <arena|sarah|sam>        move to a location
  fight <boss>                fight wound, toxic, shiver_fever or disease
  craft <recipe id>           craft at the current station
  decompose <item>            break one item back into its ingredients
  reset                       start a new run
  status                      location, coins, relationships and inventory
  recipes                     recipes at the current station
  bosses                      boss chain and progress
  state                       full state as JSON
  help                        this text
  quit                        leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch to the session
    Action(Action),
    /// Show a status summary
    Status,
    /// List recipes
    Recipes,
    /// List bosses
    Bosses,
    /// Dump the state as JSON
    State,
    /// Show help
    Help,
    /// Stop reading input
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str, catalog: &Catalog) -> ActionParseResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let command = match line.to_ascii_lowercase().as_str() {
            "status" => Self::Status,
            "recipes" => Self::Recipes,
            "bosses" => Self::Bosses,
            "state" => Self::State,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Action(Action::parse_with(line, catalog)?),
        };
        Ok(Some(command))
    }
}
