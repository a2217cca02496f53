//! Line-oriented game driver.
//!
//! Owns a [`Session`], turns input lines into [`Command`]s and writes the
//! narrative and views to any [`Write`] sink.

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use cuties_gameplay::{
    boss_status, decomposable_list, format_quantities, has_requirements, inventory_list,
    narrative_stage, unlock_status, Action, Recipe, Session, Station, BONUS_BOSS, RANK_ITEM,
};

use crate::command::{Command, HELP};
use crate::config::DriverConfig;

/// Whether the driver should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop
    Quit,
}

/// Text front end over a game session.
pub struct Driver<W: Write> {
    session: Session<'static>,
    config: DriverConfig,
    out: W,
}

impl<W: Write> Driver<W> {
    /// Creates a driver with a fresh run.
    pub fn new(config: DriverConfig, out: W) -> Self {
        Self {
            session: Session::standard(),
            config,
            out,
        }
    }

    /// The session being driven.
    pub const fn session(&self) -> &Session<'static> {
        &self.session
    }

    /// Consumes the driver and returns the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints the opening journal line.
    pub fn greet(&mut self) -> Result<()> {
        for entry in self.session.state().log().iter() {
            writeln!(self.out, "  {}", entry.message)?;
        }
        writeln!(self.out, "Type 'help' for commands.")?;
        Ok(())
    }

    /// Handles one input line.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let command = match Command::parse(line, self.session.catalog()) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                warn!("Rejected input {:?}: {e}", line.trim());
                writeln!(self.out, "{e}")?;
                return Ok(Flow::Continue);
            },
        };

        match command {
            Command::Action(action) => self.dispatch(&action)?,
            Command::Status => self.print_status()?,
            Command::Recipes => self.print_recipes()?,
            Command::Bosses => self.print_bosses()?,
            Command::State => {
                let json = serde_json::to_string_pretty(self.session.state())?;
                writeln!(self.out, "{json}")?;
            },
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    /// Executes lines until input ends or a `quit` is read.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<Flow> {
        for line in input.lines() {
            if self.execute(&line?)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Replays a command file.
    pub fn replay(&mut self, path: &Path) -> Result<Flow> {
        let script = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        info!("Replaying script {}", path.display());
        self.run(script.as_bytes())
    }

    fn dispatch(&mut self, action: &Action) -> Result<()> {
        let before = self.session.state().log().clone();
        let state = self.session.dispatch(action);

        // A reset starts a new journal, which may equal the one it replaced
        let fresh: Vec<&str> = if *action == Action::Reset {
            state.log().messages().take(self.config.log_lines).collect()
        } else {
            state
                .log()
                .since(&before)
                .take(self.config.log_lines)
                .map(|entry| entry.message.as_str())
                .collect()
        };
        debug!("{} journal lines after {}", fresh.len(), action.kind());
        for message in fresh.iter().rev() {
            writeln!(self.out, "  {message}")?;
        }

        if self.config.echo_state {
            writeln!(
                self.out,
                "[{} | {} coins | {} items]",
                state.location(),
                state.coins(),
                state.inventory().len()
            )?;
        }
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let state = self.session.state();
        let catalog = self.session.catalog();

        writeln!(self.out, "Location: {}", state.location())?;
        writeln!(self.out, "Coins: {}", state.coins())?;
        writeln!(self.out, "Story: {}", narrative_stage(state))?;

        let relationships: Vec<String> = state
            .relationships()
            .iter()
            .map(|r| {
                let maxed = if r.is_maxed() { " (max)" } else { "" };
                format!("{} {}/{}{maxed}", r.npc.name(), r.level(), r.max())
            })
            .collect();
        writeln!(self.out, "Relationships: {}", relationships.join(", "))?;

        let items = inventory_list(state);
        if items.is_empty() {
            writeln!(self.out, "Inventory: (empty)")?;
        } else {
            writeln!(self.out, "Inventory: {}", format_quantities(&items))?;
        }

        let decomposable: Vec<String> = decomposable_list(state, catalog)
            .iter()
            .map(|entry| format!("{} x{}", entry.item, entry.quantity))
            .collect();
        if !decomposable.is_empty() {
            writeln!(self.out, "Decomposable: {}", decomposable.join(", "))?;
        }
        Ok(())
    }

    fn print_recipes(&mut self) -> Result<()> {
        let state = self.session.state();
        let catalog = self.session.catalog();

        let Some(station) = state.location().station() else {
            writeln!(
                self.out,
                "No crafting in the {}. Recipes by station:",
                state.location()
            )?;
            for station in Station::ALL {
                writeln!(self.out, "{}:", station.name())?;
                for recipe in catalog.recipes_at(station) {
                    writeln!(self.out, "  {}", describe_recipe(recipe))?;
                }
            }
            return Ok(());
        };

        writeln!(self.out, "{}:", station.name())?;
        for recipe in catalog.recipes_at(station) {
            let marker = if has_requirements(state, recipe) {
                "ready"
            } else {
                "missing"
            };
            writeln!(self.out, "  {} [{marker}]", describe_recipe(recipe))?;
        }
        Ok(())
    }

    fn print_bosses(&mut self) -> Result<()> {
        let state = self.session.state();
        let catalog = self.session.catalog();

        for boss in catalog.bosses() {
            let mut line =
                format!("  {} ({}): {}", boss.name, boss.id, boss_status(state, boss));
            if let Some(reason) = unlock_status(state, boss).reason(catalog) {
                line.push(' ');
                line.push_str(&reason);
            }
            line.push_str(&format!(
                " | +{} coins | drops {}",
                boss.coin_reward,
                format_quantities(&boss.drops)
            ));
            if boss.id == BONUS_BOSS {
                line.push_str(&format!(" | 2nd win bonus: {RANK_ITEM}"));
            }
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

fn describe_recipe(recipe: &Recipe) -> String {
    let needs = if recipe.requires.is_empty() {
        "nothing".to_string()
    } else {
        format_quantities(&recipe.requires)
    };
    format!(
        "{} ({}): {} coins, needs {needs}",
        recipe.name, recipe.id, recipe.coin_cost
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuties_gameplay::{BossId, ItemId};

    const DISEASE_TWICE: &str =
        "fight wound\nfight toxic\nfight shiver_fever\nfight disease\nfight disease\n";

    fn driver() -> Driver<Vec<u8>> {
        Driver::new(DriverConfig::default(), Vec::new())
    }

    fn output(driver: Driver<Vec<u8>>) -> String {
        String::from_utf8(driver.into_output()).expect("utf-8 output")
    }

    #[test]
    fn test_action_prints_fresh_lines_oldest_first() {
        let mut driver = driver();
        driver.run(DISEASE_TWICE.as_bytes()).expect("run");
        let text = output(driver);
        let bonus = text
            .find("Defeated Disease again")
            .expect("bonus line printed");
        let last_summary = text.rfind("Won vs Disease").expect("summary printed");
        assert!(bonus < last_summary);
        assert_eq!(text.matches("Won vs Wound").count(), 1);
    }

    #[test]
    fn test_parse_error_is_reported_and_run_continues() {
        let mut driver = driver();
        let flow = driver.run("fight dragon\nfight wound\n".as_bytes()).expect("run");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(driver.session().state().kills(BossId::Wound), 1);
        let text = output(driver);
        assert!(text.contains("dragon"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut driver = driver();
        let flow = driver.run("quit\nfight wound\n".as_bytes()).expect("run");
        assert_eq!(flow, Flow::Quit);
        assert_eq!(driver.session().history_len(), 0);
    }

    #[test]
    fn test_status_view() {
        let mut driver = driver();
        driver.run("fight wound\nstatus\n".as_bytes()).expect("run");
        let text = output(driver);
        assert!(text.contains("Location: Boss Arena"));
        assert!(text.contains("Coins: 430"));
        assert!(text.contains("Story: Act I \u{2192} First wound opened"));
        assert!(text.contains("Relationships: Sarah 0/7, Sam 0/7"));
        assert!(text.contains("Inventory: Wound's Feet x1"));
    }

    #[test]
    fn test_recipes_view_marks_ready() {
        let mut driver = driver();
        driver.run("go sarah\nrecipes\n".as_bytes()).expect("run");
        let text = output(driver);
        assert!(text.contains(
            "Buy Wound's Feet (sarah_buy_wound_feet): 100 coins, needs nothing [ready]"
        ));
        assert!(text.contains(
            "Craft Toxic's Tongue (sarah_craft_toxic_tongue): 200 coins, \
             needs Wound's Feet x1 [missing]"
        ));
        assert!(!text.contains("sam_craft_spear"));
    }

    #[test]
    fn test_recipes_view_in_arena_groups_by_station() {
        let mut driver = driver();
        driver.run("recipes\n".as_bytes()).expect("run");
        let text = output(driver);
        let lab = text.find("Sarah's Lab:").expect("lab heading");
        let weaponry = text.find("Sam's Weaponry:").expect("weaponry heading");
        let spear = text.find("sam_craft_spear").expect("spear listed");
        assert!(lab < weaponry && weaponry < spear);
        assert!(!text.contains("[ready]"));
    }

    #[test]
    fn test_repeated_reset_prints_each_time() {
        let mut driver = driver();
        driver.run("reset\nreset\n".as_bytes()).expect("run");
        let text = output(driver);
        assert_eq!(text.matches("State reset.").count(), 2);
    }

    #[test]
    fn test_bosses_view() {
        let mut driver = driver();
        driver.run("bosses\n".as_bytes()).expect("run");
        let text = output(driver);
        assert!(text.contains("Wound (wound): Not fought"));
        assert!(text.contains("Toxic (toxic): Locked Defeat Wound first."));
        assert!(text.contains("2nd win bonus: Wooden Pole"));
    }

    #[test]
    fn test_state_view_is_json() {
        let mut driver = driver();
        driver.run("state\n".as_bytes()).expect("run");
        let text = output(driver);
        let value: serde_json::Value = serde_json::from_str(&text).expect("json state");
        assert_eq!(value["wallet"], 250);
    }

    #[test]
    fn test_echo_state_and_log_lines() {
        let config = DriverConfig {
            echo_state: true,
            log_lines: 1,
            ..DriverConfig::default()
        };
        let mut driver = Driver::new(config, Vec::new());
        driver.run(DISEASE_TWICE.as_bytes()).expect("run");
        assert_eq!(driver.session().state().item_count(ItemId::WoodenPole), 1);
        let text = output(driver);
        assert!(!text.contains("Defeated Disease again"));
        assert!(text.contains("[Boss Arena | 1830 coins |"));
    }

    #[test]
    fn test_replay_script_file() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let script = temp_dir.path().join("opening.txt");
        fs::write(&script, "# warm up\nfight wound\ngo sarah\n").expect("write script");

        let mut driver = driver();
        driver.replay(&script).expect("replay");
        assert_eq!(driver.session().history_len(), 2);
        assert!(driver.replay(&temp_dir.path().join("missing.txt")).is_err());
    }
}
