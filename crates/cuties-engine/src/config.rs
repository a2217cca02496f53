//! Driver configuration.
//!
//! Controls tracing verbosity, how much of the narrative log is echoed after
//! each command, and an optional script replayed at startup. Game balance is
//! not configurable here; it lives in the catalog.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::filter::{Directive, LevelFilter};

use cuties_gameplay::JOURNAL_CAPACITY;

/// Configuration file name.
pub const CONFIG_FILE: &str = "cuties.toml";

/// Tracing directive used when the config does not set one.
pub const DEFAULT_LOG_DIRECTIVE: &str = "cuties=info";

/// Driver configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Tracing directive added on top of `RUST_LOG`
    pub log_directive: String,
    /// Print a one-line status after every action
    pub echo_state: bool,
    /// Most narrative entries printed after one command
    pub log_lines: usize,
    /// Command file replayed before reading standard input
    pub script: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_directive: DEFAULT_LOG_DIRECTIVE.to_string(),
            echo_state: false,
            log_lines: 3,
            script: None,
        }
    }
}

impl DriverConfig {
    /// Load configuration from `cuties.toml` in the working directory.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns defaults if the file is missing or invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    #[cfg(test)]
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to sensible ranges and replace an unparsable log directive.
    pub fn validate(&mut self) {
        self.log_lines = self.log_lines.clamp(1, JOURNAL_CAPACITY);
        let directive = self.log_directive.trim();
        if directive.is_empty() || directive.parse::<Directive>().is_err() {
            warn!(
                "Invalid log directive {:?}, using {DEFAULT_LOG_DIRECTIVE}",
                self.log_directive
            );
            self.log_directive = DEFAULT_LOG_DIRECTIVE.to_string();
        }
    }

    /// The tracing directive to install. Falls back to `info` for a config
    /// that skipped [`DriverConfig::validate`].
    pub fn directive(&self) -> Directive {
        self.log_directive
            .trim()
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    }
}
