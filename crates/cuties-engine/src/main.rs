//! # Cuties Engine
//!
//! Text driver for Creepy Cuties, a crafting and boss progression game.
//!
//! This binary ties together:
//! - Config: `cuties.toml` driver settings
//! - Gameplay: the session and reducer
//! - Commands: line input parsed into actions and views
//!
//! Usage: `cuties [config.toml]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod command;
mod config;
mod driver;

use anyhow::Result;
use std::io;
use tracing::{info, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{DriverConfig, DEFAULT_LOG_DIRECTIVE};
use driver::{Driver, Flow};

/// Tracing goes to stderr so stdout carries only the game text.
fn subscriber(directive: Directive) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive))
}

/// Main entry point.
fn main() -> Result<()> {
    // Config load messages go through a default subscriber until the
    // configured directive is known
    let config_path = std::env::args_os().nth(1);
    let config = tracing::subscriber::with_default(
        subscriber(DEFAULT_LOG_DIRECTIVE.parse()?),
        || match &config_path {
            Some(path) => DriverConfig::load_from(path),
            None => DriverConfig::load(),
        },
    );

    subscriber(config.directive()).init();

    info!("Creepy Cuties starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Config: {config:?}");

    let stdout = io::stdout();
    let mut driver = Driver::new(config.clone(), stdout.lock());
    driver.greet()?;

    let mut flow = Flow::Continue;
    if let Some(script) = &config.script {
        flow = driver.replay(script)?;
    }
    if flow == Flow::Continue {
        driver.run(io::stdin().lock())?;
    }

    info!(
        "Creepy Cuties shutdown complete after {} actions",
        driver.session().history_len()
    );
    Ok(())
}
