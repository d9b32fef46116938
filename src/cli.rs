// Command-line surface of the `myapp` binary and the logging setup shared
// by both binaries.

use crate::api::{RandomUser, RandomUserClient};
use crate::config::{resolve_config_path, ConfigStore};
use crate::token::{TokenLifecycleManager, TokenOutcome};
use crate::ui::{self, TerminalPrompt};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "myapp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage the locally cached myapp token", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the token file (defaults to ~/.config.json)
    #[arg(long, env = "MYAPP_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Handle myapp token: prompt for a new one when missing or about to expire
    Token,

    /// Handle Random User Name
    #[command(name = "randomusername")]
    RandomUserName,

    /// Handle Random User Email
    #[command(name = "randomuseremail")]
    RandomUserEmail,

    /// Handle Random User Location
    #[command(name = "randomuserlocation")]
    RandomUserLocation,

    /// Handle Random User Picture
    #[command(name = "randomuserpicture")]
    RandomUserPicture,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.token_file)?;
    let outcome = ensure_token(&config_path)?;
    ui::print_outcome(&outcome, &config_path);

    let show: fn(&RandomUser) = match cli.command {
        Command::Token => return Ok(()),
        Command::RandomUserName => ui::print_user_name,
        Command::RandomUserEmail => ui::print_user_email,
        Command::RandomUserLocation => ui::print_user_location,
        Command::RandomUserPicture => ui::print_user_picture,
    };

    let api = RandomUserClient::from_env()?;
    let spinner = ui::spinner("Fetching random user...")?;
    let fetched = api.fetch_user();
    spinner.finish_and_clear();

    match fetched? {
        Some(user) => show(&user),
        None => ui::print_no_results(),
    }
    Ok(())
}

fn ensure_token(config_path: &Path) -> Result<TokenOutcome> {
    let store = ConfigStore::new(config_path);
    let mut manager = TokenLifecycleManager::new(store, TerminalPrompt);
    Ok(manager.ensure_valid_token()?)
}
