// UI layer: the interactive token prompt (via `dialoguer`) and the status
// output printed by the commands. Everything here is synchronous.

use crate::api::RandomUser;
use crate::error::{CredentialError, CredentialResult};
use crate::token::{TokenOutcome, TokenPrompt};
use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub const TOKEN_PROMPT_LABEL: &str = "Please enter the new myapp token";

/// Reads the token from the terminal. Blocks until a line is entered.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn prompt_for_token(&mut self) -> CredentialResult<String> {
        // `interact_text` refuses empty input and fails on Ctrl-C or EOF.
        Input::<String>::new()
            .with_prompt(TOKEN_PROMPT_LABEL)
            .interact_text()
            .map_err(CredentialError::PromptAborted)
    }
}

/// Print what `ensure_valid_token` did.
pub fn print_outcome(outcome: &TokenOutcome, config_path: &Path) {
    let record = outcome.record();
    if outcome.was_refreshed() {
        println!("{}", "New token written to config file.".green());
    } else {
        println!(
            "{}",
            "Token and expiration date already exist in config file.".cyan()
        );
        println!("Token: {}", record.token);
    }
    println!("Expiration Date: {}", record.expires_at);
    println!("Config file: {}", config_path.display());
}

/// Spinner shown while waiting on the network.
pub fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

pub fn print_no_results() {
    println!("{}", "No results found".yellow());
}

pub fn print_user_name(user: &RandomUser) {
    println!("{}", "Random User:".bold());
    println!(
        "Name: {} {} {}",
        user.name.title, user.name.first, user.name.last
    );
    println!("Gender: {}", user.gender);
    println!("Email: {}", user.email);
}

pub fn print_user_email(user: &RandomUser) {
    println!("Email: {}", user.email);
}

pub fn print_user_location(user: &RandomUser) {
    let loc = &user.location;
    println!("{}", "Location:".bold());
    println!("Street: {} {}", loc.street.number, loc.street.name);
    println!("City: {}", loc.city);
    println!("State: {}", loc.state);
    println!("Country: {}", loc.country);
    println!("Postcode: {}", loc.postcode_text());
}

pub fn print_user_picture(user: &RandomUser) {
    let pic = &user.picture;
    println!("{}", "Picture:".bold());
    println!("Large: {}", pic.large);
    println!("Medium: {}", pic.medium);
    println!("Thumbnail: {}", pic.thumbnail);
}
