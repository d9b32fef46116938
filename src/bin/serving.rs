// Entrypoint for the `serving` scaffold binary.

use clap::Parser;
use colored::Colorize;
use myapp_cli::cli::init_logging;
use myapp_cli::serving::ServingCommand;

#[derive(Parser)]
#[command(name = "serving")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Main command for serving")]
#[command(
    long_about = "A CLI application to manage serving tasks with subcommands for listing, creating, updating, and deleting."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: ServingCommand,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
    cli.command.run();
}
