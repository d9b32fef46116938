// Entrypoint for the `myapp` binary.
// - Keeps `main` small: parse arguments, set up logging, hand over to `cli::run`.
// - Errors are printed in red and turn into exit status 1.

use clap::Parser;
use colored::Colorize;
use myapp_cli::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::init_logging(cli.verbose).and_then(|_| cli::run(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
