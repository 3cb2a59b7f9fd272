//! Main entry point for the fleetbook CLI.
//!
//! This is the command-line interface for the fleetbook car reservation
//! engine. It provides commands for:
//! - `reserve` / `cancel`: booking and releasing a car
//! - `show` / `list`: inspecting reservations
//! - `resource`: managing the fleet (privileged)

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let _level = fleetbook::init_logger(cli.verbose, cli.quiet);

    let global = cli.global_options();

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Reserve(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Delete(cmd) => cmd.execute(&global),
        Command::Resource(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
