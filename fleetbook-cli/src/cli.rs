//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    CancelCommand, CompletionsCommand, DeleteCommand, InitCommand, ListCommand, ReserveCommand,
    ResourceCommand, ShowCommand,
};
use crate::utils::GlobalOptions;

/// Command-line tool for booking cars without double bookings.
#[derive(Parser)]
#[command(name = "fleetbook")]
#[command(version, about = "Book cars for date ranges without double bookings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "FLEETBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Maximum time to wait for the database write lock (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u32>,

    /// Fail instead of creating the database on first use
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    /// Requester id issuing the command
    #[arg(long, value_name = "ID", global = true, env = "FLEETBOOK_ACTOR")]
    pub actor: Option<i64>,

    /// Act with administrative rights
    #[arg(long, global = true)]
    pub privileged: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Global options shared by every command.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            disable_autoinit: self.disable_autoinit,
            actor: self.actor,
            privileged: self.privileged,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book a car for a date range
    Reserve(ReserveCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Show a reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Permanently delete a reservation (privileged)
    Delete(DeleteCommand),

    /// Manage the fleet
    #[command(subcommand)]
    Resource(ResourceCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
