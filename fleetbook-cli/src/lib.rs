//! Library exports for fleetbook-cli.
//!
//! The binary is a thin wrapper over these modules; exposing them lets the
//! command definitions be inspected from tests and tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
