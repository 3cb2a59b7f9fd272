//! Utility functions for CLI operations.
//!
//! Configuration loading, engine setup, actor resolution and timestamp
//! formatting shared by the commands.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fleetbook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use fleetbook::{Actor, Config, ConfigBuilder, DatabaseConfig, RequesterId, ReservationEngine};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the lock wait (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// The requester issuing the command.
    pub actor: Option<i64>,

    /// Act with administrative rights.
    pub privileged: bool,
}

/// Resolve the data directory from `--data-dir`, `FLEETBOOK_DATA_DIR` or
/// the default.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    resolve_data_dir(global.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `<data-dir>/config.yaml`
/// 3. Built-in defaults
///
/// Global flags are applied on top where commands consume them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the reservation engine on the configured database.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_engine(global: &GlobalOptions, config: &Config) -> Result<ReservationEngine, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    let autoinit_disabled = global.disable_autoinit || config.autoinit_disabled();
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let lock_wait = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |s| Duration::from_secs(s.into()));
    log::debug!(
        "opening {} (lock wait {}s)",
        db_path.display(),
        lock_wait.as_secs()
    );

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(lock_wait);
    ReservationEngine::open(db_config).map_err(CliError::from)
}

/// The actor named by `--actor`, privileged when `--privileged` is set.
pub fn require_actor(global: &GlobalOptions) -> Result<Actor, CliError> {
    let id = global.actor.ok_or_else(|| {
        CliError::InvalidArguments("--actor <ID> is required for this command".to_string())
    })?;
    let id = RequesterId::new(id);

    Ok(if global.privileged {
        Actor::privileged(id)
    } else {
        Actor::new(id)
    })
}

/// Refuse the command unless `--privileged` is set.
pub fn require_privileged(global: &GlobalOptions, what: &str) -> Result<(), CliError> {
    if global.privileged {
        Ok(())
    } else {
        Err(CliError::PermissionDenied(format!(
            "{what} requires --privileged"
        )))
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
