//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the fleetbook data directory and database.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use fleetbook::config::CONFIG_FILE_NAME;
use fleetbook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use fleetbook::{Config, Database, DatabaseConfig};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Initialize fleetbook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize fleetbook data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Replace an existing database (all bookings are lost)
    #[arg(long)]
    overwrite: bool,

    /// Create a configuration file with the built-in defaults
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; creating the database is the
    /// point of the command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let explicit = self.data_dir.or_else(|| global.data_dir.clone());
        let data_dir = resolve_data_dir(explicit.as_deref())
            .map_err(|e| CliError::Config(e.to_string()))?;
        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let config_path = data_dir.join(CONFIG_FILE_NAME);

        if db_path.exists() && !self.overwrite && !self.dry_run {
            return Err(CliError::InvalidArguments(format!(
                "database already exists (use --overwrite to replace): {}",
                db_path.display()
            )));
        }

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize fleetbook in: {}", data_dir.display());
            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }
            if db_path.exists() {
                if self.overwrite {
                    println!("  - Replace database: {}", db_path.display());
                } else {
                    println!(
                        "  - ERROR: Database already exists (use --overwrite to replace): {}",
                        db_path.display()
                    );
                }
            } else {
                println!("  - Create database: {}", db_path.display());
            }
            if self.with_config && !config_path.exists() {
                println!("  - Create configuration file: {}", config_path.display());
            }
            return Ok(());
        }

        let created_dir = !data_dir.exists();
        fs::create_dir_all(&data_dir)?;

        let replaced = db_path.exists();
        if replaced {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = db_path.clone().into_os_string();
                file.push(suffix);
                let file = PathBuf::from(file);
                if file.exists() {
                    fs::remove_file(&file)?;
                }
            }
            log::warn!("removed existing database {}", db_path.display());
        }

        Database::open(DatabaseConfig::new(&db_path))?;

        let config_created = if self.with_config && !config_path.exists() {
            let yaml = serde_yaml::to_string(&Config::defaults())
                .map_err(|e| CliError::Config(e.to_string()))?;
            fs::write(&config_path, yaml)?;
            true
        } else {
            false
        };

        if !global.quiet {
            println!("Initialized fleetbook in: {}", data_dir.display());
            if created_dir {
                println!("  - Created data directory");
            }
            if replaced {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
            if config_created {
                println!("  - Created default configuration file");
            } else if self.with_config {
                println!("  - Configuration file already exists (not overwritten)");
            }
        }

        Ok(())
    }
}
