//! Database layer for persistent storage of resources and reservations.
//!
//! This module provides a SQLite-based store: connection management, schema
//! versioning, and accessors for both tables. Accessors are associated
//! functions taking a `&Connection`, so the engine can pass an open
//! [`rusqlite::Transaction`] to several of them and commit once.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::Utc;
//! use fleetbook::database::{Database, DatabaseConfig};
//! use fleetbook::NewResource;
//! use rust_decimal::Decimal;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/fleetbook.db")).unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! let car = Database::insert_resource(
//!     &tx,
//!     &NewResource::new("Toyota", "Corolla", Decimal::new(50, 0)),
//!     Utc::now(),
//! )
//! .unwrap();
//! tx.commit().unwrap();
//!
//! assert!(Database::get_resource(db.connection(), car.id()).unwrap().is_some());
//! ```

mod config;
mod connection;
pub mod migrations;
mod reservations;
mod resources;
mod rows;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use schema::CURRENT_SCHEMA_VERSION;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
