//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for concurrent `SQLite` access.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// One `Database` is one `SQLite` connection. Concurrent callers each open
/// their own; mutual exclusion between them comes from immediate write
/// transactions (see [`Database::begin_transaction`]).
///
/// # Examples
///
/// ```no_run
/// use fleetbook::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/fleetbook.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure the busy timeout and enforce foreign keys
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let mut conn = Connection::open_with_flags(&config.path, flags)?;

        // The busy timeout must be in place before anything else touches the
        // file, including the journal mode switch.
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // PRAGMA journal_mode returns a row, so it goes through query_row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        if config.read_only {
            match super::migrations::get_schema_version(&conn)? {
                super::schema::CURRENT_SCHEMA_VERSION => {}
                found => {
                    return Err(Error::UnsupportedSchemaVersion {
                        expected: super::schema::CURRENT_SCHEMA_VERSION,
                        found,
                    })
                }
            }
        } else {
            super::migrations::check_schema_compatibility(&mut conn)?;
        }

        log::debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Begins an immediate (write-locking) transaction.
    ///
    /// The write lock is taken at `BEGIN`, before any read, so reads made
    /// inside the transaction cannot go stale before its writes commit.
    /// Other writers wait up to the busy timeout; if it expires the error is
    /// [`Error::TransientStore`]. Dropping the transaction without committing
    /// rolls it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Runs `SQLite`'s integrity check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] when the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption { details: result })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");

        assert!(!path.parent().unwrap().exists());
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let result = Database::open(DatabaseConfig::new(&path).without_auto_create());
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_database_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db.connection().execute("CREATE TABLE test (id INTEGER)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_rolls_back_on_drop() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();

        {
            let tx = db.begin_transaction().unwrap();
            tx.execute(
                "INSERT INTO resources (brand, model, price_per_day, created_at, updated_at)
                 VALUES ('Fiat', 'Panda', '10', 0, 0)",
                [],
            )
            .unwrap();
        }

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM resources", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_second_writer_times_out_transiently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");
        let mut holder = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut waiter = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(std::time::Duration::from_millis(50)),
        )
        .unwrap();

        let _tx = holder.begin_transaction().unwrap();
        let err = waiter.begin_transaction().unwrap_err();
        assert!(err.is_transient(), "expected transient error, got {err:?}");
    }

    #[test]
    fn test_verify_integrity() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();
        db.verify_integrity().unwrap();
    }
}
