//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::{Connection, TransactionBehavior};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CREATED_INDEX, CREATE_METADATA_TABLE, CREATE_REQUESTER_INDEX,
    CREATE_RESERVATIONS_TABLE, CREATE_RESOURCES_TABLE, CREATE_RESOURCE_STATUS_INDEX,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// All statements are idempotent, so two processes initializing the same
/// fresh file concurrently end up with the same schema.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use fleetbook::database::migrations::{get_schema_version, initialize_schema};
///
/// let mut conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&mut conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_RESOURCES_TABLE, [])?;
    tx.execute(CREATE_RESERVATIONS_TABLE, [])?;

    tx.execute(CREATE_RESOURCE_STATUS_INDEX, [])?;
    tx.execute(CREATE_REQUESTER_INDEX, [])?;
    tx.execute(CREATE_CREATED_INDEX, [])?;

    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    tx.commit()?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (which indicate version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::Unknown =>
        {
            // "no such table: metadata"
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the database was written by
/// an older or newer version of fleetbook, or a database error if the
/// queries fail.
pub fn check_schema_compatibility(conn: &mut Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
