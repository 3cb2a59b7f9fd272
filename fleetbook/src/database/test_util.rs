//! Shared test utilities for database unit tests.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{NewResource, Resource};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts a resource with the given brand, model and daily rate.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn insert_test_resource(db: &Database, brand: &str, model: &str, price: Decimal) -> Resource {
    Database::insert_resource(
        db.connection(),
        &NewResource::new(brand, model, price),
        Utc::now(),
    )
    .unwrap()
}

/// A date in January 2024, or later when `day` runs past the month.
///
/// # Panics
///
/// Panics if `day` is 0.
#[must_use]
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(day - 1))
}
