//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fleetbook::{
    DatabaseConfig, NewResource, RequesterId, ReservationEngine, ReserveOptions, ResourceId,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A database file in a temporary directory, removed when dropped.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Creates an empty store directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("fleetbook.db")
    }

    /// The temporary directory itself.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a new engine (and connection) on the store.
    pub fn engine(&self) -> ReservationEngine {
        ReservationEngine::open(DatabaseConfig::new(self.path())).unwrap()
    }
}

/// A date in 2024; `day` counts from January 1st.
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(day - 1))
}

/// Adds a car with the given daily rate in whole units.
pub fn add_car(engine: &mut ReservationEngine, model: &str, price: i64) -> ResourceId {
    engine
        .create_resource(&NewResource::new("Toyota", model, Decimal::new(price, 0)))
        .unwrap()
        .id()
}

/// A reserve request for whole days of January 2024.
pub fn request(car: ResourceId, requester: i64, start: u32, end: u32) -> ReserveOptions {
    ReserveOptions::new(car, RequesterId::new(requester), date(start), date(end))
}
