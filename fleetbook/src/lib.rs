#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fleetbook
//!
//! A reservation engine for a car rental fleet.
//!
//! The engine books resources (cars) for half-open date ranges, guarantees
//! that confirmed reservations on a resource never overlap, and keeps each
//! resource's `available` flag in step with its confirmed reservations.
//! State lives in a SQLite database; every mutation is one transaction.
//!
//! ## Core Types
//!
//! - [`ReservationEngine`]: `reserve`, `cancel`, `list`, `get` and resource
//!   administration
//! - [`Resource`] and [`Reservation`]: the stored records
//! - [`DateRange`]: the half-open interval the overlap rule is defined on
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use fleetbook::DateRange;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let booked = DateRange::new(d(1), d(3)).unwrap();
//!
//! // The return day is free for the next booking
//! assert!(!booked.overlaps(&DateRange::new(d(3), d(5)).unwrap()));
//! assert!(booked.overlaps(&DateRange::new(d(2), d(4)).unwrap()));
//! ```

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod logging;
pub mod reservation;
pub mod resource;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig};
pub use engine::{
    total_price, Actor, Page, PageRequest, ReservationEngine, ReservationFilter, ReserveOptions,
    ResourceFilter,
};
pub use error::{Entity, Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{DateRange, RequesterId, Reservation, ReservationId, ReservationStatus};
pub use resource::{NewResource, Resource, ResourceId, ResourceUpdate};
