//! The reservation engine.
//!
//! [`ReservationEngine`] owns one database connection and exposes the
//! booking operations. Every mutation runs in a single immediate
//! transaction spanning the checks and all writes to both tables, which is
//! what keeps confirmed reservations on a resource disjoint and the
//! resource's `available` flag equal to "no confirmed reservation"
//! even when many engines work on the same database file concurrently.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fleetbook::{
//!     Actor, DatabaseConfig, NewResource, PageRequest, RequesterId, ReservationEngine,
//!     ReservationFilter, ReserveOptions,
//! };
//! use rust_decimal::Decimal;
//!
//! let mut engine = ReservationEngine::open(DatabaseConfig::new("/tmp/fleetbook.db")).unwrap();
//! let car = engine
//!     .create_resource(&NewResource::new("Toyota", "Corolla", Decimal::new(50, 0)))
//!     .unwrap();
//!
//! let guest = RequesterId::new(1);
//! let booking = engine
//!     .reserve(&ReserveOptions::new(
//!         car.id(),
//!         guest,
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
//!     ))
//!     .unwrap();
//! assert_eq!(booking.total_price(), Decimal::new(100, 0));
//!
//! engine.cancel(booking.id(), &Actor::new(guest)).unwrap();
//!
//! let page = engine
//!     .list(&ReservationFilter::default(), PageRequest::default())
//!     .unwrap();
//! assert_eq!(page.total, 1);
//! ```

mod admin;
mod cancel;
mod pricing;
pub mod query;
mod reserve;

#[cfg(test)]
mod proptests;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::database::{Database, DatabaseConfig};
use crate::error::Result;
use crate::reservation::{RequesterId, Reservation};
use crate::resource::ResourceId;

pub use pricing::total_price;
pub use query::{Page, PageRequest, ReservationFilter, ResourceFilter};
pub use reserve::ReserveOptions;

/// The party performing an operation, as authenticated upstream.
///
/// # Examples
///
/// ```
/// use fleetbook::{Actor, RequesterId};
///
/// let guest = Actor::new(RequesterId::new(1));
/// assert!(!guest.privileged);
/// assert!(Actor::privileged(RequesterId::new(2)).privileged);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The acting requester.
    pub id: RequesterId,
    /// Whether the actor may act on any reservation.
    pub privileged: bool,
}

impl Actor {
    /// An ordinary requester.
    #[must_use]
    pub const fn new(id: RequesterId) -> Self {
        Self {
            id,
            privileged: false,
        }
    }

    /// A privileged actor.
    #[must_use]
    pub const fn privileged(id: RequesterId) -> Self {
        Self {
            id,
            privileged: true,
        }
    }

    /// Whether the actor may see or modify `reservation`.
    #[must_use]
    pub fn can_access(&self, reservation: &Reservation) -> bool {
        self.privileged || reservation.requester_id() == self.id
    }
}

/// Booking operations over one database connection.
#[derive(Debug)]
pub struct ReservationEngine {
    db: Database,
}

impl ReservationEngine {
    /// Wraps an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens the database described by `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Returns the underlying database.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Returns the underlying database mutably.
    pub fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }
}

/// Recomputes a resource's flag from its confirmed reservations.
///
/// Must run inside the transaction that changed those reservations.
/// Returns the new flag.
pub(crate) fn refresh_availability(
    conn: &Connection,
    resource_id: ResourceId,
    now: DateTime<Utc>,
) -> Result<bool> {
    let confirmed = Database::count_confirmed_for_resource(conn, resource_id)?;
    let available = confirmed == 0;
    Database::set_resource_available(conn, resource_id, available, now)?;
    log::debug!(
        "resource {resource_id}: {confirmed} confirmed reservation(s), available={available}"
    );
    Ok(available)
}
