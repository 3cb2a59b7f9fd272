//! Error types for the fleetbook library.
//!
//! Every engine operation reports failures through [`Error`]. The first group
//! of variants is the domain taxonomy callers translate into protocol
//! responses; the remainder covers storage, configuration and I/O.

use chrono::NaiveDate;
use thiserror::Error;

use crate::reservation::{RequesterId, ReservationId};
use crate::resource::ResourceId;

/// Result type alias for operations that may fail with a fleetbook error.
///
/// # Examples
///
/// ```
/// use fleetbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of record a [`Error::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A bookable resource.
    Resource,
    /// A reservation.
    Reservation,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Reservation => write!(f, "reservation"),
        }
    }
}

/// The main error type for the fleetbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource or reservation does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Which kind of record was looked up.
        entity: Entity,
        /// The identifier that was not found.
        id: i64,
    },

    /// The start date is not strictly before the end date.
    #[error("invalid date range {start}..{end}: start must be before end")]
    InvalidRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The resource has been withdrawn from booking.
    #[error("resource {resource_id} is not available for booking")]
    ResourceUnavailable {
        /// The withdrawn resource.
        resource_id: ResourceId,
    },

    /// The requested dates overlap a confirmed reservation.
    #[error("resource {resource_id} is already booked for these dates (reservation {conflicting})")]
    Conflict {
        /// The resource being reserved.
        resource_id: ResourceId,
        /// The confirmed reservation that overlaps the request.
        conflicting: ReservationId,
    },

    /// The actor neither owns the reservation nor is privileged.
    #[error("requester {actor} is not allowed to modify reservation {reservation_id}")]
    Forbidden {
        /// The reservation the actor tried to act on.
        reservation_id: ReservationId,
        /// The acting requester.
        actor: RequesterId,
    },

    /// The store aborted the transaction (lock contention, busy database).
    ///
    /// Nothing was written. Callers may retry.
    #[error("transient store failure: {source}")]
    TransientStore {
        /// The underlying store error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if is_contention(&err) {
            Self::TransientStore { source: err }
        } else {
            Self::Database(err)
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

/// Returns true for `SQLITE_BUSY` and `SQLITE_LOCKED` failures.
fn is_contention(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            )
    )
}

impl Error {
    /// Check if the failure is transient and the operation may be retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetbook::Error;
    ///
    /// let busy = rusqlite::Error::SqliteFailure(
    ///     rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
    ///     None,
    /// );
    /// assert!(Error::from(busy).is_transient());
    /// ```
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientStore { .. })
    }

    /// Check if the error is one of the domain refusals
    /// (`NotFound`, `InvalidRange`, `ResourceUnavailable`, `Conflict`, `Forbidden`).
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidRange { .. }
                | Self::ResourceUnavailable { .. }
                | Self::Conflict { .. }
                | Self::Forbidden { .. }
        )
    }

    pub(crate) fn resource_not_found(id: ResourceId) -> Self {
        Self::NotFound {
            entity: Entity::Resource,
            id: id.value(),
        }
    }

    pub(crate) fn reservation_not_found(id: ReservationId) -> Self {
        Self::NotFound {
            entity: Entity::Reservation,
            id: id.value(),
        }
    }
}
