//! Reservation types.
//!
//! This module provides the reservation record, its identifiers, its status
//! lifecycle and the half-open [`DateRange`] the overlap rule is defined on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceId;

/// Stable identifier of a reservation, assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the authenticated party a reservation is made for.
///
/// Requesters are owned by an external account system; the engine only
/// stores and compares the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequesterId(i64);

impl RequesterId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reservation.
///
/// `Cancelled` is terminal.
///
/// # Examples
///
/// ```
/// use fleetbook::ReservationStatus;
///
/// let status: ReservationStatus = "cancelled".parse().unwrap();
/// assert_eq!(status, ReservationStatus::Cancelled);
/// assert_eq!(status.to_string(), "Cancelled");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// The reservation holds the resource for its date range.
    Confirmed,
    /// The reservation was cancelled and no longer holds anything.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the persisted spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }
}

/// A half-open range of calendar dates `[start, end)`.
///
/// The end date is the return day and is not occupied, so a range ending on
/// a date never overlaps a range starting on it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fleetbook::DateRange;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
///
/// let first = DateRange::new(d(1), d(3)).unwrap();
/// let overlapping = DateRange::new(d(2), d(4)).unwrap();
/// let adjacent = DateRange::new(d(3), d(5)).unwrap();
///
/// assert!(first.overlaps(&overlapping));
/// assert!(!first.overlaps(&adjacent));
/// assert_eq!(first.nights(), 2);
///
/// assert!(DateRange::new(d(3), d(3)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, or `None` unless `start < end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// First occupied day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Return day, not occupied.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// `self.start < other.end && other.start < self.end`
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of nights between the dates, at least 1.
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A booking of one resource by one requester for a date range.
///
/// Reservations are only created by the engine; the total price is fixed at
/// creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub(crate) id: ReservationId,
    pub(crate) resource_id: ResourceId,
    pub(crate) requester_id: RequesterId,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) status: ReservationStatus,
    pub(crate) total_price: Decimal,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the booked resource.
    #[must_use]
    pub const fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Returns the requester the reservation belongs to.
    #[must_use]
    pub const fn requester_id(&self) -> RequesterId {
        self.requester_id
    }

    /// Returns the first occupied day.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the return day.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the booked dates as a range.
    #[must_use]
    pub const fn dates(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true while the reservation holds its resource.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    /// Returns the price locked in at creation.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// A validation error for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;
