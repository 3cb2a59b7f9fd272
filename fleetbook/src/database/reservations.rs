//! Store accessors for reservations.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::engine::query::ReservationFilter;
use crate::error::Result;
use crate::reservation::{DateRange, RequesterId, Reservation, ReservationId, ReservationStatus};
use crate::resource::ResourceId;

use super::connection::Database;
use super::rows::{decimal_column, timestamp_column, to_millis};

/// Expects columns in `RESERVATION_COLUMNS` order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let status: String = row.get(5)?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        resource_id: ResourceId::new(row.get(1)?),
        requester_id: RequesterId::new(row.get(2)?),
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        status,
        total_price: decimal_column(row, 6)?,
        created_at: timestamp_column(row, 7)?,
        updated_at: timestamp_column(row, 8)?,
    })
}

const RESERVATION_COLUMNS: &str = "id, resource_id, requester_id, start_date, end_date, status, total_price, created_at, updated_at";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
        (resource_id, requester_id, start_date, end_date, status, total_price, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, 'Confirmed', ?5, ?6, ?6)
";

// Half-open overlap: existing.start < new.end AND new.start < existing.end
const SELECT_OVERLAPPING: &str = r"
    SELECT id FROM reservations
    WHERE resource_id = ?1
      AND status = 'Confirmed'
      AND start_date < ?3
      AND ?2 < end_date
    ORDER BY start_date, id
    LIMIT 1
";

const COUNT_CONFIRMED: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE resource_id = ? AND status = 'Confirmed'
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?2, updated_at = ?3
    WHERE id = ?1
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

const RESERVATION_FILTER: &str = r"
    WHERE (?1 IS NULL OR resource_id = ?1)
      AND (?2 IS NULL OR requester_id = ?2)
      AND (?3 IS NULL OR status = ?3)
";

impl Database {
    /// Inserts a confirmed reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the resource
    /// does not exist.
    pub fn insert_reservation(
        conn: &Connection,
        resource_id: ResourceId,
        requester_id: RequesterId,
        dates: DateRange,
        total_price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Reservation> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                resource_id.value(),
                requester_id.value(),
                dates.start(),
                dates.end(),
                total_price.to_string(),
                to_millis(now),
            ],
        )?;

        Ok(Reservation {
            id: ReservationId::new(conn.last_insert_rowid()),
            resource_id,
            requester_id,
            start_date: dates.start(),
            end_date: dates.end(),
            status: ReservationStatus::Confirmed,
            total_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?)
    }

    /// Finds a confirmed reservation on `resource_id` overlapping `dates`.
    ///
    /// Returns the earliest such reservation, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping_confirmed(
        conn: &Connection,
        resource_id: ResourceId,
        dates: DateRange,
    ) -> Result<Option<ReservationId>> {
        Ok(conn
            .query_row(
                SELECT_OVERLAPPING,
                params![resource_id.value(), dates.start(), dates.end()],
                |row| row.get(0).map(ReservationId::new),
            )
            .optional()?)
    }

    /// Counts confirmed reservations on a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_confirmed_for_resource(conn: &Connection, resource_id: ResourceId) -> Result<u64> {
        let count: i64 = conn.query_row(COUNT_CONFIRMED, [resource_id.value()], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Writes a reservation's status. Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = conn.execute(
            UPDATE_STATUS,
            params![id.value(), status.as_str(), to_millis(now)],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a reservation row. Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_row(conn: &Connection, id: ReservationId) -> Result<bool> {
        Ok(conn.execute(DELETE_RESERVATION, [id.value()])? > 0)
    }

    /// Lists reservations matching `filter`, newest first with ties broken
    /// by descending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations {RESERVATION_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT ?4 OFFSET ?5"
        );
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(
                params![
                    filter.resource_id.map(ResourceId::value),
                    filter.requester_id.map(RequesterId::value),
                    filter.status.map(ReservationStatus::as_str),
                    limit,
                    offset,
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Counts reservations matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservations(conn: &Connection, filter: &ReservationFilter) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM reservations {RESERVATION_FILTER}");
        let count: i64 = conn.query_row(
            &sql,
            params![
                filter.resource_id.map(ResourceId::value),
                filter.requester_id.map(RequesterId::value),
                filter.status.map(ReservationStatus::as_str),
            ],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
