//! Store accessors for resources.
//!
//! Every accessor takes a `&Connection`, so it runs equally against the
//! plain connection or inside a transaction.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::engine::query::ResourceFilter;
use crate::error::Result;
use crate::resource::{NewResource, Resource, ResourceId};

use super::connection::Database;
use super::rows::{decimal_column, escape_like, timestamp_column, to_millis};

/// Expects columns: id, brand, model, description, `price_per_day`, available,
/// `created_at`, `updated_at`.
fn row_to_resource(row: &rusqlite::Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: ResourceId::new(row.get(0)?),
        brand: row.get(1)?,
        model: row.get(2)?,
        description: row.get(3)?,
        price_per_day: decimal_column(row, 4)?,
        available: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

const INSERT_RESOURCE: &str = r"
    INSERT INTO resources (brand, model, description, price_per_day, available, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)
";

const SELECT_RESOURCE: &str = r"
    SELECT id, brand, model, description, price_per_day, available, created_at, updated_at
    FROM resources
    WHERE id = ?
";

const UPDATE_RESOURCE: &str = r"
    UPDATE resources
    SET brand = ?2, model = ?3, description = ?4, price_per_day = ?5, updated_at = ?6
    WHERE id = ?1
";

const UPDATE_AVAILABLE: &str = r"
    UPDATE resources
    SET available = ?2, updated_at = ?3
    WHERE id = ?1
";

const DELETE_RESOURCE: &str = "DELETE FROM resources WHERE id = ?";

// ?1 model query, ?2 availability, ?3/?4 price bounds (both or neither)
const RESOURCE_FILTER: &str = r"
    WHERE (?1 IS NULL OR model LIKE '%' || ?1 || '%' ESCAPE '\')
      AND (?2 IS NULL OR available = ?2)
      AND (?3 IS NULL OR ?4 IS NULL
           OR CAST(price_per_day AS REAL) BETWEEN CAST(?3 AS REAL) AND CAST(?4 AS REAL))
";

impl Database {
    /// Inserts a resource, initially available.
    ///
    /// Brand and model are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_resource(
        conn: &Connection,
        resource: &NewResource,
        now: DateTime<Utc>,
    ) -> Result<Resource> {
        let brand = resource.brand.trim().to_string();
        let model = resource.model.trim().to_string();
        conn.execute(
            INSERT_RESOURCE,
            params![
                brand,
                model,
                resource.description,
                resource.price_per_day.to_string(),
                to_millis(now),
            ],
        )?;

        Ok(Resource {
            id: ResourceId::new(conn.last_insert_rowid()),
            brand,
            model,
            description: resource.description.clone(),
            price_per_day: resource.price_per_day,
            available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetches a resource by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_resource(conn: &Connection, id: ResourceId) -> Result<Option<Resource>> {
        Ok(conn
            .query_row(SELECT_RESOURCE, [id.value()], row_to_resource)
            .optional()?)
    }

    /// Writes a resource's descriptive fields and rate.
    ///
    /// The availability flag is not written. Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_resource_row(conn: &Connection, resource: &Resource) -> Result<bool> {
        let changed = conn.execute(
            UPDATE_RESOURCE,
            params![
                resource.id.value(),
                resource.brand,
                resource.model,
                resource.description,
                resource.price_per_day.to_string(),
                to_millis(resource.updated_at),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Writes the availability flag. Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_resource_available(
        conn: &Connection,
        id: ResourceId,
        available: bool,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = conn.execute(
            UPDATE_AVAILABLE,
            params![id.value(), available, to_millis(now)],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a resource; its reservations go with it.
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_resource_row(conn: &Connection, id: ResourceId) -> Result<bool> {
        Ok(conn.execute(DELETE_RESOURCE, [id.value()])? > 0)
    }

    /// Lists resources matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_resources(
        conn: &Connection,
        filter: &ResourceFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Resource>> {
        let sql = format!(
            "SELECT id, brand, model, description, price_per_day, available, created_at, updated_at
             FROM resources {RESOURCE_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT ?5 OFFSET ?6"
        );
        let (query, available, min, max) = filter_params(filter);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&sql)?;
        let resources = stmt
            .query_map(
                params![query, available, min, max, limit, offset],
                row_to_resource,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(resources)
    }

    /// Counts resources matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_resources(conn: &Connection, filter: &ResourceFilter) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM resources {RESOURCE_FILTER}");
        let (query, available, min, max) = filter_params(filter);
        let count: i64 = conn.query_row(&sql, params![query, available, min, max], |row| {
            row.get(0)
        })?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

type FilterParams = (Option<String>, Option<bool>, Option<String>, Option<String>);

fn filter_params(filter: &ResourceFilter) -> FilterParams {
    let (min, max) = filter
        .price_bounds()
        .map_or((None, None), |(min, max)| {
            (Some(min.to_string()), Some(max.to_string()))
        });
    (filter.query().map(escape_like), filter.available, min, max)
}
