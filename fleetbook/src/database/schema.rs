//! Database schema definitions and SQL constants.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value table holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Bookable resources.
///
/// `price_per_day` holds a canonical decimal string; `available` is the
/// engine-maintained flag (0/1). Timestamps are Unix milliseconds.
pub const CREATE_RESOURCES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS resources (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL,
        model TEXT NOT NULL,
        description TEXT,
        price_per_day TEXT NOT NULL,
        available INTEGER NOT NULL DEFAULT 1,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Reservations.
///
/// Dates are ISO `YYYY-MM-DD` text so that string comparison orders them
/// chronologically. Removing a resource removes its reservations.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        resource_id INTEGER NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
        requester_id INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Confirmed'
            CHECK (status IN ('Confirmed', 'Cancelled')),
        total_price TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (start_date < end_date)
    )";

/// Serves the overlap check and the active-count recompute.
pub const CREATE_RESOURCE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_resource_status ON reservations(resource_id, status)";

/// Serves per-requester listings.
pub const CREATE_REQUESTER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_requester ON reservations(requester_id)";

/// Serves newest-first pagination.
pub const CREATE_CREATED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_created ON reservations(created_at, id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
