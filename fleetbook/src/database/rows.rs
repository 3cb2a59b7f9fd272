//! Column encodings shared by the row mappers.
//!
//! Timestamps are stored as Unix milliseconds and money as canonical decimal
//! text. Failures to decode surface as `FromSqlConversionFailure` so they
//! flow through the normal `rusqlite` error path.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rust_decimal::Decimal;

/// Converts a timestamp to Unix milliseconds for storage.
pub(super) fn to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Reads a Unix-millisecond column as a UTC timestamp.
pub(super) fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {millis}").into(),
        )
    })
}

/// Reads a decimal text column.
pub(super) fn decimal_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
pub(super) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
