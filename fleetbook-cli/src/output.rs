//! Rendering of records and pages as table, JSON or CSV.

use std::io::Write;

use fleetbook::{OutputFormat, Page, Reservation, Resource};
use serde::Serialize;

use crate::error::CliError;
use crate::utils::format_timestamp;

/// A record with a fixed column layout.
pub trait Tabular {
    /// Column names, lowercase.
    const HEADERS: &'static [&'static str];

    /// One cell per header.
    fn cells(&self) -> Vec<String>;
}

impl Tabular for Reservation {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "resource",
        "requester",
        "start",
        "end",
        "status",
        "total",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.resource_id().to_string(),
            self.requester_id().to_string(),
            self.start_date().to_string(),
            self.end_date().to_string(),
            self.status().to_string(),
            self.total_price().to_string(),
            format_timestamp(self.created_at()),
        ]
    }
}

impl Tabular for Resource {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "brand",
        "model",
        "price_per_day",
        "available",
        "description",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.brand().to_string(),
            self.model().to_string(),
            self.price_per_day().to_string(),
            self.available().to_string(),
            self.description().unwrap_or("").to_string(),
        ]
    }
}

/// Print a single record.
pub fn print_record<T: Tabular + Serialize>(record: &T, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            let width = T::HEADERS.iter().map(|h| h.len()).max().unwrap_or(0);
            for (header, cell) in T::HEADERS.iter().zip(record.cells()) {
                let cell = if cell.is_empty() { "-".to_string() } else { cell };
                writeln!(handle, "{header:<width$}  {cell}")?;
            }
        }
        OutputFormat::Json => write_json(&mut handle, record)?,
        OutputFormat::Csv => write_csv(handle, std::slice::from_ref(record))?,
    }

    Ok(())
}

/// Print one page of a listing.
///
/// Table output ends with a page summary line; JSON emits the whole page
/// envelope; CSV carries only the rows.
pub fn print_page<T: Tabular + Serialize>(page: &Page<T>, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            write_table(&mut handle, &page.data)?;
            writeln!(
                handle,
                "page {} of {} ({} total)",
                page.page, page.total_pages, page.total
            )?;
        }
        OutputFormat::Json => write_json(&mut handle, page)?,
        OutputFormat::Csv => write_csv(handle, &page.data)?,
    }

    Ok(())
}

fn write_table<T: Tabular>(out: &mut impl Write, rows: &[T]) -> Result<(), CliError> {
    let header_line = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for row in rows {
        let cells: Vec<String> = row
            .cells()
            .into_iter()
            .map(|c| if c.is_empty() { "-".to_string() } else { c })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(out)?;
    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn write_csv<T: Tabular>(out: impl Write, rows: &[T]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(T::HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}
