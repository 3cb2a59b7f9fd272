//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::query::DEFAULT_PAGE_SIZE;

/// Lock wait used when nothing configures one.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial sources can be layered; the
/// accessors apply the built-in defaults.
///
/// # Examples
///
/// ```
/// use fleetbook::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str("output_format: json\n").unwrap();
/// assert_eq!(config.output_format(), OutputFormat::Json);
/// assert_eq!(config.page_size(), 10);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time a writer waits for the database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Page size for listings when the caller gives none.
    pub default_page_size: Option<u32>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Refuse to create a missing database implicitly.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// The built-in defaults with every field set.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            default_page_size: Some(DEFAULT_PAGE_SIZE),
            output_format: Some(OutputFormat::Table),
            disable_autoinit: Some(false),
        }
    }

    /// The lock wait as a duration.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// The default listing page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// The listing output format.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Whether implicit database creation is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use fleetbook::config::OutputFormat;
///
/// let format: OutputFormat = "csv".parse().unwrap();
/// assert_eq!(format, OutputFormat::Csv);
/// assert_eq!(format.to_string(), "csv");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("invalid output format: {s} (expected table, json or csv)")),
        }
    }
}
