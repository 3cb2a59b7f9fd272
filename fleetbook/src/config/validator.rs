//! Configuration validation.

use crate::config::schema::Config;
use crate::engine::query::MAX_PAGE_SIZE;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use fleetbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { default_page_size: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(size) = config.default_page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                return Err(Error::Validation {
                    field: "default_page_size".into(),
                    message: format!("Page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
                });
            }
        }

        Ok(())
    }
}
