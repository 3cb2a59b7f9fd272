//! Bookable resource types.
//!
//! A resource is a car with a daily rate and an availability flag. The flag
//! is owned by the reservation engine; administrative code only creates,
//! edits and removes resources.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Stable identifier of a resource, assigned by the store at creation.
///
/// # Examples
///
/// ```
/// use fleetbook::ResourceId;
///
/// let id = ResourceId::new(1);
/// assert_eq!(id.value(), 1);
/// assert_eq!(id.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
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

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub(crate) id: ResourceId,
    pub(crate) brand: String,
    pub(crate) model: String,
    pub(crate) description: Option<String>,
    pub(crate) price_per_day: Decimal,
    pub(crate) available: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Resource {
    /// Returns the resource identifier.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the manufacturer.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the optional free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current daily rate.
    #[must_use]
    pub const fn price_per_day(&self) -> Decimal {
        self.price_per_day
    }

    /// Returns the cached availability flag.
    ///
    /// `false` while at least one confirmed reservation references the
    /// resource, or after an administrative withdrawal.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
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

/// Input for creating a resource.
///
/// # Examples
///
/// ```
/// use fleetbook::NewResource;
/// use rust_decimal::Decimal;
///
/// let car = NewResource::new("Toyota", "Corolla", Decimal::new(5000, 2))
///     .with_description(Some("Compact, automatic".to_string()));
/// assert!(car.validate().is_ok());
///
/// let negative = NewResource::new("Toyota", "Corolla", Decimal::new(-1, 0));
/// assert!(negative.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    /// Manufacturer.
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Optional description.
    pub description: Option<String>,
    /// Daily rate, non-negative.
    pub price_per_day: Decimal,
}

impl NewResource {
    /// Creates the input with no description.
    #[must_use]
    pub fn new(brand: impl Into<String>, model: impl Into<String>, price_per_day: Decimal) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            description: None,
            price_per_day,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Checks that names are non-blank and the rate is non-negative.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("brand", &self.brand)?;
        validate_name("model", &self.model)?;
        validate_price(self.price_per_day)
    }
}

/// A partial update of a resource's descriptive fields and rate.
///
/// The availability flag is not part of an update; see
/// [`ReservationEngine::set_availability_override`](crate::ReservationEngine::set_availability_override).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceUpdate {
    /// New manufacturer.
    pub brand: Option<String>,
    /// New model name.
    pub model: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New daily rate. Existing reservations keep their price.
    pub price_per_day: Option<Decimal>,
}

impl ResourceUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.description.is_none()
            && self.price_per_day.is_none()
    }

    /// Validates the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref brand) = self.brand {
            validate_name("brand", brand)?;
        }
        if let Some(ref model) = self.model {
            validate_name("model", model)?;
        }
        if let Some(price) = self.price_per_day {
            validate_price(price)?;
        }
        Ok(())
    }

    pub(crate) fn apply_to(&self, resource: &mut Resource) {
        if let Some(ref brand) = self.brand {
            resource.brand = brand.trim().to_string();
        }
        if let Some(ref model) = self.model {
            resource.model = model.trim().to_string();
        }
        if let Some(ref description) = self.description {
            resource.description.clone_from(description);
        }
        if let Some(price) = self.price_per_day {
            resource.price_per_day = price;
        }
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty after trimming whitespace"),
        });
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError {
            field: "price_per_day".into(),
            message: format!("price must be non-negative, got {price}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resource_validation() {
        assert!(NewResource::new("Fiat", "Panda", Decimal::ZERO)
            .validate()
            .is_ok());

        let err = NewResource::new("  ", "Panda", Decimal::ONE)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "brand");

        let err = NewResource::new("Fiat", "", Decimal::ONE)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "model");

        let err = NewResource::new("Fiat", "Panda", Decimal::new(-150, 2))
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "price_per_day");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(ResourceUpdate::default().is_empty());
        let update = ResourceUpdate {
            price_per_day: Some(Decimal::TEN),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_apply_keeps_flag() {
        let now = Utc::now();
        let mut resource = Resource {
            id: ResourceId::new(1),
            brand: "Fiat".into(),
            model: "Panda".into(),
            description: Some("old".into()),
            price_per_day: Decimal::TEN,
            available: false,
            created_at: now,
            updated_at: now,
        };

        let update = ResourceUpdate {
            model: Some(" 500 ".into()),
            description: Some(None),
            price_per_day: Some(Decimal::new(4250, 2)),
            ..Default::default()
        };
        update.apply_to(&mut resource);

        assert_eq!(resource.model(), "500");
        assert_eq!(resource.description(), None);
        assert_eq!(resource.price_per_day(), Decimal::new(4250, 2));
        assert!(!resource.available());
    }

    #[test]
    fn test_resource_id_serializes_transparently() {
        let json = serde_json::to_string(&ResourceId::new(12)).unwrap();
        assert_eq!(json, "12");
    }
}
