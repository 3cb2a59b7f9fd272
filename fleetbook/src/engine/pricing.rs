//! Price computation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::reservation::DateRange;

/// Total price for `dates` at `price_per_day`: nights times rate, rounded
/// half away from zero to cents.
///
/// # Errors
///
/// Returns a validation error if the product does not fit a decimal.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fleetbook::{total_price, DateRange};
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let dates = DateRange::new(d(1), d(3)).unwrap();
/// assert_eq!(total_price(dates, Decimal::new(50, 0)).unwrap(), Decimal::new(100, 0));
/// ```
pub fn total_price(dates: DateRange, price_per_day: Decimal) -> Result<Decimal> {
    Decimal::from(dates.nights())
        .checked_mul(price_per_day)
        .map(|total| total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| Error::Validation {
            field: "total_price".into(),
            message: format!("{} nights at {price_per_day} overflows", dates.nights()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn range(nights: u64) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DateRange::new(start, start + Days::new(nights)).unwrap()
    }

    #[test]
    fn test_two_nights() {
        assert_eq!(
            total_price(range(2), Decimal::new(50, 0)).unwrap(),
            Decimal::new(100, 0)
        );
    }

    #[test]
    fn test_rounds_to_cents() {
        // 3 * 33.335 = 100.005
        assert_eq!(
            total_price(range(3), Decimal::new(33_335, 3)).unwrap(),
            Decimal::new(10_001, 2)
        );
    }

    #[test]
    fn test_free_resource() {
        assert_eq!(total_price(range(7), Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(total_price(range(10), Decimal::MAX).is_err());
    }

    proptest! {
        #[test]
        fn price_is_nights_times_rate(nights in 1u64..400, cents in 0i64..1_000_000) {
            let rate = Decimal::new(cents, 2);
            let total = total_price(range(nights), rate).unwrap();
            prop_assert_eq!(total, Decimal::from(nights) * rate);
            prop_assert!(total.scale() <= 2);
        }
    }
}
