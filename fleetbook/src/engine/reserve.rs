//! The reserve operation.

use chrono::{NaiveDate, Utc};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{DateRange, RequesterId, Reservation};
use crate::resource::ResourceId;

use super::pricing::total_price;
use super::ReservationEngine;

/// Parameters of a reserve request.
///
/// The requester is assumed to be authenticated already.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveOptions {
    /// The resource to book.
    pub resource_id: ResourceId,
    /// Who the booking is for.
    pub requester_id: RequesterId,
    /// First occupied day.
    pub start: NaiveDate,
    /// Return day, not occupied.
    pub end: NaiveDate,
}

impl ReserveOptions {
    /// Creates the request.
    #[must_use]
    pub const fn new(
        resource_id: ResourceId,
        requester_id: RequesterId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            resource_id,
            requester_id,
            start,
            end,
        }
    }
}

impl ReservationEngine {
    /// Books a resource for a date range.
    ///
    /// Within one immediate transaction:
    /// 1. the resource must exist (`NotFound`)
    /// 2. `start < end` must hold (`InvalidRange`)
    /// 3. a resource whose flag is off while it holds no confirmed
    ///    reservation has been withdrawn (`ResourceUnavailable`)
    /// 4. no confirmed reservation on the resource may overlap the range
    ///    (`Conflict`); this check decides, the flag does not
    /// 5. the price is fixed at nights times the current daily rate
    /// 6. the reservation is stored as confirmed and the flag turned off
    ///
    /// Nothing is written unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns the domain errors above, or [`Error::TransientStore`] when
    /// the write lock could not be taken in time.
    pub fn reserve(&mut self, options: &ReserveOptions) -> Result<Reservation> {
        let tx = self.db.begin_transaction()?;

        let resource = Database::get_resource(&tx, options.resource_id)?
            .ok_or_else(|| Error::resource_not_found(options.resource_id))?;

        let dates = DateRange::new(options.start, options.end).ok_or(Error::InvalidRange {
            start: options.start,
            end: options.end,
        })?;

        if !resource.available() {
            let confirmed = Database::count_confirmed_for_resource(&tx, resource.id())?;
            if confirmed == 0 {
                log::debug!("resource {} is withdrawn", resource.id());
                return Err(Error::ResourceUnavailable {
                    resource_id: resource.id(),
                });
            }
            log::debug!(
                "resource {} flagged unavailable with {confirmed} confirmed reservation(s), checking dates",
                resource.id()
            );
        }

        if let Some(conflicting) = Database::find_overlapping_confirmed(&tx, resource.id(), dates)? {
            log::debug!(
                "{dates} on resource {} overlaps reservation {conflicting}",
                resource.id()
            );
            return Err(Error::Conflict {
                resource_id: resource.id(),
                conflicting,
            });
        }

        let price = total_price(dates, resource.price_per_day())?;
        let now = Utc::now();
        let reservation = Database::insert_reservation(
            &tx,
            resource.id(),
            options.requester_id,
            dates,
            price,
            now,
        )?;

        if resource.available() {
            Database::set_resource_available(&tx, resource.id(), false, now)?;
        }

        tx.commit()?;

        log::info!(
            "reserved resource {} for requester {} ({dates}, total {price}) as reservation {}",
            resource.id(),
            options.requester_id,
            reservation.id()
        );
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, date, insert_test_resource};
    use crate::reservation::ReservationStatus;
    use rust_decimal::Decimal;

    fn engine_with_car(price: Decimal) -> (ReservationEngine, ResourceId) {
        let db = create_test_database();
        let car = insert_test_resource(&db, "Toyota", "Corolla", price);
        (ReservationEngine::new(db), car.id())
    }

    fn request(resource: ResourceId, requester: i64, start: u32, end: u32) -> ReserveOptions {
        ReserveOptions::new(resource, RequesterId::new(requester), date(start), date(end))
    }

    fn flag(engine: &ReservationEngine, id: ResourceId) -> bool {
        Database::get_resource(engine.db().connection(), id)
            .unwrap()
            .unwrap()
            .available()
    }

    #[test]
    fn test_reserve_confirms_and_prices() {
        let (mut engine, car) = engine_with_car(Decimal::new(50, 0));

        let booking = engine.reserve(&request(car, 1, 1, 3)).unwrap();
        assert_eq!(booking.status(), ReservationStatus::Confirmed);
        assert_eq!(booking.total_price(), Decimal::new(100, 0));
        assert!(!flag(&engine, car));
    }

    #[test]
    fn test_reserve_missing_resource() {
        let (mut engine, _) = engine_with_car(Decimal::TEN);
        let err = engine
            .reserve(&request(ResourceId::new(99), 1, 1, 3))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 99, .. }));
    }

    #[test]
    fn test_not_found_checked_before_range() {
        let (mut engine, _) = engine_with_car(Decimal::TEN);
        let err = engine
            .reserve(&request(ResourceId::new(99), 1, 3, 1))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_reserve_rejects_empty_and_inverted_ranges() {
        let (mut engine, car) = engine_with_car(Decimal::TEN);
        for (start, end) in [(3, 3), (5, 2)] {
            let err = engine.reserve(&request(car, 1, start, end)).unwrap_err();
            assert!(matches!(err, Error::InvalidRange { .. }));
        }
        assert!(flag(&engine, car));
    }

    #[test]
    fn test_overlap_conflicts_and_writes_nothing() {
        let (mut engine, car) = engine_with_car(Decimal::TEN);
        let first = engine.reserve(&request(car, 1, 1, 3)).unwrap();

        let err = engine.reserve(&request(car, 2, 2, 4)).unwrap_err();
        match err {
            Error::Conflict { conflicting, .. } => assert_eq!(conflicting, first.id()),
            other => panic!("expected Conflict, got {other:?}"),
        }

        let total = Database::count_reservations(
            engine.db().connection(),
            &super::super::ReservationFilter::default(),
        )
        .unwrap();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_adjacent_range_succeeds_despite_flag() {
        let (mut engine, car) = engine_with_car(Decimal::TEN);
        engine.reserve(&request(car, 1, 1, 3)).unwrap();
        assert!(!flag(&engine, car));

        let second = engine.reserve(&request(car, 2, 3, 5)).unwrap();
        assert_eq!(second.start_date(), date(3));
        assert!(!flag(&engine, car));
    }

    #[test]
    fn test_withdrawn_resource_is_unavailable() {
        let (mut engine, car) = engine_with_car(Decimal::TEN);
        Database::set_resource_available(engine.db().connection(), car, false, Utc::now())
            .unwrap();

        let err = engine.reserve(&request(car, 1, 1, 3)).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { resource_id } if resource_id == car));
    }

    #[test]
    fn test_price_locked_at_reservation_time() {
        let (mut engine, car) = engine_with_car(Decimal::new(50, 0));
        let booking = engine.reserve(&request(car, 1, 1, 3)).unwrap();

        engine
            .update_resource(
                car,
                &crate::ResourceUpdate {
                    price_per_day: Some(Decimal::new(80, 0)),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = engine.get(booking.id()).unwrap();
        assert_eq!(stored.total_price(), Decimal::new(100, 0));
    }
}
