//! The cancel operation.

use chrono::Utc;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::{refresh_availability, Actor, ReservationEngine};

impl ReservationEngine {
    /// Cancels a reservation.
    ///
    /// The actor must own the reservation or be privileged. Cancelling an
    /// already cancelled reservation returns it unchanged. Otherwise the
    /// status becomes `Cancelled` and the resource is flagged available
    /// again once no confirmed reservation references it, all in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, or [`Error::TransientStore`] when the
    /// write lock could not be taken in time.
    pub fn cancel(&mut self, id: ReservationId, actor: &Actor) -> Result<Reservation> {
        let tx = self.db.begin_transaction()?;

        let mut reservation =
            Database::get_reservation(&tx, id)?.ok_or_else(|| Error::reservation_not_found(id))?;

        if !actor.can_access(&reservation) {
            return Err(Error::Forbidden {
                reservation_id: id,
                actor: actor.id,
            });
        }

        if reservation.status() == ReservationStatus::Cancelled {
            log::debug!("reservation {id} already cancelled");
            return Ok(reservation);
        }

        let now = Utc::now();
        Database::set_reservation_status(&tx, id, ReservationStatus::Cancelled, now)?;
        let available = refresh_availability(&tx, reservation.resource_id(), now)?;

        tx.commit()?;

        reservation.status = ReservationStatus::Cancelled;
        reservation.updated_at = now;
        log::info!(
            "cancelled reservation {id} on resource {} (available={available})",
            reservation.resource_id()
        );
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, date, insert_test_resource};
    use crate::engine::ReserveOptions;
    use crate::reservation::RequesterId;
    use crate::resource::ResourceId;
    use rust_decimal::Decimal;

    fn setup() -> (ReservationEngine, ResourceId) {
        let db = create_test_database();
        let car = insert_test_resource(&db, "Fiat", "Panda", Decimal::TEN);
        (ReservationEngine::new(db), car.id())
    }

    fn book(engine: &mut ReservationEngine, car: ResourceId, who: i64, start: u32, end: u32) -> Reservation {
        engine
            .reserve(&ReserveOptions::new(
                car,
                RequesterId::new(who),
                date(start),
                date(end),
            ))
            .unwrap()
    }

    fn flag(engine: &ReservationEngine, id: ResourceId) -> bool {
        engine.get_resource(id).unwrap().available()
    }

    #[test]
    fn test_owner_cancels_and_flag_returns() {
        let (mut engine, car) = setup();
        let booking = book(&mut engine, car, 1, 1, 3);

        let cancelled = engine
            .cancel(booking.id(), &Actor::new(RequesterId::new(1)))
            .unwrap();
        assert_eq!(cancelled.status(), ReservationStatus::Cancelled);
        assert!(flag(&engine, car));
    }

    #[test]
    fn test_flag_stays_off_while_others_confirmed() {
        let (mut engine, car) = setup();
        let first = book(&mut engine, car, 1, 1, 3);
        book(&mut engine, car, 2, 5, 7);

        engine
            .cancel(first.id(), &Actor::new(RequesterId::new(1)))
            .unwrap();
        assert!(!flag(&engine, car));
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let (mut engine, car) = setup();
        let booking = book(&mut engine, car, 1, 1, 3);
        let actor = Actor::new(RequesterId::new(1));

        let once = engine.cancel(booking.id(), &actor).unwrap();
        let twice = engine.cancel(booking.id(), &actor).unwrap();
        assert_eq!(twice.status(), ReservationStatus::Cancelled);
        assert_eq!(
            once.updated_at().timestamp_millis(),
            twice.updated_at().timestamp_millis()
        );
        assert!(flag(&engine, car));
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let (mut engine, car) = setup();
        let booking = book(&mut engine, car, 1, 1, 3);

        let err = engine
            .cancel(booking.id(), &Actor::new(RequesterId::new(2)))
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
        assert!(engine.get(booking.id()).unwrap().is_confirmed());
    }

    #[test]
    fn test_privileged_may_cancel_any() {
        let (mut engine, car) = setup();
        let booking = book(&mut engine, car, 1, 1, 3);

        engine
            .cancel(booking.id(), &Actor::privileged(RequesterId::new(99)))
            .unwrap();
        assert!(flag(&engine, car));
    }

    #[test]
    fn test_cancel_missing() {
        let (mut engine, _) = setup();
        let err = engine
            .cancel(ReservationId::new(5), &Actor::privileged(RequesterId::new(1)))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 5, .. }));
    }

    #[test]
    fn test_cancelled_dates_can_be_rebooked() {
        let (mut engine, car) = setup();
        let booking = book(&mut engine, car, 1, 1, 3);
        engine
            .cancel(booking.id(), &Actor::new(RequesterId::new(1)))
            .unwrap();

        let again = book(&mut engine, car, 2, 1, 3);
        assert!(again.is_confirmed());
        assert!(!flag(&engine, car));
    }
}
