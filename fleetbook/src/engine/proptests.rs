//! Property-based tests for the engine.
//!
//! Random sequences of reserve and cancel calls run against a real database;
//! after every step the stored state must keep confirmed ranges disjoint and
//! the availability flag equal to "no confirmed reservation".

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Actor, PageRequest, ReservationEngine, ReservationFilter, ReserveOptions};
use crate::database::test_util::{create_test_database, insert_test_resource};
use crate::database::Database;
use crate::reservation::{RequesterId, ReservationId, ReservationStatus};
use crate::resource::ResourceId;
use crate::Error;

#[derive(Debug, Clone)]
enum Op {
    Reserve {
        car: usize,
        requester: i64,
        offset: u64,
        nights: u64,
    },
    Cancel {
        pick: usize,
        requester: i64,
        privileged: bool,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..2, 1i64..4, 0u64..20, 1u64..6).prop_map(|(car, requester, offset, nights)| {
            Op::Reserve { car, requester, offset, nights }
        }),
        2 => (any::<usize>(), 1i64..4, any::<bool>()).prop_map(|(pick, requester, privileged)| {
            Op::Cancel { pick, requester, privileged }
        }),
    ]
}

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn assert_invariants(engine: &ReservationEngine, cars: &[ResourceId]) -> Result<(), TestCaseError> {
    let conn = engine.db().connection();
    for &car in cars {
        let confirmed = Database::list_reservations(
            conn,
            &ReservationFilter::default()
                .for_resource(car)
                .with_status(ReservationStatus::Confirmed),
            u32::MAX,
            0,
        )
        .unwrap();

        for (i, a) in confirmed.iter().enumerate() {
            for b in &confirmed[i + 1..] {
                prop_assert!(
                    !a.dates().overlaps(&b.dates()),
                    "reservations {} and {} overlap",
                    a.id(),
                    b.id()
                );
            }
        }

        let resource = engine.get_resource(car).unwrap();
        prop_assert_eq!(resource.available(), confirmed.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    #[test]
    fn reserve_cancel_sequences_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let db = create_test_database();
        let cars = [
            insert_test_resource(&db, "Fiat", "Panda", Decimal::new(3000, 2)).id(),
            insert_test_resource(&db, "Fiat", "500", Decimal::new(4500, 2)).id(),
        ];
        let mut engine = ReservationEngine::new(db);
        let mut created: Vec<ReservationId> = Vec::new();

        for op in ops {
            match op {
                Op::Reserve { car, requester, offset, nights } => {
                    let start = base() + Days::new(offset);
                    let request = ReserveOptions::new(
                        cars[car],
                        RequesterId::new(requester),
                        start,
                        start + Days::new(nights),
                    );
                    match engine.reserve(&request) {
                        Ok(reservation) => {
                            prop_assert_eq!(u64::from(reservation.dates().nights()), nights);
                            created.push(reservation.id());
                        }
                        Err(Error::Conflict { .. }) => {}
                        Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                    }
                }
                Op::Cancel { pick, requester, privileged } => {
                    if created.is_empty() {
                        continue;
                    }
                    let id = created[pick % created.len()];
                    let actor = Actor { id: RequesterId::new(requester), privileged };
                    let before = engine.get(id).unwrap();

                    match engine.cancel(id, &actor) {
                        Ok(first) => {
                            prop_assert!(actor.can_access(&before));
                            // A second cancel changes nothing and does not fail
                            let second = engine.cancel(id, &actor).unwrap();
                            prop_assert_eq!(first.status(), ReservationStatus::Cancelled);
                            prop_assert_eq!(second.status(), ReservationStatus::Cancelled);
                            prop_assert_eq!(
                                first.updated_at().timestamp_millis(),
                                second.updated_at().timestamp_millis()
                            );
                        }
                        Err(Error::Forbidden { .. }) => {
                            prop_assert!(!actor.can_access(&before));
                            prop_assert_eq!(engine.get(id).unwrap().status(), before.status());
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                    }
                }
            }
            assert_invariants(&engine, &cars)?;
        }
    }

    #[test]
    fn pages_partition_the_listing(count in 0usize..30, size in 1i64..8) {
        let db = create_test_database();
        let car = insert_test_resource(&db, "Fiat", "Panda", Decimal::ONE).id();
        let mut engine = ReservationEngine::new(db);
        for i in 0..count {
            let start = base() + Days::new(2 * i as u64);
            engine
                .reserve(&ReserveOptions::new(
                    car,
                    RequesterId::new(1),
                    start,
                    start + Days::new(1),
                ))
                .unwrap();
        }

        let filter = ReservationFilter::default();
        let first = engine.list(&filter, PageRequest::new(1, size)).unwrap();
        let mut seen = HashSet::new();
        let mut last_id = None;

        for page in 1..=first.total_pages {
            let page = engine
                .list(&filter, PageRequest::new(i64::try_from(page).unwrap(), size))
                .unwrap();
            prop_assert_eq!(page.total, count as u64);
            for reservation in page.data {
                prop_assert!(seen.insert(reservation.id()), "duplicate {}", reservation.id());
                if let Some(previous) = last_id {
                    prop_assert!(reservation.id() < previous);
                }
                last_id = Some(reservation.id());
            }
        }
        prop_assert_eq!(seen.len(), count);
    }
}
