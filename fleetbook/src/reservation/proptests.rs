//! Property-based tests for `DateRange`.

use super::DateRange;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// Ranges within a two-year window starting 2024-01-01
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (0u64..730, 1u64..60).prop_map(|(offset, len)| {
        let start = base() + Days::new(offset);
        let end = start + Days::new(len);
        DateRange::new(start, end).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_is_reflexive(a in range_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    // Overlap holds exactly when some night is occupied by both ranges
    #[test]
    fn overlap_matches_shared_night(a in range_strategy(), b in range_strategy()) {
        let shared = a.start().iter_days()
            .take_while(|d| *d < a.end())
            .any(|d| b.start() <= d && d < b.end());
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    #[test]
    fn adjacent_ranges_never_overlap(a in range_strategy(), len in 1u64..30) {
        let next = DateRange::new(a.end(), a.end() + Days::new(len)).unwrap();
        prop_assert!(!a.overlaps(&next));
    }

    #[test]
    fn nights_equals_day_difference(a in range_strategy()) {
        let expected = (a.end() - a.start()).num_days();
        prop_assert_eq!(i64::from(a.nights()), expected);
        prop_assert!(a.nights() >= 1);
    }
}
