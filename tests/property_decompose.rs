// tests/property_decompose.rs

//! Property tests for chunk decomposition and sub-interval selection.

use proptest::prelude::*;

use ppsched::interval::{
    CalendarType, ModelDate, SubPeriod, best_sub_interval, decompose_into_subchunks,
};

proptest! {
    /// Decomposing into a divisor chunk always tiles the period exactly:
    /// right count, contiguous, first and last flush with the ends.
    #[test]
    fn decomposition_tiles_the_period(
        sub_years in 1u32..=6,
        factor in 1u32..=8,
        end_year in 10i64..=400,
        cal in prop_oneof![
            Just(CalendarType::Julian),
            Just(CalendarType::NoLeap),
            Just(CalendarType::Gregorian),
        ],
    ) {
        let requested = sub_years * factor * 12;
        let sub = sub_years * 12;
        let end = ModelDate::new(end_year, 12, 31);
        let period = SubPeriod::ending_at(end, requested, cal);

        let pieces = decompose_into_subchunks(requested, sub, &period, cal).unwrap();

        prop_assert_eq!(pieces.len() as u32, factor);
        prop_assert_eq!(pieces[0].start, period.start);
        prop_assert_eq!(pieces[pieces.len() - 1].end, period.end);
        for pair in pieces.windows(2) {
            prop_assert_eq!(pair[0].end.next_day(cal), pair[1].start);
        }
    }

    /// Non-divisors are always rejected.
    #[test]
    fn non_divisors_are_rejected(
        requested in 1u32..=120,
        sub in 1u32..=120,
    ) {
        prop_assume!(requested % sub != 0);
        let end = ModelDate::new(50, 12, 31);
        let period = SubPeriod::ending_at(end, requested, CalendarType::Julian);
        prop_assert!(
            decompose_into_subchunks(requested, sub, &period, CalendarType::Julian).is_err()
        );
    }

    /// The selected sub-interval is always a proper divisor, and no larger
    /// proper divisor exists in the catalog.
    #[test]
    fn best_sub_interval_is_the_largest_proper_divisor(
        requested in 1u32..=240,
        available in proptest::collection::vec(1u32..=240, 0..8),
    ) {
        match best_sub_interval(requested, &available) {
            Some(best) => {
                prop_assert!(best < requested);
                prop_assert_eq!(requested % best, 0);
                for &i in &available {
                    if i < requested && requested % i == 0 {
                        prop_assert!(i <= best);
                    }
                }
            }
            None => {
                for &i in &available {
                    prop_assert!(!(i > 0 && i < requested && requested % i == 0));
                }
            }
        }
    }
}
