#[cfg(test)]
mod tests {
    use crate::model::{RecurringAvailability, TimeSlot, Weekday};
    use crate::projector::{next_occurrence, AvailabilityProjector};
    use crate::storage::InMemoryStorage;
    use crate::store::AvailabilityStore;
    use chrono::{Duration, NaiveDate, Timelike};
    use proptest::prelude::*;

    // Builds an arbitrary pattern from (weekday index, hour) pairs
    fn pattern_from_pairs(pairs: &[(usize, u8)]) -> RecurringAvailability {
        let mut pattern = RecurringAvailability::empty();
        for &(day_index, hour) in pairs {
            let day = Weekday::ALL[day_index % 7];
            let slot = TimeSlot::from_hour(hour % 24).unwrap();
            pattern.add(day, slot);
        }
        pattern
    }

    fn arbitrary_pairs() -> impl Strategy<Value = Vec<(usize, u8)>> {
        prop::collection::vec((0..7usize, 0..24u8), 0..40)
    }

    fn arbitrary_date() -> impl Strategy<Value = NaiveDate> {
        // A few years around the fixed dates used by the unit tests
        (0..2000i64).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
        })
    }

    proptest! {
        // save(load(save(P))) is byte-identical to save(P)
        #[test]
        fn test_normalization_is_idempotent(pairs in arbitrary_pairs()) {
            let pattern = pattern_from_pairs(&pairs);

            let first = serde_json::to_string(&pattern).unwrap();
            let mut reloaded: RecurringAvailability =
                serde_json::from_str(&first).unwrap();
            reloaded.normalize();
            let second = serde_json::to_string(&reloaded).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(pattern, reloaded);
        }

        // Toggling the same cell twice returns the pattern to its prior state
        #[test]
        fn test_toggle_is_an_involution(
            pairs in arbitrary_pairs(),
            day_index in 0..7usize,
            hour in 0..24u8,
        ) {
            let mut pattern = pattern_from_pairs(&pairs);
            let original = pattern.clone();
            let day = Weekday::ALL[day_index];
            let slot = TimeSlot::from_hour(hour).unwrap();

            pattern.toggle(day, slot);
            pattern.toggle(day, slot);

            prop_assert_eq!(pattern, original);
        }

        // next_occurrence lands on the requested weekday within the week
        #[test]
        fn test_next_occurrence_bounds(
            today in arbitrary_date(),
            day_index in 0..7usize,
        ) {
            let weekday = Weekday::ALL[day_index];
            let date = next_occurrence(today, weekday);

            prop_assert_eq!(Weekday::from_date(date), weekday);
            prop_assert!(date >= today);
            prop_assert!(date < today + Duration::days(7));
        }

        // Projection is deterministic and every event agrees with its date
        #[test]
        fn test_projection_invariants(
            pairs in arbitrary_pairs(),
            today in arbitrary_date(),
        ) {
            let store = AvailabilityStore::new(InMemoryStorage::new());
            store.save(&pattern_from_pairs(&pairs)).unwrap();
            let projector = AvailabilityProjector::new(store);

            let events = projector.project(today);
            prop_assert_eq!(events.len(), projector.pattern().total_slots());
            prop_assert_eq!(projector.project(today), events.clone());

            for event in &events {
                prop_assert_eq!(Weekday::from_date(event.start.date()), event.weekday);
                prop_assert_eq!(u32::from(event.slot.hour()), event.start.time().hour());
                prop_assert_eq!(event.end - event.start, Duration::hours(1));
            }

            // Within each day, slots come out in ascending order
            for day in Weekday::ALL {
                let hours: Vec<u8> = events
                    .iter()
                    .filter(|event| event.weekday == day)
                    .map(|event| event.slot.hour())
                    .collect();
                let mut sorted = hours.clone();
                sorted.sort_unstable();
                sorted.dedup();
                prop_assert_eq!(hours, sorted);
            }
        }
    }
}
