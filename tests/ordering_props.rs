//! Property tests for the popularity order and the age projection

use proptest::prelude::*;
use std::cmp::Ordering;
use std::time::Duration;
use viewtrack::{EntityRef, EntityTypeId, Timestamp, ViewRecord};

fn arb_record() -> impl Strategy<Value = ViewRecord> {
    (0u32..4, 0u64..16, 0u64..1_000, 0u64..1_000_000, 0u64..1_000_000).prop_map(
        |(type_id, object_id, views, first, delta)| {
            let mut record = ViewRecord::new(
                EntityRef::new(EntityTypeId::from_raw(type_id), object_id),
                Timestamp::from_micros(first),
            );
            record.views = views;
            record.last_view = Timestamp::from_micros(first + delta);
            record
        },
    )
}

proptest! {
    #[test]
    fn popularity_order_is_antisymmetric(a in arb_record(), b in arb_record()) {
        let ab = a.popularity_cmp(&b);
        let ba = b.popularity_cmp(&a);
        prop_assert_eq!(ab, ba.reverse());
    }

    #[test]
    fn popularity_order_equal_only_for_same_entity(a in arb_record(), b in arb_record()) {
        if a.popularity_cmp(&b) == Ordering::Equal {
            prop_assert_eq!(a.entity, b.entity);
        }
    }

    #[test]
    fn popularity_order_is_transitive(a in arb_record(), b in arb_record(), c in arb_record()) {
        if a.popularity_cmp(&b) != Ordering::Greater && b.popularity_cmp(&c) != Ordering::Greater {
            prop_assert_ne!(a.popularity_cmp(&c), Ordering::Greater);
        }
    }

    #[test]
    fn sorted_runs_put_fewer_views_first(mut records in prop::collection::vec(arb_record(), 0..32)) {
        records.sort_by(ViewRecord::popularity_cmp);
        for pair in records.windows(2) {
            prop_assert!(pair[0].views <= pair[1].views);
        }
    }

    #[test]
    fn age_is_exact_difference(record in arb_record(), extra in 0u64..1_000_000) {
        let refdate = Timestamp::from_micros(record.first_view.as_micros() + extra);
        let age = record.age(refdate).unwrap();
        prop_assert_eq!(age, Duration::from_micros(extra));
    }

    #[test]
    fn age_before_first_view_always_fails(record in arb_record(), back in 1u64..1_000) {
        prop_assume!(record.first_view.as_micros() >= back);
        let refdate = Timestamp::from_micros(record.first_view.as_micros() - back);
        prop_assert!(record.age(refdate).is_err());
    }
}
