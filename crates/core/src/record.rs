//! View record: the persisted counter state for one entity
//!
//! One record exists per [`EntityRef`]. Records are created lazily on first
//! increment, mutated only by increment, and never deleted by this core.
//!
//! ## Popularity ordering
//!
//! Multi-record queries default to a stable total order used for ranking
//! listings: `views` ascending, then `last_view` descending, then
//! `first_view` ascending, with the entity ref as the final tiebreak so the
//! order is total even when all three fields collide.

use crate::entity_ref::EntityRef;
use crate::error::{Error, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

/// Persisted counter state for one entity
///
/// ## Invariants
///
/// - `first_view` is set once at creation and never changes
/// - `last_view >= first_view`
/// - `views` is monotonically non-decreasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Composite key: the tracked entity
    pub entity: EntityRef,
    /// When the entity was first viewed
    pub first_view: Timestamp,
    /// When the entity was most recently viewed
    pub last_view: Timestamp,
    /// Total number of recorded views
    pub views: u64,
}

impl ViewRecord {
    /// Create a fresh record with zero views
    ///
    /// Both timestamps start at `created_at`. The zero-views state is
    /// transient in practice: `increment` bumps the counter in the same
    /// atomic step that creates the record.
    pub fn new(entity: EntityRef, created_at: Timestamp) -> Self {
        ViewRecord {
            entity,
            first_view: created_at,
            last_view: created_at,
            views: 0,
        }
    }

    /// Record one more view at `at`
    ///
    /// Callers go through the store, which applies this under a per-key
    /// guard; calling it on a detached clone affects only that clone.
    ///
    /// `last_view` never moves backwards: an `at` older than the current
    /// `last_view` (a clock step) bumps the counter and leaves the
    /// timestamp in place, preserving `last_view >= first_view`.
    pub fn record_view(&mut self, at: Timestamp) {
        self.views += 1;
        if at > self.last_view {
            self.last_view = at;
        }
    }

    /// Elapsed time between `refdate` and the first view
    ///
    /// Precondition: `refdate >= first_view`. Violating it is a caller
    /// error and fails with [`Error::RefDateBeforeFirstView`] rather than
    /// clamping or producing a negative duration.
    pub fn age(&self, refdate: Timestamp) -> Result<Duration> {
        refdate
            .checked_duration_since(self.first_view)
            .ok_or(Error::RefDateBeforeFirstView {
                refdate,
                first_view: self.first_view,
            })
    }

    /// Age relative to the current moment
    pub fn age_now(&self) -> Result<Duration> {
        self.age(Timestamp::now())
    }

    /// Default ordering for multi-record queries
    ///
    /// `views` ascending, `last_view` descending, `first_view` ascending,
    /// entity ref ascending. A stable total order: equal only for the same
    /// entity.
    pub fn popularity_cmp(&self, other: &ViewRecord) -> Ordering {
        self.views
            .cmp(&other.views)
            .then_with(|| other.last_view.cmp(&self.last_view))
            .then_with(|| self.first_view.cmp(&other.first_view))
            .then_with(|| self.entity.cmp(&other.entity))
    }
}

impl std::fmt::Display for ViewRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} views", self.entity, self.views)
    }
}

/// A view record annotated with its age at query time
///
/// Produced by the age projection on queries. The age is computed per
/// record against a caller-supplied refdate and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedRecord {
    /// The underlying record
    pub record: ViewRecord,
    /// `refdate - record.first_view` at projection time
    pub age: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_ref::EntityTypeId;

    fn entity(type_id: u32, object_id: u64) -> EntityRef {
        EntityRef::new(EntityTypeId::from_raw(type_id), object_id)
    }

    #[test]
    fn test_new_record_zero_views() {
        let t = Timestamp::from_micros(1000);
        let rec = ViewRecord::new(entity(1, 1), t);
        assert_eq!(rec.views, 0);
        assert_eq!(rec.first_view, t);
        assert_eq!(rec.last_view, t);
    }

    #[test]
    fn test_record_view_bumps_counter_and_last_view() {
        let mut rec = ViewRecord::new(entity(1, 1), Timestamp::from_micros(1000));
        rec.record_view(Timestamp::from_micros(2000));
        rec.record_view(Timestamp::from_micros(3000));

        assert_eq!(rec.views, 2);
        assert_eq!(rec.first_view, Timestamp::from_micros(1000));
        assert_eq!(rec.last_view, Timestamp::from_micros(3000));
    }

    #[test]
    fn test_record_view_ignores_backwards_clock() {
        let mut rec = ViewRecord::new(entity(1, 1), Timestamp::from_micros(5_000));
        rec.record_view(Timestamp::from_micros(4_000));

        assert_eq!(rec.views, 1);
        assert_eq!(rec.last_view, Timestamp::from_micros(5_000));
        assert!(rec.last_view >= rec.first_view);
    }

    #[test]
    fn test_age_exact() {
        let rec = ViewRecord::new(entity(1, 1), Timestamp::from_micros(1_000));
        let age = rec.age(Timestamp::from_micros(5_500)).unwrap();
        assert_eq!(age, Duration::from_micros(4_500));
    }

    #[test]
    fn test_age_at_first_view_is_zero() {
        let rec = ViewRecord::new(entity(1, 1), Timestamp::from_micros(1_000));
        assert_eq!(rec.age(Timestamp::from_micros(1_000)).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_age_refdate_before_first_view_fails() {
        let rec = ViewRecord::new(entity(1, 1), Timestamp::from_micros(1_000));
        let err = rec.age(Timestamp::from_micros(999)).unwrap_err();
        assert!(matches!(err, Error::RefDateBeforeFirstView { .. }));
    }

    #[test]
    fn test_popularity_order_views_ascending_first() {
        // A(views=5, last=t2), B(views=5, last=t1), C(views=3, last=t3)
        // expected order: [C, A, B]
        let mut a = ViewRecord::new(entity(1, 1), Timestamp::from_micros(1));
        a.views = 5;
        a.last_view = Timestamp::from_micros(200);
        let mut b = ViewRecord::new(entity(1, 2), Timestamp::from_micros(1));
        b.views = 5;
        b.last_view = Timestamp::from_micros(100);
        let mut c = ViewRecord::new(entity(1, 3), Timestamp::from_micros(1));
        c.views = 3;
        c.last_view = Timestamp::from_micros(300);

        let mut all = vec![a.clone(), b.clone(), c.clone()];
        all.sort_by(|x, y| x.popularity_cmp(y));
        assert_eq!(all, vec![c, a, b]);
    }

    #[test]
    fn test_popularity_order_first_view_tiebreak() {
        let mut a = ViewRecord::new(entity(1, 1), Timestamp::from_micros(10));
        a.views = 2;
        a.last_view = Timestamp::from_micros(500);
        let mut b = ViewRecord::new(entity(1, 2), Timestamp::from_micros(20));
        b.views = 2;
        b.last_view = Timestamp::from_micros(500);

        // Same views and last_view: earlier first_view sorts first
        assert_eq!(a.popularity_cmp(&b), Ordering::Less);
        assert_eq!(b.popularity_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_popularity_order_total_on_full_tie() {
        let a = ViewRecord::new(entity(1, 1), Timestamp::from_micros(10));
        let b = ViewRecord::new(entity(1, 2), Timestamp::from_micros(10));
        assert_ne!(a.popularity_cmp(&b), Ordering::Equal);
        assert_eq!(a.popularity_cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_record_display() {
        let mut rec = ViewRecord::new(entity(2, 7), Timestamp::from_micros(10));
        rec.views = 3;
        assert_eq!(rec.to_string(), "2/7, 3 views");
    }

    #[test]
    fn test_record_serialization() {
        let rec = ViewRecord::new(entity(1, 9), Timestamp::from_micros(42));
        let json = serde_json::to_string(&rec).unwrap();
        let restored: ViewRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, restored);
    }
}
