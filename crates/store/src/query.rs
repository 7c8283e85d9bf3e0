//! Batch queries over the record collection
//!
//! All multi-record operations are explicit parameterized calls; there is
//! no lazy query builder and no deferred execution. Results are owned
//! snapshots: each query clones the matching records under shard read locks
//! and sorts them before returning.
//!
//! Default ordering is the popularity order ([`ViewRecord::popularity_cmp`]):
//! `views` ascending, `last_view` descending, `first_view` ascending.
//! [`ViewTracker::recently_viewed`] is the one exception, ordering by
//! `last_view` descending.

use crate::tracker::ViewTracker;
use rustc_hash::FxHashSet;
use viewtrack_core::{AgedRecord, EntityRef, EntityTypeId, Result, Timestamp, ViewRecord};

/// Default truncation for [`ViewTracker::recently_viewed`]
pub const DEFAULT_RECENT_LIMIT: usize = 10;

impl ViewTracker {
    /// All records, in popularity order
    pub fn all(&self) -> Vec<ViewRecord> {
        self.collect_sorted(|_| true)
    }

    /// The most recently viewed records, most recent first
    ///
    /// Ordered by `last_view` descending and truncated to `limit`. Ties on
    /// `last_view` are broken by `views` descending, then by entity ref, so
    /// the result is deterministic.
    pub fn recently_viewed(&self, limit: usize) -> Vec<ViewRecord> {
        let mut records: Vec<ViewRecord> =
            self.records().iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| {
            b.last_view
                .cmp(&a.last_view)
                .then_with(|| b.views.cmp(&a.views))
                .then_with(|| a.entity.cmp(&b.entity))
        });
        records.truncate(limit);
        records
    }

    /// All records of one entity type, in popularity order
    pub fn for_type(&self, type_id: EntityTypeId) -> Vec<ViewRecord> {
        self.collect_sorted(|record| record.entity.type_id == type_id)
    }

    /// All records whose type is in `type_ids`, in popularity order
    ///
    /// A single membership filter over the collection: the union carries no
    /// duplicates even when `type_ids` repeats an id.
    pub fn for_types(&self, type_ids: &[EntityTypeId]) -> Vec<ViewRecord> {
        let wanted: FxHashSet<EntityTypeId> = type_ids.iter().copied().collect();
        self.collect_sorted(|record| wanted.contains(&record.entity.type_id))
    }

    /// Records matching any of the given refs, in popularity order
    ///
    /// Point lookups over the composite key rather than a full scan. Refs
    /// with no record are skipped, duplicate refs yield one row, and an
    /// empty input yields an empty result.
    pub fn for_refs(&self, refs: &[EntityRef]) -> Vec<ViewRecord> {
        let unique: FxHashSet<EntityRef> = refs.iter().copied().collect();
        let mut records: Vec<ViewRecord> = unique
            .into_iter()
            .filter_map(|entity| self.records().get(&entity).map(|r| r.value().clone()))
            .collect();
        records.sort_by(ViewRecord::popularity_cmp);
        records
    }

    fn collect_sorted<F>(&self, mut keep: F) -> Vec<ViewRecord>
    where
        F: FnMut(&ViewRecord) -> bool,
    {
        let mut records: Vec<ViewRecord> = self
            .records()
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(ViewRecord::popularity_cmp);
        records
    }
}

/// Annotate records with their age relative to `refdate`
///
/// The age is `refdate - first_view`, computed per record at projection
/// time and never stored. Fails with
/// [`RefDateBeforeFirstView`](viewtrack_core::Error::RefDateBeforeFirstView)
/// if any record's first view is after `refdate`; use
/// [`Timestamp::now`] for the conventional default.
pub fn with_age(records: Vec<ViewRecord>, refdate: Timestamp) -> Result<Vec<AgedRecord>> {
    records
        .into_iter()
        .map(|record| {
            let age = record.age(refdate)?;
            Ok(AgedRecord { record, age })
        })
        .collect()
}
