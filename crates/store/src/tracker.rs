//! ViewTracker: the authoritative counter store
//!
//! ## Design
//!
//! Records live in a `DashMap` keyed by [`EntityRef`]. The map key *is* the
//! uniqueness constraint: at most one record can exist per ref, enforced by
//! the storage layer rather than application logic.
//!
//! ## Atomicity
//!
//! `get_or_create` and `increment` go through the map's entry API, which
//! holds a per-shard write guard for the duration of the read-modify-write.
//! Concurrent increments on the same ref serialize on that guard, so no
//! update is lost. Clock readings happen under the guard as well, keeping
//! timestamps ordered the way the writes serialized. Creation races resolve
//! to exactly one record; the loser of the race observes the winner's
//! record instead of a duplicate-key error.
//!
//! ## Reads
//!
//! Point reads clone the record under the shard read lock, so callers never
//! observe a half-applied increment (`views` bumped but `last_view` stale).
//! Batch queries iterate shards one at a time and may observe counts that
//! are slightly stale under concurrent writes, which is acceptable for
//! display and ranking.
//!
//! ## Thread Safety
//!
//! `ViewTracker` is `Send + Sync`; share it across threads behind an `Arc`.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use viewtrack_core::{EntityRef, EntityResolver, Error, Result, Timestamp, Trackable, ViewRecord};

/// Authoritative store of view records, one per tracked entity
///
/// # Example
///
/// ```
/// use viewtrack_core::{EntityRef, EntityTypeId};
/// use viewtrack_store::ViewTracker;
///
/// let tracker = ViewTracker::new();
/// let entity = EntityRef::new(EntityTypeId::from_raw(0), 42);
///
/// tracker.increment(entity);
/// tracker.increment(entity);
/// assert_eq!(tracker.views_for(entity), 2);
/// ```
#[derive(Debug, Default)]
pub struct ViewTracker {
    records: DashMap<EntityRef, ViewRecord>,
}

impl ViewTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tracker sized for an expected number of entities
    pub fn with_capacity(entities: usize) -> Self {
        ViewTracker {
            records: DashMap::with_capacity(entities),
        }
    }

    /// Get the record for an entity, creating it if absent
    ///
    /// A created record starts with `views = 0` and both timestamps set to
    /// now. Exactly one record ends up existing per ref even under
    /// concurrent calls: the entry guard serializes creation, and losers of
    /// the race see the winner's record.
    pub fn get_or_create(&self, entity: EntityRef) -> ViewRecord {
        match self.records.entry(entity) {
            Entry::Occupied(occupied) => occupied.get().clone(),
            Entry::Vacant(vacant) => {
                let record = ViewRecord::new(entity, Timestamp::now());
                debug!(target: "viewtrack::store", entity = %entity, "Record created");
                vacant.insert(record.clone());
                record
            }
        }
    }

    /// Get the record for an entity without creating one
    ///
    /// Fails with [`Error::RecordNotFound`] if the entity has never been
    /// viewed.
    pub fn get(&self, entity: EntityRef) -> Result<ViewRecord> {
        self.records
            .get(&entity)
            .map(|r| r.value().clone())
            .ok_or(Error::RecordNotFound(entity))
    }

    /// Record one view for an entity
    ///
    /// Get-or-create plus `views += 1; last_view = now`, as a single atomic
    /// unit under the entry guard. Never loses updates under concurrent
    /// increments on the same ref. Returns the record as of this increment.
    ///
    /// The clock is read while the guard is held, so timestamps commit in
    /// guard-acquisition order; a racing increment can never stamp a
    /// `last_view` older than the `first_view` the creation race winner
    /// wrote.
    pub fn increment(&self, entity: EntityRef) -> ViewRecord {
        let record = match self.records.entry(entity) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().record_view(Timestamp::now());
                occupied.get().clone()
            }
            Entry::Vacant(vacant) => {
                let mut record = ViewRecord::new(entity, Timestamp::now());
                record.record_view(record.first_view);
                vacant.insert(record.clone());
                record
            }
        };
        debug!(target: "viewtrack::store", entity = %entity, views = record.views, "View recorded");
        record
    }

    /// Total views for an entity, `0` when it has never been viewed
    ///
    /// Never creates a record. The zero return is "no error, count is
    /// zero"; use [`get`](Self::get) when absence must be distinguished.
    pub fn views_for(&self, entity: EntityRef) -> u64 {
        self.records.get(&entity).map_or(0, |r| r.value().views)
    }

    /// Whether a record exists for the entity
    pub fn contains(&self, entity: EntityRef) -> bool {
        self.records.contains_key(&entity)
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve an entity and record one view for it
    pub fn add_view_for<T: Trackable>(
        &self,
        resolver: &EntityResolver,
        entity: &T,
    ) -> Result<ViewRecord> {
        let entity_ref = resolver.resolve(entity)?;
        Ok(self.increment(entity_ref))
    }

    /// Resolve an entity and return its total views, `0` when untracked
    pub fn views_of<T: Trackable>(&self, resolver: &EntityResolver, entity: &T) -> Result<u64> {
        let entity_ref = resolver.resolve(entity)?;
        Ok(self.views_for(entity_ref))
    }

    /// The most recently viewed record, if any
    pub fn latest(&self) -> Option<ViewRecord> {
        self.recently_viewed(1).into_iter().next()
    }

    pub(crate) fn records(&self) -> &DashMap<EntityRef, ViewRecord> {
        &self.records
    }

    /// Insert a row as-is, replacing any existing row for the same entity
    ///
    /// Snapshot loading only; bypasses the lazy-creation lifecycle.
    pub(crate) fn insert_raw(&self, record: ViewRecord) {
        self.records.insert(record.entity, record);
    }
}
