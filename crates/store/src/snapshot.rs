//! Snapshot persistence
//!
//! The store can dump all rows to a bincode-encoded file and rebuild from
//! one. This is whole-store, point-in-time persistence; there is no write
//! log and no incremental flush. The uniqueness invariant holds in a loaded
//! store by construction, since rows land back in the keyed map.
//!
//! Decode failures (truncated or foreign files) surface as
//! [`Error::Corruption`](viewtrack_core::Error::Corruption).

use crate::tracker::ViewTracker;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;
use viewtrack_core::{Result, ViewRecord};

impl ViewTracker {
    /// Point-in-time copy of all rows
    ///
    /// Rows are ordered by entity ref so repeated snapshots of the same
    /// state are byte-identical when encoded.
    pub fn snapshot(&self) -> Vec<ViewRecord> {
        let mut rows: Vec<ViewRecord> = self.records().iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|r| r.entity);
        rows
    }

    /// Write a snapshot of all rows to `path`, returning the row count
    pub fn persist_to<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let rows = self.snapshot();
        let file = File::create(path.as_ref())?;
        bincode::serialize_into(BufWriter::new(file), &rows)?;
        info!(target: "viewtrack::store", rows = rows.len(), "Snapshot persisted");
        Ok(rows.len())
    }

    /// Rebuild a store from a snapshot file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<ViewTracker> {
        let file = File::open(path.as_ref())?;
        let rows: Vec<ViewRecord> = bincode::deserialize_from(BufReader::new(file))?;
        let tracker = ViewTracker::with_capacity(rows.len());
        for row in rows {
            tracker.insert_raw(row);
        }
        info!(target: "viewtrack::store", rows = tracker.len(), "Snapshot loaded");
        Ok(tracker)
    }
}
