//! View tracker store
//!
//! Owns the collection of view records and all operations over it:
//! - Atomic get-or-create and increment (no lost updates, no duplicate
//!   records) — `tracker`
//! - Batch queries, popularity ordering, age projection — `query`
//! - Whole-store snapshot persistence — `snapshot`
//!
//! The store is keyed by [`EntityRef`](viewtrack_core::EntityRef); producing
//! refs from application objects is the resolver's job
//! (`viewtrack_core::EntityResolver`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod query;
pub mod snapshot;
pub mod tracker;

pub use query::{with_age, DEFAULT_RECENT_LIMIT};
pub use tracker::ViewTracker;
