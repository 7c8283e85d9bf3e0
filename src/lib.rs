//! viewtrack - Embedded view-count tracking and popularity ranking store
//!
//! viewtrack maintains one counter record per tracked entity and answers
//! aggregate and recency queries over those counters: recently viewed,
//! filter by type, filter by refs, popularity ordering, and query-time age
//! projection.
//!
//! # Quick Start
//!
//! ```
//! use viewtrack::{EntityResolver, Trackable, ViewTracker};
//!
//! struct Article { id: u64 }
//!
//! impl Trackable for Article {
//!     const KIND: &'static str = "article";
//!     fn object_id(&self) -> u64 { self.id }
//! }
//!
//! let resolver = EntityResolver::new();
//! resolver.register::<Article>();
//! let tracker = ViewTracker::new();
//!
//! let article = Article { id: 42 };
//! tracker.add_view_for(&resolver, &article).unwrap();
//! assert_eq!(tracker.views_of(&resolver, &article).unwrap(), 1);
//! ```
//!
//! # Architecture
//!
//! Contract types (refs, records, timestamps, errors) live in
//! `viewtrack-core`; the store and its queries live in `viewtrack-store`.
//! This crate re-exports the public API of both.

// Re-export the public API from the member crates
pub use viewtrack_core::{
    AgedRecord, EntityRef, EntityResolver, EntityTypeId, Error, Result, Timestamp, Trackable,
    ViewRecord,
};
pub use viewtrack_store::{with_age, ViewTracker, DEFAULT_RECENT_LIMIT};
