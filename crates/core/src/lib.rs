//! Contract types for the viewtrack view-count store
//!
//! This crate defines the foundational types used throughout the system:
//! - EntityTypeId / EntityRef: stable (type, id) keys for trackable entities
//! - Timestamp: microsecond-precision time representation
//! - ViewRecord: persisted counter state for one entity
//! - AgedRecord: query-time age projection
//! - Trackable / EntityResolver: the capability interface mapping
//!   application objects to entity refs
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity_ref;
pub mod error;
pub mod record;
pub mod resolver;
pub mod timestamp;

pub use entity_ref::{EntityRef, EntityTypeId};
pub use error::{Error, Result};
pub use record::{AgedRecord, ViewRecord};
pub use resolver::{EntityResolver, Trackable};
pub use timestamp::Timestamp;
