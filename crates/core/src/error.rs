//! Error types for the viewtrack store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::entity_ref::EntityRef;
use crate::timestamp::Timestamp;
use std::io;
use thiserror::Error;

/// Result type alias for viewtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the viewtrack store
#[derive(Debug, Error)]
pub enum Error {
    /// The resolver has no registered type id for an entity's kind
    #[error("Unsupported entity type: {kind:?}")]
    UnsupportedType {
        /// Logical type name that could not be resolved
        kind: String,
    },

    /// Read-only fetch for a ref with no record
    #[error("No view record for {0}")]
    RecordNotFound(EntityRef),

    /// Age requested against a refdate earlier than the record's first view
    #[error("Reference date {refdate} is before first view {first_view}")]
    RefDateBeforeFirstView {
        /// Caller-supplied reference date
        refdate: Timestamp,
        /// The record's first view
        first_view: Timestamp,
    },

    /// I/O error (snapshot file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot data could not be decoded
    #[error("Snapshot corruption: {0}")]
    Corruption(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Corruption(e.to_string())
    }
}
