//! Stable entity addressing
//!
//! Different applications track views on different concrete types (articles,
//! profiles, listings). The store never sees those types; it keys every
//! record by an [`EntityRef`], a `(type id, object id)` pair produced by the
//! resolver. Two refs are equal iff both fields match, which makes the ref
//! usable directly as the composite key of the record map.

use serde::{Deserialize, Serialize};

/// Dense identifier for a logical entity type
///
/// Assigned by the resolver's type registry in registration order. Opaque to
/// callers: its only contract is that distinct registered kinds get distinct
/// ids within one resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityTypeId(u32);

impl EntityTypeId {
    /// Create from a raw id
    ///
    /// Intended for tests and snapshot decoding; normal code obtains ids
    /// from the resolver.
    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        EntityTypeId(id)
    }

    /// Get the raw id
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable reference to a trackable entity
///
/// The composite key of the store: at most one view record exists per
/// `EntityRef`.
///
/// ## Invariants
///
/// - Equality is field-wise over `(type_id, object_id)`
/// - A ref is meaningful only within the resolver (type space) that
///   produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Logical type of the referenced entity
    pub type_id: EntityTypeId,
    /// Application-assigned object id, unique within the type
    pub object_id: u64,
}

impl EntityRef {
    /// Create an entity reference
    #[inline]
    pub const fn new(type_id: EntityTypeId, object_id: u64) -> Self {
        EntityRef { type_id, object_id }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.type_id, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entity_ref_equality() {
        let a = EntityRef::new(EntityTypeId::from_raw(1), 10);
        let b = EntityRef::new(EntityTypeId::from_raw(1), 10);
        let c = EntityRef::new(EntityTypeId::from_raw(1), 11);
        let d = EntityRef::new(EntityTypeId::from_raw(2), 10);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_entity_ref_hash_as_key() {
        let mut set = HashSet::new();
        set.insert(EntityRef::new(EntityTypeId::from_raw(1), 10));
        set.insert(EntityRef::new(EntityTypeId::from_raw(1), 10));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_entity_ref_ordering() {
        let a = EntityRef::new(EntityTypeId::from_raw(1), 99);
        let b = EntityRef::new(EntityTypeId::from_raw(2), 1);
        // type_id dominates, object_id breaks ties
        assert!(a < b);
        assert!(EntityRef::new(EntityTypeId::from_raw(1), 1) < a);
    }

    #[test]
    fn test_entity_ref_display() {
        let r = EntityRef::new(EntityTypeId::from_raw(7), 42);
        assert_eq!(r.to_string(), "7/42");
    }

    #[test]
    fn test_entity_ref_serialization() {
        let r = EntityRef::new(EntityTypeId::from_raw(3), 123);
        let json = serde_json::to_string(&r).unwrap();
        let restored: EntityRef = serde_json::from_str(&json).unwrap();
        assert_eq!(r, restored);
    }
}
