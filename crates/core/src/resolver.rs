//! Entity reference resolution
//!
//! The store keys records by [`EntityRef`], independent of the concrete
//! application types being tracked. This module provides the mapping from
//! application objects to refs:
//!
//! - [`Trackable`]: the capability an application type implements — a stable
//!   logical type name plus a numeric object id.
//! - [`EntityResolver`]: a type registry assigning a dense [`EntityTypeId`]
//!   per kind and resolving any `Trackable` to its ref.
//!
//! No runtime type inspection is involved: the type space is the set of
//! kinds registered on one resolver instance. Resolution is deterministic —
//! the same object always resolves to the same ref within one resolver.

use crate::entity_ref::{EntityRef, EntityTypeId};
use crate::error::{Error, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Capability trait for types whose instances can be view-tracked
///
/// # Example
///
/// ```
/// use viewtrack_core::Trackable;
///
/// struct Article { id: u64 }
///
/// impl Trackable for Article {
///     const KIND: &'static str = "article";
///     fn object_id(&self) -> u64 {
///         self.id
///     }
/// }
/// ```
pub trait Trackable {
    /// Stable logical type name, unique within the application's type space
    const KIND: &'static str;

    /// Application-assigned id, unique within the type
    fn object_id(&self) -> u64;
}

/// Registry mapping logical type names to dense type ids
///
/// One resolver instance defines one logical type space. Ids are assigned
/// in registration order and never change for the lifetime of the resolver.
///
/// Thread safety: `register` takes a write lock, `resolve` a read lock.
/// Both are cheap; registration typically happens once at startup.
#[derive(Debug, Default)]
pub struct EntityResolver {
    types: RwLock<FxHashMap<&'static str, EntityTypeId>>,
}

impl EntityResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trackable type, returning its id
    ///
    /// Idempotent: re-registering a kind returns the id assigned on first
    /// registration.
    pub fn register<T: Trackable>(&self) -> EntityTypeId {
        let mut types = self.types.write();
        if let Some(id) = types.get(T::KIND) {
            return *id;
        }
        let id = EntityTypeId::from_raw(types.len() as u32);
        types.insert(T::KIND, id);
        id
    }

    /// Resolve an entity to its stable reference
    ///
    /// Fails with [`Error::UnsupportedType`] if the entity's kind was never
    /// registered on this resolver.
    pub fn resolve<T: Trackable>(&self, entity: &T) -> Result<EntityRef> {
        let type_id = self.type_id_of::<T>()?;
        Ok(EntityRef::new(type_id, entity.object_id()))
    }

    /// Resolve, registering the entity's kind first if needed
    ///
    /// For applications without a fixed registration phase.
    pub fn resolve_or_register<T: Trackable>(&self, entity: &T) -> EntityRef {
        let type_id = self.register::<T>();
        EntityRef::new(type_id, entity.object_id())
    }

    /// Look up the type id for a registered trackable type
    pub fn type_id_of<T: Trackable>(&self) -> Result<EntityTypeId> {
        self.type_id_for(T::KIND)
    }

    /// Look up the type id for a kind by name
    pub fn type_id_for(&self, kind: &str) -> Result<EntityTypeId> {
        self.types
            .read()
            .get(kind)
            .copied()
            .ok_or_else(|| Error::UnsupportedType {
                kind: kind.to_string(),
            })
    }

    /// Number of registered kinds
    pub fn registered_count(&self) -> usize {
        self.types.read().len()
    }
}
