//! Instance cache
//!
//! Mapping from requested type key to the singleton constructed for it.
//! Populated lazily, never evicted for the lifetime of the owning resolver.
//! The single `insert_or_get` operation is the only atomicity the engine
//! needs: concurrent resolutions may both construct, but only one instance is
//! ever retained per key, and readers never observe a half-constructed value.

use dashmap::DashMap;
use magus_domain::TypeKey;

use crate::instance::Shared;

#[derive(Default)]
pub(crate) struct InstanceCache {
    entries: DashMap<TypeKey, Shared>,
}

impl InstanceCache {
    /// Look up the cached instance for a key
    pub(crate) fn get(&self, key: &TypeKey) -> Option<Shared> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Idempotent insert: the first instance stored for a key wins
    ///
    /// Returns the retained instance, which is the existing one when a
    /// concurrent resolution got there first; the caller's freshly built
    /// duplicate is then discarded.
    pub(crate) fn insert_or_get(&self, key: TypeKey, instance: Shared) -> Shared {
        self.entries.entry(key).or_insert(instance).value().clone()
    }

    /// Number of cached instances
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
