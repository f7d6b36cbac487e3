//! Shared typed entity store.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

/// A keyed store of hydrated entities for one cache scope.
///
/// Cloning is cheap and shares the underlying storage, which is how a
/// scoped view and a global manager end up reading and writing the same
/// physical cache. Entries never expire on their own; eviction is always
/// an explicit [`remove`](EntityCache::remove).
pub struct EntityCache<E> {
    name: Arc<str>,
    inner: Arc<RwLock<HashMap<String, E>>>,
}

impl<E> Clone for EntityCache<E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Clone> EntityCache<E> {
    /// Create a new, empty store with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, E>> {
        // Lock poisoning is unrecoverable for an in-memory cache
        self.inner.read().unwrap()
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, E>> {
        self.inner.write().unwrap()
    }

    /// Look up an entry by id, cloning it out of the store.
    pub fn get(&self, id: &str) -> Option<E> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Insert or replace an entry wholesale.
    pub fn insert(&self, id: impl Into<String>, entity: E) {
        self.write().insert(id.into(), entity);
    }

    /// Create-or-patch an entry under a single write lock.
    ///
    /// If the id is resident, `patch` mutates the live entry in place; a
    /// given id keeps resolving to the same logical entity across
    /// hydrations. Otherwise `make` builds a fresh one. Returns a clone
    /// of the resulting entry.
    pub fn upsert(
        &self,
        id: &str,
        make: impl FnOnce() -> E,
        patch: impl FnOnce(&mut E),
    ) -> E {
        let mut map = self.write();
        match map.entry(id.to_string()) {
            Entry::Occupied(mut slot) => {
                patch(slot.get_mut());
                slot.get().clone()
            }
            Entry::Vacant(slot) => slot.insert(make()).clone(),
        }
    }

    /// Run a closure against a resident entry, mutably.
    pub fn with_mut<R>(&self, id: &str, f: impl FnOnce(&mut E) -> R) -> Option<R> {
        self.write().get_mut(id).map(f)
    }

    /// Evict an entry. Returns `true` if something was removed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.write().remove(id).is_some();
        if removed {
            debug!(cache = %self.name, id, "evicted entry");
        }
        removed
    }

    /// Drop every entry in this store.
    pub fn clear(&self) {
        self.write().clear();
        debug!(cache = %self.name, "cleared store");
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<E> {
        self.read().values().cloned().collect()
    }
}

impl<E> std::fmt::Debug for EntityCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("name", &self.name)
            .field("len", &self.inner.read().unwrap().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_miss_is_none() {
        let cache: EntityCache<String> = EntityCache::new("test");
        assert_eq!(cache.get("1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_upsert_creates_then_patches_in_place() {
        let cache: EntityCache<Vec<i64>> = EntityCache::new("test");

        let created = cache.upsert("1", || vec![1], |_| panic!("no entry to patch"));
        assert_eq!(created, vec![1]);

        let patched = cache.upsert("1", || panic!("already resident"), |v| v.push(2));
        assert_eq!(patched, vec![1, 2]);
        assert_eq!(cache.get("1"), Some(vec![1, 2]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let cache: EntityCache<String> = EntityCache::new("test");
        assert!(!cache.remove("1"));

        cache.insert("1", "a".to_string());
        assert!(cache.remove("1"));
        assert_eq!(cache.get("1"), None);
    }

    #[test]
    fn test_clone_shares_storage() {
        let cache: EntityCache<String> = EntityCache::new("test");
        let view = cache.clone();

        view.insert("42", "pepe".to_string());
        assert_eq!(cache.get("42"), Some("pepe".to_string()));

        cache.remove("42");
        assert_eq!(view.get("42"), None);
    }

    #[test]
    fn test_ids_and_clear() {
        let cache: EntityCache<String> = EntityCache::new("test");
        cache.insert("1", "a".to_string());
        cache.insert("2", "b".to_string());

        let mut ids = cache.ids();
        ids.sort();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.ids().is_empty());
    }

    #[test]
    fn test_with_mut() {
        let cache: EntityCache<String> = EntityCache::new("test");
        assert_eq!(cache.with_mut("1", |_| ()), None);

        cache.insert("1", "a".to_string());
        let out = cache.with_mut("1", |s| {
            s.push('b');
            s.clone()
        });
        assert_eq!(out, Some("ab".to_string()));
        assert_eq!(cache.get("1"), Some("ab".to_string()));
    }
}
