//! Cache-or-fetch managers.
//!
//! A [`Manager`] wraps one [`EntityCache`] scope plus the construction
//! strategy for its entity kind. Lookups are cache-only; an explicit
//! [`fetch`](Manager::fetch) always round-trips through the transport
//! and merges the response into the cache. A [`ScopedManager`] layers a
//! narrower, owner-scoped view over a global manager's physical store.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use super::{EntityCache, Hydrate, Registry, Scoped};

/// Builds the endpoint path for a fetch, given an optional parent id and
/// the entity id. Specialized managers supply a builder that composes a
/// parent-scoped address (e.g. guild + emoji).
pub type EndpointFn = Arc<dyn Fn(Option<&str>, &str) -> String + Send + Sync>;

/// Generic cache-or-fetch accessor for one typed collection of entities.
pub struct Manager<E: Hydrate> {
    name: Arc<str>,
    registry: Registry,
    store: EntityCache<E>,
    endpoint: EndpointFn,
}

impl<E: Hydrate> Clone for Manager<E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            registry: self.registry.clone(),
            store: self.store.clone(),
            endpoint: Arc::clone(&self.endpoint),
        }
    }
}

impl<E: Hydrate> Manager<E> {
    pub fn new(
        name: impl Into<Arc<str>>,
        registry: Registry,
        store: EntityCache<E>,
        endpoint: EndpointFn,
    ) -> Self {
        Self {
            name: name.into(),
            registry,
            store,
            endpoint,
        }
    }

    /// The physical store behind this manager. Scoped views clone this
    /// to share storage.
    pub fn store(&self) -> &EntityCache<E> {
        &self.store
    }

    /// Cache-only lookup. Never performs network I/O; a miss is `None`,
    /// not an error.
    pub fn get(&self, id: &str) -> Option<E> {
        let hit = self.store.get(id);
        debug!(manager = %self.name, id, hit = hit.is_some(), "cache lookup");
        hit
    }

    /// Merge-patch the payload into the cached entity for `id`,
    /// constructing it first if the id is not resident, and return the
    /// result. Used for externally-pushed partial updates and as the
    /// tail step of [`fetch`](Manager::fetch).
    pub fn set(&self, id: &str, payload: &E::Payload) -> E {
        debug!(manager = %self.name, id, "hydrating entry");
        self.store.upsert(
            id,
            || E::from_payload(&self.registry, payload),
            |entity| entity.apply(payload),
        )
    }

    /// Fetch the entity from the network regardless of cache state, then
    /// merge the response into the cache.
    ///
    /// On transport or decode failure the error propagates and the cache
    /// keeps its prior state. Concurrent fetches for the same id are not
    /// coalesced; the entity reflects whichever merge lands last.
    pub async fn fetch(&self, id: &str) -> Result<E> {
        self.fetch_from(None, id).await
    }

    /// [`fetch`](Manager::fetch) with a parent id for entity kinds whose
    /// network address is composed from an owning aggregate's id.
    pub async fn fetch_from(&self, parent: Option<&str>, id: &str) -> Result<E> {
        let endpoint = (self.endpoint)(parent, id);
        debug!(manager = %self.name, id, endpoint = %endpoint, "fetching entity");
        let raw = self.registry.transport().get(&endpoint).await?;
        let payload: E::Payload = serde_json::from_value(raw)
            .with_context(|| format!("Failed to decode {} payload for id {}", self.name, id))?;
        Ok(self.set(id, &payload))
    }

    /// Evict the entry. No-op if absent.
    pub fn remove(&self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl<E: Hydrate> std::fmt::Debug for Manager<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("name", &self.name)
            .field("len", &self.store.len())
            .finish()
    }
}

/// A relationship-scoped view over a global manager's store.
///
/// Reads and writes go to the same physical cache as the global manager,
/// narrowed to entities owned by one aggregate. Writing through the view
/// stamps the owner id onto the stored entity, so the write is visible
/// through the global manager too.
pub struct ScopedManager<E: Hydrate + Scoped> {
    owner: String,
    inner: Manager<E>,
}

impl<E: Hydrate + Scoped> Clone for ScopedManager<E> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<E: Hydrate + Scoped> ScopedManager<E> {
    pub fn new(owner: impl Into<String>, inner: Manager<E>) -> Self {
        Self {
            owner: owner.into(),
            inner,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Cache-only lookup, narrowed to this view's owner. An id resident
    /// in the shared store under a different owner (or under none) is
    /// treated as absent here.
    pub fn get(&self, id: &str) -> Option<E> {
        self.inner
            .get(id)
            .filter(|entity| entity.owner_id() == Some(self.owner.as_str()))
    }

    /// Hydrate through this view and claim the entry for the owner.
    ///
    /// Rejected if the id is already resident under a different owner;
    /// the shared store is left untouched in that case.
    pub fn set(&self, id: &str, payload: &E::Payload) -> Result<E> {
        self.guard_owner(id)?;
        self.inner.set(id, payload);
        self.claim(id)
    }

    /// Fetch via the composite parent+id endpoint, then claim the entry.
    pub async fn fetch(&self, id: &str) -> Result<E> {
        self.guard_owner(id)?;
        self.inner.fetch_from(Some(&self.owner), id).await?;
        self.claim(id)
    }

    /// Evict the entry if this view owns it. Entries under another owner
    /// are not touched.
    pub fn remove(&self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.inner.remove(id)
        } else {
            false
        }
    }

    /// Every resident entity owned by this view.
    pub fn values(&self) -> Vec<E> {
        self.inner
            .store()
            .values()
            .into_iter()
            .filter(|entity| entity.owner_id() == Some(self.owner.as_str()))
            .collect()
    }

    fn guard_owner(&self, id: &str) -> Result<()> {
        if let Some(existing) = self.inner.get(id) {
            if let Some(other) = existing.owner_id() {
                if other != self.owner {
                    warn!(
                        manager = %self.inner.name,
                        id,
                        owner = %self.owner,
                        resident_owner = %other,
                        "rejected scoped write for foreign-owned entry"
                    );
                    bail!(
                        "entry {} is already cached under a different owner ({})",
                        id,
                        other
                    );
                }
            }
        }
        Ok(())
    }

    fn claim(&self, id: &str) -> Result<E> {
        self.inner
            .store()
            .with_mut(id, |entity| {
                entity.set_owner_id(&self.owner);
                entity.clone()
            })
            .with_context(|| format!("entry {} vanished during hydration", id))
    }
}

impl<E: Hydrate + Scoped> std::fmt::Debug for ScopedManager<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedManager")
            .field("owner", &self.owner)
            .field("inner", &self.inner)
            .finish()
    }
}
