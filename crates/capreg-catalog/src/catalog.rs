//! The catalog: single source of truth for registered capabilities.

use capreg_core::result::AppResult;

use crate::capability::Capability;
use crate::entry::Entry;
use crate::registry::{self, Registry};
use crate::store::{EntryStore, MemoryStore};

/// Thread-safe catalog of entries keyed by identity.
///
/// Writers take the store's exclusive lock, readers its shared lock, and
/// no lock is held across calls into a [`Capability`]: the accessors are
/// read into an owned draft before the store is touched. Returned entries
/// are snapshots; the map itself never leaves the catalog.
///
/// Construct one explicitly and hand it around as `Arc<Catalog>` or
/// `&dyn Registry`; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct Catalog {
    store: MemoryStore,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers any capability (upsert).
    pub fn register(&self, item: &dyn Capability) -> AppResult<Entry> {
        self.store.upsert(Entry::from_capability(item))
    }

    /// Strict create; see [`Registry::create`].
    pub fn create(&self, entry: Entry) -> AppResult<Entry> {
        self.store.insert(entry)
    }

    /// Returns the live entry for `id`.
    pub fn get(&self, id: &str) -> Option<Entry> {
        self.store.get(id)
    }

    /// Replaces the fields of a live entry.
    pub fn update(&self, entry: Entry) -> AppResult<Entry> {
        self.store.update(entry)
    }

    /// Soft-deletes `id`. Unregistering a tombstone is a no-op.
    pub fn unregister(&self, id: &str) -> AppResult<()> {
        self.store.soft_delete(id)
    }

    /// Restores a soft-deleted entry without touching its version.
    pub fn restore(&self, id: &str) -> AppResult<Entry> {
        self.store.restore(id)
    }

    /// All live entries.
    pub fn list(&self) -> Vec<Entry> {
        self.store.live_entries()
    }

    /// Live entries of one type.
    pub fn list_by_type(&self, kind: &str) -> Vec<Entry> {
        registry::filter_by_type(self.store.live_entries(), kind)
    }

    /// Up to `limit` live entries after skipping `offset`, ordered by id.
    pub fn list_paginated(&self, limit: usize, offset: usize) -> Vec<Entry> {
        registry::paginate(self.store.live_entries(), limit, offset)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.store.live_count()
    }

    /// Whether no live entry exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Registry for Catalog {
    fn register(&self, item: &dyn Capability) -> AppResult<Entry> {
        Catalog::register(self, item)
    }

    fn create(&self, entry: Entry) -> AppResult<Entry> {
        Catalog::create(self, entry)
    }

    fn get(&self, id: &str) -> Option<Entry> {
        Catalog::get(self, id)
    }

    fn update(&self, entry: Entry) -> AppResult<Entry> {
        Catalog::update(self, entry)
    }

    fn unregister(&self, id: &str) -> AppResult<()> {
        Catalog::unregister(self, id)
    }

    fn restore(&self, id: &str) -> AppResult<Entry> {
        Catalog::restore(self, id)
    }

    fn list(&self) -> Vec<Entry> {
        Catalog::list(self)
    }

    fn list_by_type(&self, kind: &str) -> Vec<Entry> {
        Catalog::list_by_type(self, kind)
    }

    fn list_paginated(&self, limit: usize, offset: usize) -> Vec<Entry> {
        Catalog::list_paginated(self, limit, offset)
    }
}
