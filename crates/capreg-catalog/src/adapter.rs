//! Adapter exposing any [`EntryStore`] as a [`Registry`].

use capreg_core::error::AppError;
use capreg_core::result::AppResult;

use crate::capability::Capability;
use crate::entry::Entry;
use crate::registry::{self, Registry};
use crate::store::EntryStore;

/// Presents a concrete-[`Entry`] backend through the registry operation set.
///
/// The adapter only translates: a registered capability must already be an
/// [`Entry`], anything else is rejected with `InvalidArgument`. All rules
/// about versions and tombstones stay in the backend.
#[derive(Debug, Default)]
pub struct StoreAdapter<S> {
    store: S,
}

impl<S: EntryStore> StoreAdapter<S> {
    /// Wraps a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn coerce(item: &dyn Capability) -> AppResult<&Entry> {
        item.as_any().downcast_ref::<Entry>().ok_or_else(|| {
            AppError::invalid_argument(format!(
                "Capability '{}' is not a concrete Entry",
                item.id()
            ))
        })
    }
}

impl<S: EntryStore> Registry for StoreAdapter<S> {
    fn register(&self, item: &dyn Capability) -> AppResult<Entry> {
        let entry = Self::coerce(item)?;
        self.store.upsert(entry.clone())
    }

    fn create(&self, entry: Entry) -> AppResult<Entry> {
        self.store.insert(entry)
    }

    fn get(&self, id: &str) -> Option<Entry> {
        self.store.get(id)
    }

    fn update(&self, entry: Entry) -> AppResult<Entry> {
        self.store.update(entry)
    }

    fn unregister(&self, id: &str) -> AppResult<()> {
        self.store.soft_delete(id)
    }

    fn restore(&self, id: &str) -> AppResult<Entry> {
        self.store.restore(id)
    }

    fn list(&self) -> Vec<Entry> {
        self.store.live_entries()
    }

    fn list_by_type(&self, kind: &str) -> Vec<Entry> {
        registry::filter_by_type(self.store.live_entries(), kind)
    }

    fn list_paginated(&self, limit: usize, offset: usize) -> Vec<Entry> {
        registry::paginate(self.store.live_entries(), limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityDescriptor;
    use crate::store::MemoryStore;
    use capreg_core::ErrorKind;

    #[test]
    fn test_register_concrete_entry() {
        let adapter = StoreAdapter::new(MemoryStore::new());
        let entry = Entry::new("git", "API", "Git API");

        let stored = adapter.register(&entry).unwrap();
        assert_eq!(stored.version, 1);

        let again = adapter.register(&Entry::new("git", "API", "Git API v2")).unwrap();
        assert_eq!(again.version, 2);
        assert_eq!(adapter.get("git").unwrap().name, "Git API v2");
    }

    #[test]
    fn test_register_rejects_other_capability_types() {
        let adapter = StoreAdapter::new(MemoryStore::new());
        let descriptor = CapabilityDescriptor::new("git", "API", "Git API");

        let err = adapter.register(&descriptor).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(adapter.list().is_empty());
    }

    #[test]
    fn test_adapter_behind_dyn_registry() {
        let registry: Box<dyn Registry> = Box::new(StoreAdapter::new(MemoryStore::new()));
        registry.register(&Entry::new("git", "API", "Git API")).unwrap();
        registry.register(&Entry::new("pg", "DB", "Postgres")).unwrap();
        registry.unregister("pg").unwrap();

        assert_eq!(registry.list_by_type("API").len(), 1);
        assert!(registry.list_by_type("DB").is_empty());
        assert_eq!(registry.restore("pg").unwrap().version, 1);
        assert_eq!(registry.list_paginated(1, 1).len(), 1);
    }

    #[test]
    fn test_store_accessor_exposes_tombstones() {
        let adapter = StoreAdapter::new(MemoryStore::new());
        adapter.create(Entry::new("git", "API", "Git API")).unwrap();
        adapter.unregister("git").unwrap();
        assert_eq!(adapter.store().slot_count(), 1);
        assert!(adapter.get("git").is_none());
    }
}
