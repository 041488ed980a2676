//! Entry storage backends.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use capreg_core::error::AppError;
use capreg_core::result::AppResult;

use crate::entry::Entry;

/// A backend holding concrete [`Entry`] values.
///
/// Implementations own the uniqueness, versioning, and tombstone rules:
/// each method is one linearizable step on a single identity.
pub trait EntryStore: Send + Sync {
    /// Inserts a new entry; fails `AlreadyExists` if the id has a slot.
    fn insert(&self, entry: Entry) -> AppResult<Entry>;

    /// Inserts at version 1, or replaces fields of an existing slot and
    /// bumps its version. A tombstoned slot is revived.
    fn upsert(&self, entry: Entry) -> AppResult<Entry>;

    /// Returns the entry if present and live.
    fn get(&self, id: &str) -> Option<Entry>;

    /// Replaces fields of a live entry; fails `NotFound` otherwise.
    fn update(&self, entry: Entry) -> AppResult<Entry>;

    /// Tombstones an entry; fails `NotFound` if the id has no slot.
    fn soft_delete(&self, id: &str) -> AppResult<()>;

    /// Clears the tombstone; fails `NotFound` if the id has no slot.
    fn restore(&self, id: &str) -> AppResult<Entry>;

    /// Snapshot of all live entries.
    fn live_entries(&self) -> Vec<Entry>;
}

/// In-memory backend: one map behind one reader/writer lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Entry id → entry, tombstones included.
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.read().len()
    }

    /// Number of live entries, counted under the shared lock.
    pub fn live_count(&self) -> usize {
        self.read().values().filter(|e| !e.is_deleted()).count()
    }

    // Critical sections never leave the map half-updated, so a lock
    // poisoned by a panicking caller is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntryStore for MemoryStore {
    fn insert(&self, mut entry: Entry) -> AppResult<Entry> {
        entry.ensure_id();
        entry.normalize()?;

        let mut entries = self.write();
        if entries.contains_key(&entry.id) {
            return Err(AppError::already_exists(format!(
                "Entry '{}' already exists",
                entry.id
            )));
        }

        entry.mark_created();
        entries.insert(entry.id.clone(), entry.clone());

        info!(entry_id = %entry.id, kind = %entry.kind, "Entry created");
        Ok(entry)
    }

    fn upsert(&self, mut entry: Entry) -> AppResult<Entry> {
        entry.normalize()?;

        let mut entries = self.write();
        if let Some(existing) = entries.get_mut(&entry.id) {
            let revived = existing.restore();
            existing.apply_update(entry.name, entry.kind, entry.metadata);
            debug!(
                entry_id = %existing.id,
                version = existing.version,
                revived,
                "Entry re-registered"
            );
            return Ok(existing.clone());
        }

        entry.mark_created();
        entries.insert(entry.id.clone(), entry.clone());

        info!(entry_id = %entry.id, kind = %entry.kind, "Entry registered");
        Ok(entry)
    }

    fn get(&self, id: &str) -> Option<Entry> {
        self.read().get(id).filter(|e| !e.is_deleted()).cloned()
    }

    fn update(&self, mut entry: Entry) -> AppResult<Entry> {
        entry.normalize()?;

        let mut entries = self.write();
        let existing = entries
            .get_mut(&entry.id)
            .filter(|e| !e.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("Entry '{}' not found", entry.id)))?;

        existing.apply_update(entry.name, entry.kind, entry.metadata);
        debug!(entry_id = %existing.id, version = existing.version, "Entry updated");
        Ok(existing.clone())
    }

    fn soft_delete(&self, id: &str) -> AppResult<()> {
        let mut entries = self.write();
        let existing = entries
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Entry '{id}' not found")))?;

        if existing.soft_delete() {
            info!(entry_id = %id, "Entry unregistered");
        } else {
            debug!(entry_id = %id, "Entry already unregistered");
        }
        Ok(())
    }

    fn restore(&self, id: &str) -> AppResult<Entry> {
        let mut entries = self.write();
        let existing = entries
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Entry '{id}' not found")))?;

        if existing.restore() {
            info!(entry_id = %id, version = existing.version, "Entry restored");
        }
        Ok(existing.clone())
    }

    fn live_entries(&self) -> Vec<Entry> {
        self.read()
            .values()
            .filter(|e| !e.is_deleted())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capreg_core::ErrorKind;

    #[test]
    fn test_insert_is_strict() {
        let store = MemoryStore::new();
        let created = store.insert(Entry::new("git", "API", "Git API")).unwrap();
        assert_eq!(created.version, 1);

        let err = store.insert(Entry::new("git", "API", "Other")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_insert_over_tombstone_is_rejected() {
        let store = MemoryStore::new();
        store.insert(Entry::new("git", "API", "Git API")).unwrap();
        store.soft_delete("git").unwrap();

        let err = store.insert(Entry::new("git", "API", "Git API")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_insert_generates_missing_id() {
        let store = MemoryStore::new();
        let created = store.insert(Entry::new("", "API", "anonymous")).unwrap();
        assert!(!created.id.is_empty());
        assert!(store.get(&created.id).is_some());
    }

    #[test]
    fn test_upsert_revives_tombstone_and_bumps_version() {
        let store = MemoryStore::new();
        store.upsert(Entry::new("git", "API", "Git API")).unwrap();
        store.soft_delete("git").unwrap();
        assert!(store.get("git").is_none());

        let revived = store.upsert(Entry::new("git", "API", "Git API v2")).unwrap();
        assert_eq!(revived.version, 2);
        assert_eq!(revived.name, "Git API v2");
        assert!(store.get("git").is_some());
    }

    #[test]
    fn test_update_preserves_created_at() {
        let store = MemoryStore::new();
        let created = store.insert(Entry::new("git", "API", "Git API")).unwrap();
        let updated = store.update(Entry::new("git", "VCS", "Git")).unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.kind, "VCS");
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn test_update_tombstone_is_not_found() {
        let store = MemoryStore::new();
        store.insert(Entry::new("git", "API", "Git API")).unwrap();
        store.soft_delete("git").unwrap();

        let err = store.update(Entry::new("git", "API", "Git")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_tombstones_keep_their_slot() {
        let store = MemoryStore::new();
        store.insert(Entry::new("a", "API", "A")).unwrap();
        store.insert(Entry::new("b", "API", "B")).unwrap();
        store.soft_delete("a").unwrap();

        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.live_entries().len(), 1);
        assert_eq!(store.live_count(), 1);
    }
}
