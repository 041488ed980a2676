//! The registry operation set.

use capreg_core::result::AppResult;
use capreg_core::types::PageRequest;

use crate::capability::Capability;
use crate::entry::Entry;

/// Operations shared by the [`Catalog`](crate::Catalog) and every
/// [`StoreAdapter`](crate::StoreAdapter).
///
/// Registration hooks receive a `&dyn Registry`, so a module never
/// depends on the concrete backend it registers into. Soft-deleted
/// entries are invisible to every read.
pub trait Registry: Send + Sync {
    /// Upserts a capability: creates it at version 1, or replaces name,
    /// type, and metadata of the existing entry and bumps its version.
    fn register(&self, item: &dyn Capability) -> AppResult<Entry>;

    /// Strict create. Generates an id when empty; fails `AlreadyExists`
    /// when the id already has a slot.
    fn create(&self, entry: Entry) -> AppResult<Entry>;

    /// Returns the live entry for `id`.
    fn get(&self, id: &str) -> Option<Entry>;

    /// Replaces name, type, and metadata of a live entry.
    fn update(&self, entry: Entry) -> AppResult<Entry>;

    /// Soft-deletes an entry.
    fn unregister(&self, id: &str) -> AppResult<()>;

    /// Makes a soft-deleted entry visible again.
    fn restore(&self, id: &str) -> AppResult<Entry>;

    /// All live entries, in no particular order.
    fn list(&self) -> Vec<Entry>;

    /// Live entries with the given type tag, in no particular order.
    fn list_by_type(&self, kind: &str) -> Vec<Entry>;

    /// A window over the live entries ordered by id.
    fn list_paginated(&self, limit: usize, offset: usize) -> Vec<Entry>;
}

/// Keeps entries of one type.
pub(crate) fn filter_by_type(entries: Vec<Entry>, kind: &str) -> Vec<Entry> {
    entries.into_iter().filter(|e| e.kind == kind).collect()
}

/// Orders a snapshot by id and cuts the requested window.
pub fn paginate(mut entries: Vec<Entry>, limit: usize, offset: usize) -> Vec<Entry> {
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    PageRequest::new(limit, offset).apply(entries)
}
