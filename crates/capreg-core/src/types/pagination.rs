//! Limit/offset pagination for list operations.

use serde::{Deserialize, Serialize};

/// Window over a list result: skip `offset` items, then take up to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items returned.
    #[serde(default)]
    pub limit: usize,
    /// Number of items skipped.
    #[serde(default)]
    pub offset: usize,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Cut the window out of `items`.
    ///
    /// An offset at or past the end yields an empty vector.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.offset >= items.len() {
            return Vec::new();
        }
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}
