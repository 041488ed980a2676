//! Catalog entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use capreg_core::error::AppError;
use capreg_core::result::AppResult;

/// Free-form entry metadata. Replaced wholesale on update, never merged.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A registered capability.
///
/// Serializes to the wire shape
/// `{id, type, name, metadata, createdAt, updatedAt, version}`; the
/// tombstone flag stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Identity, unique within a catalog.
    #[serde(default)]
    pub id: String,
    /// Type tag, used for filtered listing.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable label.
    #[serde(default)]
    pub name: String,
    /// Arbitrary key/value metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Creation time; fixed once stored.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Time of the last mutation, including soft delete and restore.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Starts at 1 when stored, bumped once per successful update.
    #[serde(default)]
    pub version: u64,
    #[serde(skip)]
    deleted: bool,
}

impl Entry {
    /// Creates an unstored entry. The store assigns version and timestamps.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            metadata: Metadata::new(),
            created_at: now,
            updated_at: now,
            version: 0,
            deleted: false,
        }
    }

    /// Adds a metadata key.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the entry is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Checks required fields and fills an empty name with the id.
    pub fn normalize(&mut self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::invalid_argument("Entry id must not be empty"));
        }
        if self.kind.trim().is_empty() {
            return Err(AppError::invalid_argument(format!(
                "Entry '{}' has an empty type",
                self.id
            )));
        }
        if self.name.is_empty() {
            self.name = self.id.clone();
        }
        Ok(())
    }

    /// Assigns a random UUID when the id is empty.
    pub fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }

    /// Resets lifecycle state for a first insertion.
    pub fn mark_created(&mut self) {
        let now = Utc::now();
        self.created_at = now;
        self.updated_at = now;
        self.version = 1;
        self.deleted = false;
    }

    /// Replaces name, type, and metadata and bumps the version.
    pub fn apply_update(&mut self, name: String, kind: String, metadata: Metadata) {
        self.name = name;
        self.kind = kind;
        self.metadata = metadata;
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Marks the entry deleted. Returns `false` if it already was.
    pub fn soft_delete(&mut self) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        self.updated_at = Utc::now();
        true
    }

    /// Clears the deleted mark. Returns `false` if the entry was live.
    pub fn restore(&mut self) -> bool {
        if !self.deleted {
            return false;
        }
        self.deleted = false;
        self.updated_at = Utc::now();
        true
    }
}
