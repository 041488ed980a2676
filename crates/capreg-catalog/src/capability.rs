//! The capability contract accepted by [`Registry::register`](crate::Registry::register).

use std::any::Any;

use crate::entry::{Entry, Metadata};

/// Upcast to `Any` for concrete-type coercion at adapter boundaries.
pub trait AsAny {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Anything with a stable identity and a type tag can be registered.
///
/// Plugins register their own domain objects (container descriptors,
/// repository descriptors, API descriptors) through this one trait.
pub trait Capability: AsAny + Send + Sync {
    /// Stable identity. Must not be empty.
    fn id(&self) -> &str;

    /// Type tag.
    fn kind(&self) -> &str;

    /// Display name; defaults to the identity.
    fn name(&self) -> &str {
        self.id()
    }

    /// Metadata stored alongside the entry.
    fn metadata(&self) -> Metadata {
        Metadata::new()
    }
}

impl Capability for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

impl Entry {
    /// Builds an unstored entry from any capability.
    pub fn from_capability(item: &dyn Capability) -> Self {
        let mut entry = Entry::new(item.id(), item.kind(), item.name());
        entry.metadata = item.metadata();
        entry
    }
}

/// General-purpose capability for modules without a domain type of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityDescriptor {
    /// Identity.
    pub id: String,
    /// Type tag.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Metadata.
    pub metadata: Metadata,
}

impl CapabilityDescriptor {
    /// Creates a descriptor with empty metadata.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            metadata: Metadata::new(),
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
}

impl Capability for CapabilityDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Repository {
        slug: String,
    }

    impl Capability for Repository {
        fn id(&self) -> &str {
            &self.slug
        }

        fn kind(&self) -> &str {
            "Repository"
        }
    }

    #[test]
    fn test_defaults_for_minimal_capability() {
        let repo = Repository {
            slug: "capreg".to_string(),
        };
        let entry = Entry::from_capability(&repo);
        assert_eq!(entry.id, "capreg");
        assert_eq!(entry.kind, "Repository");
        assert_eq!(entry.name, "capreg");
        assert!(entry.metadata.is_empty());
    }

    #[test]
    fn test_downcast_through_dyn() {
        let descriptor = CapabilityDescriptor::new("git", "API", "Git API");
        let item: &dyn Capability = &descriptor;
        assert!(item.as_any().downcast_ref::<CapabilityDescriptor>().is_some());
        assert!(item.as_any().downcast_ref::<Entry>().is_none());
    }

    #[test]
    fn test_descriptor_metadata_carries_over() {
        let descriptor =
            CapabilityDescriptor::new("docker", "API", "Docker API").with_metadata("port", 2375);
        let entry = Entry::from_capability(&descriptor);
        assert_eq!(entry.metadata["port"], 2375);
    }
}
