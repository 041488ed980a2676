//! # capreg-catalog
//!
//! The registry core. Provides:
//!
//! - [`Entry`], the stored record with version counter and tombstone flag
//! - [`Capability`], the contract a value satisfies to be registrable
//! - [`Registry`], the operation set handed to registration hooks
//! - [`Catalog`], the thread-safe store implementing it
//! - [`EntryStore`] / [`StoreAdapter`], for substituting another backend

pub mod adapter;
pub mod capability;
pub mod catalog;
pub mod entry;
pub mod registry;
pub mod store;

pub use adapter::StoreAdapter;
pub use capability::{Capability, CapabilityDescriptor};
pub use catalog::Catalog;
pub use entry::{Entry, Metadata};
pub use registry::Registry;
pub use store::{EntryStore, MemoryStore};
