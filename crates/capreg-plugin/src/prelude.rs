//! Prelude for registration module authors.

pub use capreg_catalog::{Capability, CapabilityDescriptor, Entry, Metadata, Registry};
pub use capreg_core::error::{AppError, ErrorKind};
pub use capreg_core::result::AppResult;

pub use crate::abi::PluginDeclaration;

pub use crate::export_registration;
