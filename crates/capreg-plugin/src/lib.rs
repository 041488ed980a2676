//! # capreg-plugin
//!
//! Discovers registration modules and feeds them into a registry:
//!
//! - The registration-hook ABI every module exports ([`PluginDeclaration`])
//! - [`export_registration!`] for module authors
//! - [`PluginLoader`], which scans a directory, validates each module's
//!   contract, and invokes its hook with partial-failure semantics
//! - A compiled-in builtin table for modules that ship with the host

pub mod abi;
pub mod builtins;
pub mod loader;
pub mod macros;
pub mod opener;
pub mod prelude;
pub mod report;

pub use abi::{ABI_VERSION, CORE_VERSION, PluginDeclaration, REGISTRATION_SYMBOL, RegisterFn};
pub use loader::PluginLoader;
pub use opener::{LoadedModule, ModuleOpener, SharedLibraryOpener};
pub use report::{LoadReport, LoadedPlugin, ModuleSource, PluginFailure};
