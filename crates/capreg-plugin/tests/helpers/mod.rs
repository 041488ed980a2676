//! Shared helpers for loader integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use capreg_catalog::{CapabilityDescriptor, Catalog, Registry};
use capreg_core::error::AppError;
use capreg_core::result::AppResult;
use capreg_plugin::{LoadedModule, ModuleOpener, PluginDeclaration, REGISTRATION_SYMBOL};

/// A module that exports `Register` only when it has a declaration.
#[derive(Clone, Copy)]
pub struct FakeModule(pub Option<PluginDeclaration>);

impl LoadedModule for FakeModule {
    fn declaration(&self, symbol: &str) -> AppResult<&PluginDeclaration> {
        self.0
            .as_ref()
            .filter(|_| symbol == REGISTRATION_SYMBOL)
            .ok_or_else(|| AppError::plugin_contract(format!("Module does not export '{symbol}'")))
    }
}

/// Opens files by name from a fixed table; unknown files fail to open.
#[derive(Default)]
pub struct FakeOpener {
    modules: HashMap<String, FakeModule>,
}

impl FakeOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file exporting the given declaration.
    pub fn with_module(mut self, file_name: &str, declaration: PluginDeclaration) -> Self {
        self.modules
            .insert(file_name.to_string(), FakeModule(Some(declaration)));
        self
    }

    /// A file that opens but exports no hook.
    pub fn without_hook(mut self, file_name: &str) -> Self {
        self.modules.insert(file_name.to_string(), FakeModule(None));
        self
    }
}

impl ModuleOpener for FakeOpener {
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.modules
            .get(name)
            .map(|m| Box::new(*m) as Box<dyn LoadedModule>)
            .ok_or_else(|| AppError::plugin_load(format!("cannot open '{}'", path.display())))
    }
}

/// Creates a temporary plugin directory containing the given empty files.
pub fn plugin_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for file in files {
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, b"not a real library").expect("write module file");
    }
    dir
}

pub fn catalog() -> (Arc<Catalog>, Arc<dyn Registry>) {
    let catalog = Arc::new(Catalog::new());
    let registry: Arc<dyn Registry> = catalog.clone();
    (catalog, registry)
}

pub fn register_alpha(registry: &dyn Registry) -> AppResult<()> {
    registry.register(&CapabilityDescriptor::new("alpha", "API", "Alpha API"))?;
    Ok(())
}

pub fn register_beta(registry: &dyn Registry) -> AppResult<()> {
    registry.register(&CapabilityDescriptor::new("beta", "API", "Beta API"))?;
    registry.register(&CapabilityDescriptor::new("beta-db", "DB", "Beta Store"))?;
    Ok(())
}

pub fn register_gamma(registry: &dyn Registry) -> AppResult<()> {
    registry.register(&CapabilityDescriptor::new("gamma", "API", "Gamma API"))?;
    Ok(())
}

pub fn register_invalid(registry: &dyn Registry) -> AppResult<()> {
    registry.register(&CapabilityDescriptor::new("half", "API", "Registered first"))?;
    registry.register(&CapabilityDescriptor::new("", "API", "No identity"))?;
    Ok(())
}

pub fn register_panicking(_registry: &dyn Registry) -> AppResult<()> {
    panic!("registration hook exploded");
}
