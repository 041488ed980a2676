//! Opening module files and resolving their registration hook.

use std::path::Path;

use capreg_core::error::{AppError, ErrorKind};
use capreg_core::result::AppResult;

use crate::abi::PluginDeclaration;

/// A module that has been opened and stays mapped while this value lives.
pub trait LoadedModule: Send + Sync {
    /// Resolves the declaration exported under `symbol`.
    ///
    /// A missing symbol is a `PluginContract` error.
    fn declaration(&self, symbol: &str) -> AppResult<&PluginDeclaration>;
}

/// Turns a file on disk into a [`LoadedModule`].
pub trait ModuleOpener: Send + Sync {
    /// Opens `path`. Failure is a `PluginLoad` error.
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>>;
}

/// Opens platform shared libraries with `libloading`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedLibraryOpener;

impl ModuleOpener for SharedLibraryOpener {
    fn open(&self, path: &Path) -> AppResult<Box<dyn LoadedModule>> {
        // SAFETY: loading a library runs its initializers. Modules run with
        // the host's trust level; only trusted directories are scanned.
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            AppError::with_source(
                ErrorKind::PluginLoad,
                format!("Failed to load plugin library '{}': {}", path.display(), e),
                e,
            )
        })?;

        Ok(Box::new(SharedLibrary { library }))
    }
}

/// A library opened by [`SharedLibraryOpener`].
struct SharedLibrary {
    library: libloading::Library,
}

impl LoadedModule for SharedLibrary {
    fn declaration(&self, symbol: &str) -> AppResult<&PluginDeclaration> {
        // SAFETY: the symbol is the address of a `PluginDeclaration` static;
        // the returned reference borrows `self`, which keeps the library mapped.
        let address: libloading::Symbol<'_, *const PluginDeclaration> =
            unsafe { self.library.get(symbol.as_bytes()) }.map_err(|e| {
                AppError::with_source(
                    ErrorKind::PluginContract,
                    format!("Module does not export '{symbol}': {e}"),
                    e,
                )
            })?;

        let declaration = *address;
        if declaration.is_null() {
            return Err(AppError::plugin_contract(format!(
                "Module exports a null '{symbol}'"
            )));
        }

        Ok(unsafe { &*declaration })
    }
}
