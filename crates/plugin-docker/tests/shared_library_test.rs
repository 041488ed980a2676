//! Loads the compiled `plugin-docker` library through the real opener.

use std::path::PathBuf;
use std::sync::Arc;

use capreg_catalog::{Catalog, Registry};
use capreg_plugin::prelude::ErrorKind;
use capreg_plugin::{ModuleOpener, PluginLoader, REGISTRATION_SYMBOL, SharedLibraryOpener};

fn library_file_name() -> String {
    format!(
        "{}plugin_docker.{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_EXTENSION
    )
}

/// The cdylib cargo builds next to this test binary.
fn built_library() -> PathBuf {
    let exe = std::env::current_exe().expect("test binary path");
    let deps = exe.parent().expect("deps directory");
    let name = library_file_name();

    [deps.to_path_buf(), deps.join("..")]
        .into_iter()
        .map(|dir| dir.join(&name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| panic!("{name} not found near {}", deps.display()))
}

/// A plugin directory holding a copy of the built library.
fn plugin_dir_with_library() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy(built_library(), dir.path().join(library_file_name())).expect("copy library");
    dir
}

#[test]
fn test_load_all_registers_docker_from_shared_library() {
    let dir = plugin_dir_with_library();
    let junk = dir
        .path()
        .join(format!("junk.{}", std::env::consts::DLL_EXTENSION));
    std::fs::write(&junk, b"not a library").unwrap();

    let catalog = Arc::new(Catalog::new());
    let mut loader = PluginLoader::new(catalog.clone());
    let report = loader.load_all(dir.path()).unwrap();

    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].name, "docker");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error.kind, ErrorKind::PluginLoad);
    assert_eq!(loader.open_modules(), 1);

    let entry = catalog.get("docker").unwrap();
    assert_eq!(entry.version, 1);
    assert_eq!(entry.name, "Docker API");
    assert_eq!(entry.metadata["endpoint"], plugin_docker::DEFAULT_ENDPOINT);
}

#[test]
fn test_exported_declaration_passes_contract() {
    let dir = plugin_dir_with_library();
    let module = SharedLibraryOpener
        .open(&dir.path().join(library_file_name()))
        .unwrap();

    let declaration = module.declaration(REGISTRATION_SYMBOL).unwrap();
    assert_eq!(declaration.name, "docker");
    declaration.check_contract().unwrap();

    let catalog = Catalog::new();
    (declaration.register)(&catalog).unwrap();
    assert_eq!(catalog.list_by_type("API").len(), 1);
}

#[test]
fn test_missing_symbol_is_contract_error() {
    let dir = plugin_dir_with_library();
    let module = SharedLibraryOpener
        .open(&dir.path().join(library_file_name()))
        .unwrap();

    let err = module.declaration("RegisterPlugins").unwrap_err();
    assert_eq!(err.kind, ErrorKind::PluginContract);
}

#[test]
fn test_loading_twice_bumps_version() {
    let dir = plugin_dir_with_library();
    let registry: Arc<dyn Registry> = Arc::new(Catalog::new());

    let mut loader = PluginLoader::new(registry.clone());
    loader.load_all(dir.path()).unwrap();
    loader.load_all(dir.path()).unwrap();

    assert_eq!(registry.get("docker").unwrap().version, 2);
}
