//! Module discovery and activation.

use std::any::Any;
use std::ffi::OsStr;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use capreg_catalog::Registry;
use capreg_core::config::{LoadPolicy, PluginConfig};
use capreg_core::error::{AppError, ErrorKind};
use capreg_core::result::AppResult;

use crate::abi::{PluginDeclaration, REGISTRATION_SYMBOL};
use crate::opener::{LoadedModule, ModuleOpener, SharedLibraryOpener};
use crate::report::{LoadReport, LoadedPlugin, ModuleSource, PluginFailure};

/// Loads registration modules and runs their hooks against a registry.
///
/// Each module is opened, its `Register` declaration resolved and checked,
/// and its hook invoked. A failing module is recorded in the
/// [`LoadReport`] and, under [`LoadPolicy::ContinueOnError`], the
/// remaining modules still load. No registry lock is held while a module
/// is being opened.
pub struct PluginLoader {
    /// Registry handed to every hook.
    registry: Arc<dyn Registry>,
    /// Turns files into modules.
    opener: Box<dyn ModuleOpener>,
    /// Module file extension, without the dot.
    extension: String,
    /// Failure aggregation policy.
    policy: LoadPolicy,
    /// Opened modules, kept alive for the lifetime of the loader.
    modules: Vec<Box<dyn LoadedModule>>,
}

impl PluginLoader {
    /// Creates a loader for platform shared libraries.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            opener: Box::new(SharedLibraryOpener),
            extension: std::env::consts::DLL_EXTENSION.to_string(),
            policy: LoadPolicy::default(),
            modules: Vec::new(),
        }
    }

    /// Creates a loader with extension and policy taken from configuration.
    pub fn from_config(registry: Arc<dyn Registry>, config: &PluginConfig) -> Self {
        Self::new(registry)
            .with_extension(&config.extension)
            .with_policy(config.policy)
    }

    /// Replaces the module opener.
    pub fn with_opener(mut self, opener: impl ModuleOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Sets the module file extension; a leading dot is ignored.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets the failure aggregation policy.
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of module files currently held open.
    pub fn open_modules(&self) -> usize {
        self.modules.len()
    }

    /// Loads every module under `dir`, recursively, in path order.
    ///
    /// Fails when the directory cannot be read, when every scanned module
    /// failed, or, under [`LoadPolicy::FailFast`], at the first failure.
    /// An empty directory yields an empty report.
    pub fn load_all(&mut self, dir: impl AsRef<Path>) -> AppResult<LoadReport> {
        let dir = dir.as_ref();
        let paths = self.discover(dir)?;

        info!(
            directory = %dir.display(),
            modules = paths.len(),
            "Scanning plugin directory"
        );

        let mut report = LoadReport::default();
        for path in paths {
            let outcome = self.load_plugin(&path);
            self.record(&mut report, ModuleSource::File(path), outcome)?;
        }

        self.conclude(report, &dir.display().to_string())
    }

    /// Loads a single module file.
    pub fn load_plugin(&mut self, path: impl AsRef<Path>) -> AppResult<LoadedPlugin> {
        let path = path.as_ref();
        if !self.has_extension(path) {
            return Err(AppError::plugin_load(format!(
                "'{}' is not a .{} plugin module",
                path.display(),
                self.extension
            )));
        }

        let module = self.opener.open(path)?;
        let declaration = module.declaration(REGISTRATION_SYMBOL).map(|d| *d);
        self.modules.push(module);

        let declaration = declaration.map_err(|e| {
            AppError::new(e.kind, format!("'{}': {}", path.display(), e.message))
        })?;
        self.activate(&ModuleSource::File(path.to_path_buf()), &declaration)
    }

    /// Runs compiled-in modules through the same checks and policy.
    pub fn load_builtins(&self, modules: &[&PluginDeclaration]) -> AppResult<LoadReport> {
        let mut report = LoadReport::default();
        for declaration in modules {
            let source = ModuleSource::Builtin(declaration.name.to_string());
            let outcome = self.activate(&source, declaration);
            self.record(&mut report, source, outcome)?;
        }

        self.conclude(report, "builtin table")
    }

    /// Validates a declaration and invokes its hook.
    fn activate(
        &self,
        source: &ModuleSource,
        declaration: &PluginDeclaration,
    ) -> AppResult<LoadedPlugin> {
        declaration
            .check_contract()
            .map_err(|e| AppError::new(e.kind, format!("{source}: {}", e.message)))?;

        let registry: &dyn Registry = self.registry.as_ref();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (declaration.register)(registry)));

        match outcome {
            Ok(Ok(())) => {
                info!(plugin = declaration.name, source = %source, "Plugin registered");
                Ok(LoadedPlugin {
                    source: source.clone(),
                    name: declaration.name.to_string(),
                })
            }
            Ok(Err(e)) => Err(AppError::with_source(
                ErrorKind::PluginRegistration,
                format!(
                    "Plugin '{}' ({source}) failed to register: {e}",
                    declaration.name
                ),
                e,
            )),
            Err(payload) => Err(AppError::plugin_registration(format!(
                "Plugin '{}' ({source}) panicked during registration: {}",
                declaration.name,
                panic_message(payload.as_ref())
            ))),
        }
    }

    /// Files under `dir` carrying the module extension, sorted.
    fn discover(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let entries = std::fs::read_dir(&current).map_err(|e| {
                AppError::with_source(
                    ErrorKind::PluginLoad,
                    format!("Cannot read plugin directory '{}': {e}", current.display()),
                    e,
                )
            })?;

            // Directory symlinks are not followed, so a link cycle cannot
            // yield the same module twice.
            for entry in entries {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_dir() {
                    pending.push(path);
                } else if self.has_extension(&path) {
                    found.push(path);
                }
            }
        }

        found.sort();
        Ok(found)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Files one module outcome, or stops the pass under fail-fast.
    fn record(
        &self,
        report: &mut LoadReport,
        source: ModuleSource,
        outcome: AppResult<LoadedPlugin>,
    ) -> AppResult<()> {
        match outcome {
            Ok(plugin) => report.loaded.push(plugin),
            Err(error) => {
                warn!(source = %source, error = %error, "Plugin module failed");
                if self.policy == LoadPolicy::FailFast {
                    return Err(error);
                }
                report.failures.push(PluginFailure { source, error });
            }
        }
        Ok(())
    }

    /// Applies the aggregation policy once a pass has finished.
    fn conclude(&self, report: LoadReport, origin: &str) -> AppResult<LoadReport> {
        if report.all_failed() {
            let first = &report.failures[0].error;
            error!(
                origin,
                failed = report.failures.len(),
                "Every plugin module failed"
            );
            return Err(AppError::new(
                first.kind,
                format!(
                    "All {} plugin modules from {origin} failed; first error: {first}",
                    report.failures.len()
                ),
            ));
        }

        if report.is_clean() {
            info!(origin, loaded = report.loaded.len(), "Plugins loaded");
        } else {
            warn!(
                origin,
                loaded = report.loaded.len(),
                failed = report.failures.len(),
                "Plugins loaded with failures"
            );
        }
        Ok(report)
    }
}

impl fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginLoader")
            .field("extension", &self.extension)
            .field("policy", &self.policy)
            .field("open_modules", &self.modules.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
