//! Per-module outcomes of a load pass.

use std::fmt;
use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use capreg_core::error::{AppError, ErrorKind};

/// Where a module came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleSource {
    /// A file found by a directory scan or named explicitly.
    File(PathBuf),
    /// An entry of the compiled-in builtin table.
    Builtin(String),
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin(name) => write!(f, "builtin:{name}"),
        }
    }
}

/// A module whose hook ran successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedPlugin {
    /// Where the module came from.
    pub source: ModuleSource,
    /// Name from the module's declaration.
    pub name: String,
}

/// A module that failed to open, validate, or register.
#[derive(Debug, Clone)]
pub struct PluginFailure {
    /// Where the module came from.
    pub source: ModuleSource,
    /// The failure; its kind is one of the plugin error kinds.
    pub error: AppError,
}

impl Serialize for PluginFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PluginFailure", 3)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("kind", &self.error.kind)?;
        state.serialize_field("message", &self.error.message)?;
        state.end()
    }
}

/// Aggregated outcome of loading a set of modules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Modules that registered.
    pub loaded: Vec<LoadedPlugin>,
    /// Modules that failed, in scan order.
    pub failures: Vec<PluginFailure>,
}

impl LoadReport {
    /// Number of modules attempted.
    pub fn scanned(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }

    /// Whether no module failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether modules were attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.loaded.is_empty() && !self.failures.is_empty()
    }

    /// Failures of one kind.
    pub fn failures_of(&self, kind: ErrorKind) -> impl Iterator<Item = &PluginFailure> {
        self.failures.iter().filter(move |f| f.error.kind == kind)
    }

    /// Appends another report's outcomes.
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded.extend(other.loaded);
        self.failures.extend(other.failures);
    }
}
