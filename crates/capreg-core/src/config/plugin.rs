//! Plugin loading configuration.

use serde::{Deserialize, Serialize};

/// How per-module failures aggregate into the result of a directory load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Keep going past failed modules; the load fails only when every
    /// scanned module failed.
    #[default]
    ContinueOnError,
    /// Stop at the first failed module and return its error.
    FailFast,
}

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Directory scanned for registration modules.
    #[serde(default = "default_plugin_directory")]
    pub directory: String,
    /// Whether to scan the directory on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
    /// Whether to register the compiled-in builtin modules.
    #[serde(default = "default_true")]
    pub builtins: bool,
    /// File extension of loadable modules, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Failure aggregation policy.
    #[serde(default)]
    pub policy: LoadPolicy,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            auto_load: true,
            builtins: true,
            extension: default_extension(),
            policy: LoadPolicy::default(),
        }
    }
}

fn default_plugin_directory() -> String {
    "./plugins".to_string()
}

fn default_extension() -> String {
    std::env::consts::DLL_EXTENSION.to_string()
}

fn default_true() -> bool {
    true
}
