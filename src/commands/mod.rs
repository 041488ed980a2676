//! CLI command definitions and dispatch.

pub mod config;
pub mod entries;
pub mod plugins;

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use capreg_catalog::Catalog;
use capreg_core::config::{AppConfig, PluginConfig};
use capreg_core::error::AppError;
use capreg_core::result::AppResult;
use capreg_plugin::builtins::BUILTINS;
use capreg_plugin::{LoadReport, PluginLoader};

/// Capability registry: load registration modules and inspect the catalog
#[derive(Debug, Parser)]
#[command(name = "capreg", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: $CAPREG_CONFIG, then config/default.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load plugins and print the load report
    Plugins(plugins::PluginsArgs),
    /// List live entries
    List(entries::ListArgs),
    /// Show a single entry
    Get(entries::GetArgs),
    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Plugins(args) => plugins::execute(args, &config).await,
            Commands::List(args) => entries::list(args, &config).await,
            Commands::Get(args) => entries::get(args, &config).await,
            Commands::Config => config::execute(&config),
        }
    }
}

/// A catalog populated from the configured registration modules.
pub struct Session {
    /// The populated catalog.
    pub catalog: Arc<Catalog>,
    /// Outcome of every module run.
    pub report: LoadReport,
    /// Holds dynamically loaded modules open.
    _loader: PluginLoader,
}

/// Builds a fresh catalog and runs the configured modules into it.
///
/// `directory` overrides the configured plugin directory and forces a scan
/// even when auto-load is off.
pub async fn bootstrap(config: &PluginConfig, directory: Option<&str>) -> AppResult<Session> {
    let config = config.clone();
    let directory = directory.map(str::to_string);

    tokio::task::spawn_blocking(move || populate(&config, directory.as_deref()))
        .await
        .map_err(|e| AppError::internal(format!("Plugin loading task failed: {e}")))?
}

fn populate(config: &PluginConfig, directory: Option<&str>) -> AppResult<Session> {
    let catalog = Arc::new(Catalog::new());
    let mut loader = PluginLoader::from_config(catalog.clone(), config);
    let mut report = LoadReport::default();

    if config.builtins {
        report.merge(loader.load_builtins(BUILTINS)?);
    }

    match directory {
        Some(dir) => report.merge(loader.load_all(dir)?),
        None if !config.auto_load => debug!("Plugin auto-load disabled"),
        None if Path::new(&config.directory).is_dir() => {
            report.merge(loader.load_all(&config.directory)?);
        }
        None => warn!(
            directory = %config.directory,
            "Plugin directory not found, skipping scan"
        ),
    }

    Ok(Session {
        catalog,
        report,
        _loader: loader,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> PluginConfig {
        PluginConfig {
            auto_load: false,
            ..PluginConfig::default()
        }
    }

    #[test]
    fn test_cli_parses_global_config_flag() {
        let cli = Cli::try_parse_from(["capreg", "list", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("alt.toml"));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["capreg"]).is_err());
    }

    #[tokio::test]
    async fn test_bootstrap_registers_builtins() {
        let session = bootstrap(&offline(), None).await.unwrap();
        assert!(session.report.is_clean());
        assert_eq!(session.report.loaded.len(), BUILTINS.len());
        assert!(session.catalog.get("git").is_some());
    }

    #[tokio::test]
    async fn test_bootstrap_without_builtins_is_empty() {
        let config = PluginConfig {
            builtins: false,
            ..offline()
        };
        let session = bootstrap(&config, None).await.unwrap();
        assert!(session.catalog.is_empty());
    }

    #[tokio::test]
    async fn test_missing_configured_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = PluginConfig {
            directory: dir.path().join("absent").display().to_string(),
            ..PluginConfig::default()
        };
        let session = bootstrap(&config, None).await.unwrap();
        assert_eq!(session.report.scanned(), BUILTINS.len());
    }

    #[tokio::test]
    async fn test_explicit_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent").display().to_string();
        let err = bootstrap(&offline(), Some(&missing)).await.err().unwrap();
        assert_eq!(err.kind, capreg_core::ErrorKind::PluginLoad);
    }
}
