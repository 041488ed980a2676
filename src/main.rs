//! Capability registry command-line entry point.
//!
//! Builds a catalog, runs the builtin and on-disk registration modules
//! into it, and answers queries against the result.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use capreg_core::config::{AppConfig, LoggingConfig};
use capreg_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

/// Used when neither `--config` nor `CAPREG_CONFIG` is set.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(config).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(explicit: Option<&str>) -> Result<AppConfig, AppError> {
    let config_path = explicit
        .map(str::to_string)
        .or_else(|| std::env::var("CAPREG_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    AppConfig::load(&config_path)
        .map_err(|e| AppError::configuration(format!("Config load error ({config_path}): {e}")))
}

/// Initialize tracing/logging. Output goes to stderr so stdout stays JSON.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
