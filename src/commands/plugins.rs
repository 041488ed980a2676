//! Plugin loading command.

use clap::Args;
use tracing::info;

use capreg_core::config::AppConfig;
use capreg_core::result::AppResult;

use crate::output;

/// Arguments for the plugins command
#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Scan this directory instead of the configured one
    #[arg(short, long)]
    pub dir: Option<String>,
}

/// Load builtins and modules, then print the load report
pub async fn execute(args: &PluginsArgs, config: &AppConfig) -> AppResult<()> {
    let session = super::bootstrap(&config.plugins, args.dir.as_deref()).await?;

    info!(
        loaded = session.report.loaded.len(),
        failed = session.report.failures.len(),
        entries = session.catalog.len(),
        "Plugin load finished"
    );

    output::print_json(&session.report)
}
