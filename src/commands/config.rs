//! Configuration command.

use capreg_core::config::AppConfig;
use capreg_core::result::AppResult;

use crate::output;

/// Print the effective configuration after file and environment overlays
pub fn execute(config: &AppConfig) -> AppResult<()> {
    output::print_json(config)
}
