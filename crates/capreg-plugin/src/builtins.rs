//! Registration modules compiled into the host.
//!
//! They go through the same contract check and report as modules found on
//! disk, via [`PluginLoader::load_builtins`](crate::PluginLoader::load_builtins).

use capreg_catalog::{CapabilityDescriptor, Registry};
use capreg_core::result::AppResult;

use crate::abi::PluginDeclaration;

/// Git hosting API.
pub static GIT: PluginDeclaration = PluginDeclaration::new("git", register_git);

/// Generic HTTP API.
pub static API: PluginDeclaration = PluginDeclaration::new("api", register_api);

/// Every builtin, in registration order.
pub static BUILTINS: &[&PluginDeclaration] = &[&GIT, &API];

fn register_git(registry: &dyn Registry) -> AppResult<()> {
    registry.register(
        &CapabilityDescriptor::new("git", "API", "Git API").with_metadata("protocols", "https,ssh"),
    )?;
    Ok(())
}

fn register_api(registry: &dyn Registry) -> AppResult<()> {
    registry.register(&CapabilityDescriptor::new("api", "API", "Generic API"))?;
    Ok(())
}
