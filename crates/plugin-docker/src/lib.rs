//! Docker Engine API registration module.
//!
//! Built as a `cdylib` and dropped into the plugin directory, the host
//! resolves its `Register` declaration and the module registers one
//! [`ContainerRuntime`] describing the local Docker daemon.

use capreg_plugin::prelude::*;
use tracing::debug;

/// Default daemon socket.
pub const DEFAULT_ENDPOINT: &str = "unix:///var/run/docker.sock";

/// Engine API version this module advertises.
pub const API_VERSION: &str = "1.45";

/// A container runtime reachable over the Docker Engine API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRuntime {
    /// Where the daemon listens.
    pub endpoint: String,
    /// Engine API version.
    pub api_version: String,
}

impl ContainerRuntime {
    /// The local daemon on its default socket.
    pub fn local() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }
}

impl Capability for ContainerRuntime {
    fn id(&self) -> &str {
        "docker"
    }

    fn kind(&self) -> &str {
        "API"
    }

    fn name(&self) -> &str {
        "Docker API"
    }

    fn metadata(&self) -> Metadata {
        Metadata::from([
            ("endpoint".to_string(), serde_json::json!(self.endpoint)),
            ("apiVersion".to_string(), serde_json::json!(self.api_version)),
        ])
    }
}

/// Registration hook.
pub fn register(registry: &dyn Registry) -> AppResult<()> {
    let runtime = ContainerRuntime::local();
    let entry = registry.register(&runtime).map_err(|e| {
        AppError::new(e.kind, format!("Failed to register Docker plugin: {}", e.message))
    })?;

    debug!(entry_id = %entry.id, version = entry.version, "Docker runtime registered");
    Ok(())
}

capreg_plugin::export_registration!("docker", register);
