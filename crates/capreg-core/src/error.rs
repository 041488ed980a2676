//! Unified error types for the capability registry.
//!
//! Catalog operations and the plugin loader both report failures as
//! [`AppError`]; the [`ErrorKind`] tells a caller which class of failure
//! occurred so an outer layer (HTTP, CLI) can map it to its own codes.

use std::fmt;
use thiserror::Error;

/// Error kind categorization shared by every crate in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed input to a catalog operation (empty identity, wrong
    /// concrete type at an adapter boundary).
    InvalidArgument,
    /// The identity is absent from the catalog or soft-deleted.
    NotFound,
    /// A strict create hit an identity that already has a slot.
    AlreadyExists,
    /// A module file could not be opened or linked.
    PluginLoad,
    /// A module lacks the registration hook or its contract does not match.
    PluginContract,
    /// A registration hook ran and reported a failure.
    PluginRegistration,
    /// Configuration could not be read or deserialized.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A filesystem error occurred.
    Io,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            Self::PluginLoad => write!(f, "PLUGIN_LOAD"),
            Self::PluginContract => write!(f, "PLUGIN_CONTRACT"),
            Self::PluginRegistration => write!(f, "PLUGIN_REGISTRATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout the registry.
///
/// Crate-specific failures are mapped into `AppError` with `From` impls or
/// explicit `.map_err()` calls, so callers only ever match on [`ErrorKind`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Create a plugin load error.
    pub fn plugin_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PluginLoad, message)
    }

    /// Create a plugin contract error.
    pub fn plugin_contract(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PluginContract, message)
    }

    /// Create a plugin registration error.
    pub fn plugin_registration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PluginRegistration, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
