//! # capreg-core
//!
//! Core crate for the capability registry. Contains the unified error
//! system, configuration schemas, and limit/offset pagination.
//!
//! This crate has **no** internal dependencies on other capreg crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
