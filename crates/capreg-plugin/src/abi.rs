//! ABI of the registration hook.
//!
//! A loadable module exports a static [`PluginDeclaration`] under the
//! symbol [`REGISTRATION_SYMBOL`]. The host cannot inspect a foreign
//! function's type, so the declaration carries the ABI and core-crate
//! versions it was built against; the loader refuses a module whose
//! versions differ from its own.

use std::fmt;

use capreg_catalog::Registry;
use capreg_core::error::AppError;
use capreg_core::result::AppResult;

/// Version of the declaration layout. Bumped on any change to it.
pub const ABI_VERSION: u32 = 1;

/// Version of this crate, which pins the `Registry` trait layout.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the exported registration hook.
pub const REGISTRATION_SYMBOL: &str = "Register";

/// The hook itself: performs zero or more registrations.
pub type RegisterFn = fn(&dyn Registry) -> AppResult<()>;

/// Static declaration exported by every registration module.
///
/// `abi_version` stays the first field so it can be read even when the
/// rest of the layout has drifted.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PluginDeclaration {
    /// Must equal [`ABI_VERSION`].
    pub abi_version: u32,
    /// Must equal [`CORE_VERSION`].
    pub core_version: &'static str,
    /// Module name used in logs and load reports.
    pub name: &'static str,
    /// The registration hook.
    pub register: RegisterFn,
}

impl PluginDeclaration {
    /// Declares a module built against this crate.
    pub const fn new(name: &'static str, register: RegisterFn) -> Self {
        Self {
            abi_version: ABI_VERSION,
            core_version: CORE_VERSION,
            name,
            register,
        }
    }

    /// Checks the declared versions against the host's.
    pub fn check_contract(&self) -> AppResult<()> {
        if self.abi_version != ABI_VERSION {
            return Err(AppError::plugin_contract(format!(
                "Module declares hook ABI v{}, host expects v{}",
                self.abi_version, ABI_VERSION
            )));
        }
        if self.core_version != CORE_VERSION {
            return Err(AppError::plugin_contract(format!(
                "Module '{}' was built against capreg-plugin {}, host runs {}",
                self.name, self.core_version, CORE_VERSION
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for PluginDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDeclaration")
            .field("abi_version", &self.abi_version)
            .field("core_version", &self.core_version)
            .field("name", &self.name)
            .field("register", &"<fn>")
            .finish()
    }
}
