//! Convenience macros for registration module authors.

/// Exports the registration hook of a `cdylib` module.
///
/// Emits the `Register` static the loader resolves, declared against the
/// ABI and core versions of the `capreg-plugin` the module is built with.
///
/// # Example
/// ```rust,ignore
/// use capreg_plugin::prelude::*;
///
/// fn register(registry: &dyn Registry) -> AppResult<()> {
///     registry.register(&CapabilityDescriptor::new("git", "API", "Git API"))?;
///     Ok(())
/// }
///
/// export_registration!("git", register);
/// ```
#[macro_export]
macro_rules! export_registration {
    ($name:expr, $register:path) => {
        #[unsafe(no_mangle)]
        #[allow(non_upper_case_globals)]
        pub static Register: $crate::abi::PluginDeclaration =
            $crate::abi::PluginDeclaration::new($name, $register);
    };
}
