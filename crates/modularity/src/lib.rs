//! # Rolegate Modularity
//!
//! Role-gated module initialization.
//!
//! ## Flow
//!
//! ```text
//! ModuleManager::run(container, principal)
//! └── for each WhenAvailable descriptor, in catalog order
//!     └── RoleBasedModuleInitializer::initialize
//!         ├── validate descriptor           -> InvalidArgument
//!         ├── RoleRegistry::authorize       -> Skipped (no error, no side effect)
//!         ├── ModuleResolver::resolve       -> ModuleInstance
//!         ├── Module::register_types
//!         ├── Module::on_initialized
//!         └── any failure -> InitializationErrorHandler -> ModuleInitializationError
//! ```

pub mod catalog;
pub mod error_handler;
pub mod initializer;
pub mod manager;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::ModuleCatalog;
pub use error_handler::{translate_initialization_error, InitializationErrorHandler, LoggingErrorHandler};
pub use initializer::{InitializeOutcome, ModuleInitializer, ModuleState, RoleBasedModuleInitializer};
pub use manager::{ModuleManager, ModuleReport, StartupReport};
