//! # Rolegate Container
//!
//! The collaborators the module initializer drives.
//!
//! ## Components
//!
//! - `ServiceContainer` - Type-keyed service registry shared by all modules
//! - `Module` - Two-phase contract every module implements
//! - `ModuleResolver` / `FactoryResolver` - Construct modules from a `ModuleType`

pub mod module;
pub mod resolver;
pub mod service_container;

pub use module::Module;
pub use resolver::{FactoryResolver, ModuleInstance, ModuleResolver};
pub use service_container::ServiceContainer;
