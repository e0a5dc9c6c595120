//! Module resolution - Construct module instances from a `ModuleType`

use crate::{Module, ServiceContainer};
use shared::{BoxError, ModuleType, ResolutionError};
use std::collections::HashMap;
use std::fmt;

/// A constructed module and the packaging unit it came from
pub struct ModuleInstance {
    pub module: Box<dyn Module>,
    /// Crate the module type was defined in, when known
    pub origin: Option<String>,
}

impl fmt::Debug for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInstance")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Turns a module type reference into a module instance, injecting services
/// from the container as the module's constructor needs them.
pub trait ModuleResolver {
    fn resolve(&self, module_type: &ModuleType, container: &ServiceContainer) -> Result<ModuleInstance, ResolutionError>;
}

/// Type-erased module factory
pub type ModuleFactoryFn = Box<dyn Fn(&ServiceContainer) -> Result<Box<dyn Module>, BoxError> + Send + Sync>;

struct FactoryEntry {
    origin: Option<String>,
    factory: ModuleFactoryFn,
}

/// Resolver backed by registered factory closures
#[derive(Default)]
pub struct FactoryResolver {
    factories: HashMap<ModuleType, FactoryEntry>,
}

/// Crate name of `T`, taken from its type path
fn origin_of<T: ?Sized>() -> Option<String> {
    std::any::type_name::<T>()
        .split("::")
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

impl FactoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `module_type`
    pub fn register<M, F>(&mut self, module_type: impl Into<ModuleType>, factory: F) -> &mut Self
    where
        M: Module + 'static,
        F: Fn(&ServiceContainer) -> Result<M, BoxError> + Send + Sync + 'static,
    {
        let entry = FactoryEntry {
            origin: origin_of::<M>(),
            factory: Box::new(move |container| {
                factory(container).map(|module| Box::new(module) as Box<dyn Module>)
            }),
        };
        self.factories.insert(module_type.into(), entry);
        self
    }

    /// Register `M` under its own type path, built with `Default`
    pub fn register_type<M>(&mut self) -> ModuleType
    where
        M: Module + Default + 'static,
    {
        let module_type = ModuleType::of::<M>();
        self.register(module_type.clone(), |_| Ok(M::default()));
        module_type
    }

    pub fn is_registered(&self, module_type: &ModuleType) -> bool {
        self.factories.contains_key(module_type)
    }

    /// Registered module types, sorted
    pub fn module_types(&self) -> Vec<&ModuleType> {
        let mut types: Vec<&ModuleType> = self.factories.keys().collect();
        types.sort();
        types
    }
}

impl ModuleResolver for FactoryResolver {
    fn resolve(&self, module_type: &ModuleType, container: &ServiceContainer) -> Result<ModuleInstance, ResolutionError> {
        let entry = self.factories.get(module_type).ok_or_else(|| ResolutionError::Unregistered {
            module_type: module_type.to_string(),
            registered: self.module_types().iter().map(|t| t.to_string()).collect(),
        })?;

        let module = (entry.factory)(container).map_err(|source| ResolutionError::Construction {
            module_type: module_type.to_string(),
            source,
        })?;

        Ok(ModuleInstance {
            module,
            origin: entry.origin.clone(),
        })
    }
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryResolver")
            .field("module_types", &self.module_types())
            .finish()
    }
}
