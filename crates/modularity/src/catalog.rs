//! ModuleCatalog - Ordered set of module descriptors

use shared::{CatalogConfig, CatalogError, InitializationMode, ModuleDescriptor};

/// Descriptors the host knows about, in discovery order
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the modules of a catalog file
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for module in &config.modules {
            catalog.add_module(module.descriptor())?;
        }
        Ok(catalog)
    }

    /// Append a descriptor; names are unique within a catalog
    pub fn add_module(&mut self, descriptor: ModuleDescriptor) -> Result<&mut Self, CatalogError> {
        descriptor.validate()?;
        if self.get(&descriptor.name).is_some() {
            return Err(CatalogError::DuplicateModule {
                name: descriptor.name,
            });
        }
        self.modules.push(descriptor);
        Ok(self)
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Modules initialized during startup, in catalog order
    pub fn startup_modules(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules
            .iter()
            .filter(|m| m.mode == InitializationMode::WhenAvailable)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
