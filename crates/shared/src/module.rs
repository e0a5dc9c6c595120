//! Module descriptor types

use crate::InvalidDescriptorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier the resolver uses to construct a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleType(String);

impl ModuleType {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Module type named after a Rust type
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleType {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModuleType {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// When the host initializes a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitializationMode {
    /// Initialized during startup
    #[default]
    WhenAvailable,
    /// Initialized only when explicitly loaded
    OnDemand,
}

/// One loadable unit discovered by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// Logical name, used in diagnostics
    pub name: String,

    /// Reference the resolver constructs the module from
    #[serde(rename = "type")]
    pub module_type: ModuleType,

    #[serde(default)]
    pub mode: InitializationMode,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, module_type: impl Into<ModuleType>) -> Self {
        Self {
            name: name.into(),
            module_type: module_type.into(),
            mode: InitializationMode::WhenAvailable,
        }
    }

    /// Builder: set initialization mode
    pub fn with_mode(mut self, mode: InitializationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: mark as on-demand
    pub fn on_demand(self) -> Self {
        self.with_mode(InitializationMode::OnDemand)
    }

    /// Reject descriptors with a blank name or module type
    pub fn validate(&self) -> Result<(), InvalidDescriptorError> {
        if self.name.trim().is_empty() {
            return Err(InvalidDescriptorError::new(format!(
                "module name is blank (type '{}')",
                self.module_type
            )));
        }
        if self.module_type.as_str().trim().is_empty() {
            return Err(InvalidDescriptorError::new(format!(
                "module type is blank for module '{}'",
                self.name
            )));
        }
        Ok(())
    }
}
