//! Configuration types for Rolegate

use crate::{GenericPrincipal, Identity, InitializationMode, ModuleDescriptor, ModuleType, RolegateError, UndeclaredRolesPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Catalog entry for one module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Logical module name
    pub name: String,

    /// Module type the resolver knows
    #[serde(rename = "type")]
    pub module_type: ModuleType,

    /// Roles permitted to load the module (omit to declare none)
    #[serde(default)]
    pub roles: Option<Vec<String>>,

    #[serde(default)]
    pub mode: InitializationMode,
}

impl ModuleConfig {
    pub fn descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor::new(self.name.clone(), self.module_type.clone()).with_mode(self.mode)
    }
}

/// Principal the host runs as when no other one is given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalConfig {
    pub name: String,

    #[serde(default)]
    pub roles: Vec<String>,
}

impl PrincipalConfig {
    pub fn to_principal(&self) -> GenericPrincipal {
        GenericPrincipal::new(Identity::new(self.name.clone()), self.roles.iter().cloned())
    }
}

/// Module catalog file (catalog.yaml / catalog.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Policy for modules that declare no roles
    #[serde(default)]
    pub undeclared_roles: UndeclaredRolesPolicy,

    #[serde(default)]
    pub principal: Option<PrincipalConfig>,

    /// Modules in initialization order
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl CatalogConfig {
    /// Load configuration from a YAML (`.yaml`/`.yml`) or JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Get module names in catalog order
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Find a module entry by name
    pub fn module(&self, name: &str) -> crate::Result<&ModuleConfig> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| RolegateError::Config(format!("Module '{}' is not in the catalog", name)))
    }
}

/// Logger interface for dependency injection
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>);
}

fn render_meta(meta: Option<&HashMap<String, String>>) -> String {
    let Some(meta) = meta else {
        return String::new();
    };
    let mut pairs: Vec<String> = meta.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    pairs.join(" ")
}

/// Tracing target of every line `TracingLogger` emits (`RUST_LOG=rolegate=debug`)
pub const LOG_TARGET: &str = "rolegate";

/// Logger that forwards to `tracing` under the `rolegate` target
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::debug!(target: "rolegate", meta = %render_meta(meta), "{}", message);
    }

    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::info!(target: "rolegate", meta = %render_meta(meta), "{}", message);
    }

    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::warn!(target: "rolegate", meta = %render_meta(meta), "{}", message);
    }

    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::error!(target: "rolegate", meta = %render_meta(meta), "{}", message);
    }
}

/// No-op logger for testing
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn info(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
}

/// Logger that keeps every line in memory, for assertions in tests
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines as `LEVEL message`
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{} {}", level, message));
        }
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        self.push("DEBUG", message);
    }

    fn info(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        self.push("INFO", message);
    }

    fn warn(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        self.push("WARN", message);
    }

    fn error(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        self.push("ERROR", message);
    }
}
