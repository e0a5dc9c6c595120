//! ModuleManager - Drive a catalog through an initializer
//!
//! Keeps the per-module state table and the audit trail for one host.

use crate::catalog::ModuleCatalog;
use crate::initializer::{InitializeOutcome, ModuleInitializer, ModuleState, RoleBasedModuleInitializer};
use audit::AuditLogger;
use container::ServiceContainer;
use serde::Serialize;
use shared::{error_chain, InitializationError, Logger, ModuleDescriptor, Principal};
use std::collections::HashMap;
use std::sync::Arc;

/// State of one catalog module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReport {
    pub name: String,
    pub state: ModuleState,
}

/// Per-module states, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport {
    pub modules: Vec<ModuleReport>,
}

impl StartupReport {
    /// Names of modules in `state`, in catalog order
    pub fn names_in(&self, state: ModuleState) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|m| m.state == state)
            .map(|m| m.name.as_str())
            .collect()
    }

    pub fn state_of(&self, name: &str) -> Option<ModuleState> {
        self.modules.iter().find(|m| m.name == name).map(|m| m.state)
    }

    pub fn count(&self, state: ModuleState) -> usize {
        self.modules.iter().filter(|m| m.state == state).count()
    }
}

/// Host-side driver of module initialization
pub struct ModuleManager<I: ModuleInitializer = RoleBasedModuleInitializer> {
    catalog: ModuleCatalog,
    initializer: I,
    states: HashMap<String, ModuleState>,
    audit: AuditLogger,
    logger: Arc<dyn Logger>,
}

impl<I: ModuleInitializer> ModuleManager<I> {
    pub fn new(catalog: ModuleCatalog, initializer: I, logger: Arc<dyn Logger>) -> Self {
        Self {
            catalog,
            initializer,
            states: HashMap::new(),
            audit: AuditLogger::default(),
            logger,
        }
    }

    /// Builder: bound the audit trail
    pub fn with_audit_capacity(mut self, max_entries: usize) -> Self {
        self.audit = AuditLogger::new(max_entries);
        self
    }

    /// Initialize every `WhenAvailable` module, in catalog order.
    ///
    /// The first error stops the sequence; modules after it stay `NotStarted`
    /// and modules before it keep their registrations. The principal must not
    /// change while the sequence runs.
    pub fn run(
        &mut self,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
    ) -> Result<StartupReport, InitializationError> {
        let startup: Vec<ModuleDescriptor> = self.catalog.startup_modules().cloned().collect();

        let mut meta = HashMap::new();
        meta.insert("principal".to_string(), principal.identity().name.clone());
        meta.insert("modules".to_string(), startup.len().to_string());
        self.logger.info("Starting module initialization", Some(&meta));

        for descriptor in &startup {
            if let Err(err) = self.initialize_one(container, principal, descriptor) {
                meta.insert("module".to_string(), descriptor.name.clone());
                self.logger.warn("Module initialization aborted", Some(&meta));
                return Err(err);
            }
        }

        let report = self.report();
        meta.insert(
            "initialized".to_string(),
            report.count(ModuleState::Initialized).to_string(),
        );
        self.logger.info("Module initialization complete", Some(&meta));
        Ok(report)
    }

    /// Initialize one catalog module by name, whatever its mode
    pub fn load_module(
        &mut self,
        name: &str,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
    ) -> Result<InitializeOutcome, InitializationError> {
        let descriptor = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| InitializationError::ModuleNotFound { name: name.to_string() })?;

        self.initialize_one(container, principal, &descriptor)
    }

    fn initialize_one(
        &mut self,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
        descriptor: &ModuleDescriptor,
    ) -> Result<InitializeOutcome, InitializationError> {
        if self.states.get(&descriptor.name) == Some(&ModuleState::Initialized) {
            return Ok(InitializeOutcome::AlreadyInitialized);
        }

        let states = &mut self.states;
        let result = self
            .initializer
            .initialize_observed(container, principal, descriptor, &mut |state| {
                states.insert(descriptor.name.clone(), state);
            });

        let principal_name = &principal.identity().name;
        match &result {
            Ok(InitializeOutcome::Initialized { authorization }) => {
                self.audit
                    .log_initialized(&descriptor.name, principal_name, &authorization.reason());
            }
            Ok(InitializeOutcome::Skipped { authorization }) => {
                self.audit
                    .log_skipped(&descriptor.name, principal_name, &authorization.reason());
            }
            Ok(InitializeOutcome::AlreadyInitialized) => {}
            Err(err) => {
                self.audit.log_failed(&descriptor.name, principal_name, &error_chain(err));
            }
        }
        result
    }

    /// Current state of a catalog module; `None` for names not in the catalog
    pub fn state(&self, name: &str) -> Option<ModuleState> {
        self.catalog.get(name)?;
        Some(self.states.get(name).copied().unwrap_or(ModuleState::NotStarted))
    }

    pub fn report(&self) -> StartupReport {
        StartupReport {
            modules: self
                .catalog
                .modules()
                .iter()
                .map(|m| ModuleReport {
                    name: m.name.clone(),
                    state: self.states.get(&m.name).copied().unwrap_or(ModuleState::NotStarted),
                })
                .collect(),
        }
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn initializer(&self) -> &I {
        &self.initializer
    }
}
