//! RoleBasedModuleInitializer - Gate and drive the initialization of one module

use crate::error_handler::{InitializationErrorHandler, LoggingErrorHandler};
use container::{ModuleInstance, ModuleResolver, ServiceContainer};
use rbac::{Authorization, RoleRegistry};
use serde::Serialize;
use shared::{
    BoxError, InitializationError, Logger, ModuleDescriptor, ModuleInitializationError, ModuleType, Principal,
    ResolutionError,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Per-descriptor initialization state.
///
/// `NotStarted -> {Skipped | Registering -> Activating -> Initialized} | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleState {
    NotStarted,
    Skipped,
    Registering,
    Activating,
    Initialized,
    Failed,
}

impl ModuleState {
    /// No further transition happens within one initialize call
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Skipped | Self::Initialized | Self::Failed)
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::Skipped => "skipped",
            Self::Registering => "registering",
            Self::Activating => "activating",
            Self::Initialized => "initialized",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Successful result of an initialize call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum InitializeOutcome {
    /// Registered and activated
    Initialized { authorization: Authorization },
    /// Not authorized; nothing was constructed
    Skipped { authorization: Authorization },
    /// Already initialized by an earlier call
    AlreadyInitialized,
}

impl InitializeOutcome {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Initializes one module descriptor per call
pub trait ModuleInitializer {
    /// Initialize `descriptor`, reporting each state it passes through
    fn initialize_observed(
        &self,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
        descriptor: &ModuleDescriptor,
        observer: &mut dyn FnMut(ModuleState),
    ) -> Result<InitializeOutcome, InitializationError>;

    fn initialize(
        &self,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
        descriptor: &ModuleDescriptor,
    ) -> Result<InitializeOutcome, InitializationError> {
        self.initialize_observed(container, principal, descriptor, &mut |_| {})
    }
}

/// Initializer that loads a module only for principals holding one of its roles
pub struct RoleBasedModuleInitializer {
    resolver: Box<dyn ModuleResolver>,
    roles: RoleRegistry,
    error_handler: Box<dyn InitializationErrorHandler>,
    logger: Arc<dyn Logger>,
}

impl RoleBasedModuleInitializer {
    /// Create an initializer using the logging error handler
    pub fn new(resolver: impl ModuleResolver + 'static, roles: RoleRegistry, logger: Arc<dyn Logger>) -> Self {
        Self {
            resolver: Box::new(resolver),
            roles,
            error_handler: Box::new(LoggingErrorHandler::new(logger.clone())),
            logger,
        }
    }

    /// Builder: replace the error handler
    pub fn with_error_handler(mut self, handler: impl InitializationErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Check whether `principal` may load `descriptor`, without constructing anything
    pub fn authorize(&self, descriptor: &ModuleDescriptor, principal: &dyn Principal) -> Authorization {
        self.roles.authorize(&descriptor.module_type, principal)
    }

    /// Construct the module a descriptor refers to
    pub fn create_module(
        &self,
        descriptor: &ModuleDescriptor,
        container: &ServiceContainer,
    ) -> Result<ModuleInstance, ResolutionError> {
        self.create_module_from_type(&descriptor.module_type, container)
    }

    /// Construct a module from its type reference
    pub fn create_module_from_type(
        &self,
        module_type: &ModuleType,
        container: &ServiceContainer,
    ) -> Result<ModuleInstance, ResolutionError> {
        self.resolver.resolve(module_type, container)
    }

    /// Translate a failure through the configured handler
    pub fn handle_initialization_error(
        &self,
        descriptor: &ModuleDescriptor,
        origin: Option<&str>,
        cause: BoxError,
    ) -> ModuleInitializationError {
        self.error_handler.handle(descriptor, origin, cause)
    }

    fn fail(
        &self,
        descriptor: &ModuleDescriptor,
        origin: Option<&str>,
        cause: BoxError,
        observer: &mut dyn FnMut(ModuleState),
    ) -> InitializationError {
        observer(ModuleState::Failed);
        self.handle_initialization_error(descriptor, origin, cause).into()
    }

    fn meta(descriptor: &ModuleDescriptor, principal: &dyn Principal) -> HashMap<String, String> {
        let mut meta = HashMap::new();
        meta.insert("module".to_string(), descriptor.name.clone());
        meta.insert("type".to_string(), descriptor.module_type.to_string());
        meta.insert("principal".to_string(), principal.identity().name.clone());
        meta
    }
}

impl ModuleInitializer for RoleBasedModuleInitializer {
    fn initialize_observed(
        &self,
        container: &mut ServiceContainer,
        principal: &dyn Principal,
        descriptor: &ModuleDescriptor,
        observer: &mut dyn FnMut(ModuleState),
    ) -> Result<InitializeOutcome, InitializationError> {
        descriptor.validate()?;
        let meta = Self::meta(descriptor, principal);

        let authorization = self.authorize(descriptor, principal);
        if !authorization.is_granted() {
            self.logger.debug(
                &format!("Skipping module '{}': {}", descriptor.name, authorization.reason()),
                Some(&meta),
            );
            observer(ModuleState::Skipped);
            return Ok(InitializeOutcome::Skipped { authorization });
        }

        let instance = match self.create_module(descriptor, container) {
            Ok(instance) => instance,
            Err(err) => return Err(self.fail(descriptor, None, Box::new(err), observer)),
        };
        let origin = instance.origin.as_deref();

        observer(ModuleState::Registering);
        if let Err(cause) = instance.module.register_types(container) {
            return Err(self.fail(descriptor, origin, cause, observer));
        }

        // Registrations stay in the container even if activation fails
        observer(ModuleState::Activating);
        if let Err(cause) = instance.module.on_initialized(container) {
            return Err(self.fail(descriptor, origin, cause, observer));
        }

        observer(ModuleState::Initialized);
        self.logger.info(
            &format!("Initialized module '{}': {}", descriptor.name, authorization.reason()),
            Some(&meta),
        );
        Ok(InitializeOutcome::Initialized { authorization })
    }
}

impl fmt::Debug for RoleBasedModuleInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleBasedModuleInitializer")
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}
