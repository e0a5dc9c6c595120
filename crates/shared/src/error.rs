//! Error types for Rolegate

use thiserror::Error;

/// Boxed error carried as the cause of a failed module phase
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error thrown when a module descriptor is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid module descriptor: {reason}")]
pub struct InvalidDescriptorError {
    pub reason: String,
}

impl InvalidDescriptorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error thrown when the resolver cannot produce a module instance
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Module type '{module_type}' is not registered with the resolver. Registered types: {}", registered.join(", "))]
    Unregistered {
        module_type: String,
        registered: Vec<String>,
    },

    #[error("Module type '{module_type}' could not be constructed")]
    Construction {
        module_type: String,
        #[source]
        source: BoxError,
    },
}

/// Error thrown when a service is requested from the container but was never registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Service '{service}' is not registered in the container")]
pub struct ServiceNotRegisteredError {
    pub service: String,
}

/// Error thrown when a role tag cannot be attached to a module type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleDeclarationError {
    #[error("Roles for module type '{module_type}' are already declared")]
    AlreadyDeclared { module_type: String },

    #[error("Module type '{module_type}' declares a blank role name")]
    BlankRole { module_type: String },
}

/// Structured failure of a single module initialization.
///
/// Carries the module's logical name, the packaging unit the module type came
/// from (when it was constructed far enough to know), a message and the
/// underlying cause. When a cause is present the message is left out of
/// `Display` and reached through `source()` instead.
#[derive(Debug, Error)]
#[error("Failed to initialize module '{module_name}'{}{}", origin_suffix(.origin), message_suffix(.message, .source))]
pub struct ModuleInitializationError {
    pub module_name: String,
    pub origin: Option<String>,
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

fn origin_suffix(origin: &Option<String>) -> String {
    match origin {
        Some(origin) => format!(" (loaded from '{}')", origin),
        None => String::new(),
    }
}

fn message_suffix(message: &str, source: &Option<BoxError>) -> String {
    match source {
        Some(_) => String::new(),
        None => format!(": {}", message),
    }
}

/// Render an error and its whole `source()` chain as `outer: inner: root`
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(next) = current {
        rendered.push_str(": ");
        rendered.push_str(&next.to_string());
        current = next.source();
    }
    rendered
}

impl ModuleInitializationError {
    /// Create an error without an underlying cause
    pub fn new(module_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            origin: None,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a cause, taking the message from it
    pub fn from_cause(module_name: impl Into<String>, origin: Option<String>, cause: BoxError) -> Self {
        Self {
            module_name: module_name.into(),
            origin,
            message: cause.to_string(),
            source: Some(cause),
        }
    }

    /// Builder: set origin
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Deepest error in the causal chain, or `self` when there is no cause
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

/// Error returned by an initialize call
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidDescriptorError),

    #[error("Module '{name}' was not found in the catalog")]
    ModuleNotFound { name: String },

    #[error(transparent)]
    Module(#[from] ModuleInitializationError),
}

impl InitializationError {
    /// The module error, if this is one
    pub fn as_module_error(&self) -> Option<&ModuleInitializationError> {
        match self {
            Self::Module(err) => Some(err),
            _ => None,
        }
    }
}

/// Error thrown while building a module catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Module '{name}' is already in the catalog")]
    DuplicateModule { name: String },

    #[error(transparent)]
    InvalidDescriptor(#[from] InvalidDescriptorError),
}

/// General Rolegate error type
#[derive(Debug, Error)]
pub enum RolegateError {
    #[error(transparent)]
    RoleDeclaration(#[from] RoleDeclarationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    ServiceNotRegistered(#[from] ServiceNotRegisteredError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RolegateError>;
