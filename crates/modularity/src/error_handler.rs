//! Error translation for failed module initialization

use shared::{error_chain, BoxError, Logger, ModuleDescriptor, ModuleInitializationError, ResolutionError};
use std::collections::HashMap;
use std::sync::Arc;

/// Translate a failure into a `ModuleInitializationError`.
///
/// A cause that already is a `ModuleInitializationError` (for example from a
/// nested initialization) is returned unchanged, also when a module factory
/// raised it and the resolver reported it as a construction failure. Anything
/// else is wrapped with the descriptor's name and the origin, when one is known.
pub fn translate_initialization_error(
    descriptor: &ModuleDescriptor,
    origin: Option<&str>,
    cause: BoxError,
) -> ModuleInitializationError {
    match already_translated(cause) {
        Ok(translated) => translated,
        Err(cause) => {
            let origin = origin.filter(|o| !o.is_empty()).map(str::to_string);
            ModuleInitializationError::from_cause(descriptor.name.clone(), origin, cause)
        }
    }
}

fn already_translated(cause: BoxError) -> Result<ModuleInitializationError, BoxError> {
    let cause = match cause.downcast::<ModuleInitializationError>() {
        Ok(translated) => return Ok(*translated),
        Err(cause) => cause,
    };

    match cause.downcast::<ResolutionError>() {
        Ok(resolution) => match *resolution {
            ResolutionError::Construction { module_type, source } => {
                match source.downcast::<ModuleInitializationError>() {
                    Ok(translated) => Ok(*translated),
                    Err(source) => Err(Box::new(ResolutionError::Construction { module_type, source })),
                }
            }
            other => Err(Box::new(other)),
        },
        Err(cause) => Err(cause),
    }
}

/// Turns any initialization failure into the error the caller receives.
///
/// Hosts replace the default handler to add their own logging or telemetry;
/// authorization is not affected by the handler.
pub trait InitializationErrorHandler {
    fn handle(&self, descriptor: &ModuleDescriptor, origin: Option<&str>, cause: BoxError) -> ModuleInitializationError;
}

impl<F> InitializationErrorHandler for F
where
    F: Fn(&ModuleDescriptor, Option<&str>, BoxError) -> ModuleInitializationError,
{
    fn handle(&self, descriptor: &ModuleDescriptor, origin: Option<&str>, cause: BoxError) -> ModuleInitializationError {
        self(descriptor, origin, cause)
    }
}

/// Default handler: translate, then log at error level
pub struct LoggingErrorHandler {
    logger: Arc<dyn Logger>,
}

impl LoggingErrorHandler {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl InitializationErrorHandler for LoggingErrorHandler {
    fn handle(&self, descriptor: &ModuleDescriptor, origin: Option<&str>, cause: BoxError) -> ModuleInitializationError {
        let error = translate_initialization_error(descriptor, origin, cause);

        let mut meta = HashMap::new();
        meta.insert("module".to_string(), error.module_name.clone());
        meta.insert("type".to_string(), descriptor.module_type.to_string());
        if let Some(origin) = &error.origin {
            meta.insert("origin".to_string(), origin.clone());
        }
        meta.insert("root_cause".to_string(), error.root_cause().to_string());

        self.logger.error(&error_chain(&error), Some(&meta));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MemoryLogger;
    use std::error::Error as _;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor::new("Broken", "demo::BrokenModule")
    }

    #[test]
    fn test_wraps_plain_error_with_name_and_origin() {
        let err = translate_initialization_error(&descriptor(), Some("demo_modules"), "view host unavailable".into());

        assert_eq!(err.module_name, "Broken");
        assert_eq!(err.origin.as_deref(), Some("demo_modules"));
        assert_eq!(err.message, "view host unavailable");
        assert!(err.to_string().contains("demo_modules"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_origin_is_dropped() {
        let err = translate_initialization_error(&descriptor(), Some(""), "boom".into());
        assert!(err.origin.is_none());
    }

    #[test]
    fn test_already_translated_error_passes_through() {
        let inner = ModuleInitializationError::new("Inner", "inner failed").with_origin("plugins");
        let err = translate_initialization_error(&descriptor(), Some("demo_modules"), Box::new(inner));

        // Not re-wrapped under "Broken"
        assert_eq!(err.module_name, "Inner");
        assert_eq!(err.origin.as_deref(), Some("plugins"));
        assert_eq!(err.message, "inner failed");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_translated_error_from_factory_passes_through() {
        let cause = ResolutionError::Construction {
            module_type: "demo::OuterModule".to_string(),
            source: Box::new(ModuleInitializationError::new("Inner", "inner failed")),
        };
        let err = translate_initialization_error(&descriptor(), None, Box::new(cause));

        assert_eq!(err.module_name, "Inner");
        assert_eq!(err.message, "inner failed");
    }

    #[test]
    fn test_construction_error_with_plain_cause_is_wrapped() {
        let cause = ResolutionError::Construction {
            module_type: "demo::BrokenModule".to_string(),
            source: "missing service".into(),
        };
        let err = translate_initialization_error(&descriptor(), None, Box::new(cause));

        assert_eq!(err.module_name, "Broken");
        let construction = err.source().unwrap().downcast_ref::<ResolutionError>().unwrap();
        assert!(matches!(construction, ResolutionError::Construction { .. }));
        assert_eq!(err.root_cause().to_string(), "missing service");
    }

    #[test]
    fn test_wraps_resolution_error() {
        let cause = ResolutionError::Unregistered {
            module_type: "demo::BrokenModule".to_string(),
            registered: vec![],
        };
        let err = translate_initialization_error(&descriptor(), None, Box::new(cause));

        assert!(err.origin.is_none());
        assert!(err.message.contains("not registered with the resolver"));
        assert!(err.source().unwrap().downcast_ref::<ResolutionError>().is_some());
    }

    #[test]
    fn test_logging_handler_logs_and_returns() {
        let logger = Arc::new(MemoryLogger::new());
        let handler = LoggingErrorHandler::new(logger.clone());

        let err = handler.handle(&descriptor(), None, "boom".into());

        assert_eq!(err.module_name, "Broken");
        let lines = logger.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR"));
        assert!(lines[0].contains("'Broken'"));
        assert!(lines[0].ends_with(": boom"));
    }

    #[test]
    fn test_closure_handler() {
        let handler = |descriptor: &ModuleDescriptor, _origin: Option<&str>, _cause: BoxError| {
            ModuleInitializationError::new(descriptor.name.clone(), "replaced by host")
        };

        let err = handler.handle(&descriptor(), None, "boom".into());
        assert_eq!(err.message, "replaced by host");
    }
}
