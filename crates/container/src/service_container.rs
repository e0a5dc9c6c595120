//! ServiceContainer - Type-keyed service registry

use shared::ServiceNotRegisteredError;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct Registration {
    name: &'static str,
    instance: Arc<dyn Any + Send + Sync>,
}

/// Shared registry modules declare their services into.
///
/// Services are keyed by their Rust type; registering a type again replaces
/// the earlier instance. Services that need to change after registration
/// carry their own interior mutability.
#[derive(Default)]
pub struct ServiceContainer {
    services: HashMap<TypeId, Registration>,
    /// Registration order, for listings
    order: Vec<TypeId>,
}

impl ServiceContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service instance
    pub fn register_instance<T: Any + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_shared(Arc::new(instance))
    }

    /// Register an already shared service instance
    pub fn register_shared<T: Any + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        let key = TypeId::of::<T>();
        let registration = Registration {
            name: type_name::<T>(),
            instance,
        };
        if self.services.insert(key, registration).is_none() {
            self.order.push(key);
        }
        self
    }

    /// Resolve a registered service
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ServiceNotRegisteredError> {
        self.try_resolve::<T>().ok_or_else(|| ServiceNotRegisteredError {
            service: type_name::<T>().to_string(),
        })
    }

    /// Resolve a service if it is registered
    pub fn try_resolve<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let registration = self.services.get(&TypeId::of::<T>())?;
        Arc::clone(&registration.instance).downcast::<T>().ok()
    }

    /// Check if a service type is registered
    pub fn is_registered<T: Any>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Type names of registered services, in registration order
    pub fn registered_services(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|key| self.services.get(key))
            .map(|r| r.name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.registered_services())
            .finish()
    }
}
