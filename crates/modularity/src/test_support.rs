//! Demo modules shared by the initializer and manager tests

use container::{FactoryResolver, Module, ServiceContainer};
use rbac::RoleRegistry;
use shared::{BoxError, ModuleDescriptor, ModuleInitializationError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Records construction and phase calls, in order
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Host service views are attached to
#[derive(Debug, Default)]
pub struct RegionManager {
    regions: Mutex<BTreeMap<String, Vec<String>>>,
}

impl RegionManager {
    pub fn register_view_with_region(&self, region: &str, view: &str) {
        self.regions
            .lock()
            .unwrap()
            .entry(region.to_string())
            .or_default()
            .push(view.to_string());
    }

    pub fn views(&self, region: &str) -> Vec<String> {
        self.regions.lock().unwrap().get(region).cloned().unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct AdminDashboard {
    pub title: String,
}

#[derive(Debug)]
pub struct BrokenService;

pub struct AdminModule {
    journal: Journal,
}

impl Module for AdminModule {
    fn register_types(&self, registry: &mut ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("register:Admin");
        registry.register_instance(AdminDashboard {
            title: "AdminView".to_string(),
        });
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("activate:Admin");
        let dashboard = provider.resolve::<AdminDashboard>()?;
        provider
            .resolve::<RegionManager>()?
            .register_view_with_region("AdminRegion", &dashboard.title);
        Ok(())
    }
}

pub struct UserModule {
    journal: Journal,
}

impl Module for UserModule {
    fn register_types(&self, _registry: &mut ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("register:User");
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("activate:User");
        provider
            .resolve::<RegionManager>()?
            .register_view_with_region("UserRegion", "UserView");
        Ok(())
    }
}

pub struct BrokenModule {
    journal: Journal,
}

impl Module for BrokenModule {
    fn register_types(&self, registry: &mut ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("register:Broken");
        registry.register_instance(BrokenService);
        Ok(())
    }

    fn on_initialized(&self, _provider: &ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("activate:Broken");
        Err("view host unavailable".into())
    }
}

/// Fails with an error that is already translated
pub struct NestedModule;

impl Module for NestedModule {
    fn register_types(&self, _registry: &mut ServiceContainer) -> Result<(), BoxError> {
        Ok(())
    }

    fn on_initialized(&self, _provider: &ServiceContainer) -> Result<(), BoxError> {
        Err(Box::new(ModuleInitializationError::new("Inner", "inner failed")))
    }
}

/// Declares no roles
pub struct PlainModule {
    journal: Journal,
}

impl Module for PlainModule {
    fn register_types(&self, _registry: &mut ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("register:Plain");
        Ok(())
    }

    fn on_initialized(&self, _provider: &ServiceContainer) -> Result<(), BoxError> {
        self.journal.record("activate:Plain");
        Ok(())
    }
}

pub fn demo_resolver(journal: &Journal) -> FactoryResolver {
    let mut resolver = FactoryResolver::new();

    let j = journal.clone();
    resolver.register("demo::AdminModule", move |_| {
        j.record("construct:Admin");
        Ok(AdminModule { journal: j.clone() })
    });
    let j = journal.clone();
    resolver.register("demo::UserModule", move |_| {
        j.record("construct:User");
        Ok(UserModule { journal: j.clone() })
    });
    let j = journal.clone();
    resolver.register("demo::BrokenModule", move |_| {
        j.record("construct:Broken");
        Ok(BrokenModule { journal: j.clone() })
    });
    resolver.register("demo::NestedModule", |_| Ok(NestedModule));
    // Construction runs an initialization of its own, which fails
    resolver.register::<NestedModule, _>("demo::OuterModule", |_| {
        Err(Box::new(ModuleInitializationError::new("Inner", "inner failed")))
    });
    let j = journal.clone();
    resolver.register("demo::PlainModule", move |_| {
        j.record("construct:Plain");
        Ok(PlainModule { journal: j.clone() })
    });

    resolver
}

pub fn demo_roles() -> RoleRegistry {
    let mut roles = RoleRegistry::new();
    roles.declare("demo::AdminModule", ["Admin"]).unwrap();
    roles.declare("demo::UserModule", ["User", "Admin"]).unwrap();
    roles.declare("demo::BrokenModule", ["Admin"]).unwrap();
    roles.declare("demo::NestedModule", ["Admin"]).unwrap();
    roles.declare("demo::OuterModule", ["Admin"]).unwrap();
    roles
}

pub fn admin_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("Admin", "demo::AdminModule")
}

pub fn user_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("User", "demo::UserModule")
}

pub fn broken_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("Broken", "demo::BrokenModule")
}

pub fn nested_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("Nested", "demo::NestedModule")
}

pub fn outer_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("Outer", "demo::OuterModule")
}

pub fn plain_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("Plain", "demo::PlainModule")
}

pub fn container_with_regions() -> ServiceContainer {
    let mut container = ServiceContainer::new();
    container.register_instance(RegionManager::default());
    container
}

pub fn region_views(container: &ServiceContainer, region: &str) -> Vec<String> {
    container
        .try_resolve::<RegionManager>()
        .map(|regions| regions.views(region))
        .unwrap_or_default()
}
