//! Demo host: a region registry and four modules to gate

use container::{FactoryResolver, Module, ServiceContainer};
use modularity::{ModuleCatalog, ModuleManager, RoleBasedModuleInitializer};
use rbac::RoleRegistry;
use shared::{BoxError, CatalogConfig, Logger};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Catalog used when no file is given, and written by `rolegate init`
pub const SAMPLE_CATALOG: &str = r#"# Rolegate module catalog
#
# Modules without `roles` follow `undeclaredRoles` (allowAll | denyAll).
undeclaredRoles: allowAll

principal:
  name: alice
  roles: [Admin]

modules:
  - name: ModuleA
    type: demo::AdminModule
    roles: [Admin]
  - name: ModuleU
    type: demo::UserModule
    roles: [User, Admin]
  - name: Reports
    type: demo::ReportsModule
    mode: onDemand
  - name: Broken
    type: demo::BrokenModule
    roles: [Admin]
    mode: onDemand
"#;

/// Named regions views are attached to
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: Mutex<BTreeMap<String, Vec<String>>>,
}

impl RegionRegistry {
    pub fn register_view_with_region(&self, region: &str, view: &str) {
        if let Ok(mut regions) = self.regions.lock() {
            regions.entry(region.to_string()).or_default().push(view.to_string());
        }
    }

    /// Region name -> attached views
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.regions.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Service the admin module registers and then consumes
#[derive(Debug)]
pub struct AdminDashboard {
    pub view: String,
}

#[derive(Debug, Default)]
pub struct ReportService;

#[derive(Default)]
pub struct AdminModule;

impl Module for AdminModule {
    fn register_types(&self, registry: &mut ServiceContainer) -> Result<(), BoxError> {
        registry.register_instance(AdminDashboard {
            view: "ViewA".to_string(),
        });
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        let dashboard = provider.resolve::<AdminDashboard>()?;
        provider
            .resolve::<RegionRegistry>()?
            .register_view_with_region("AdminRegion", &dashboard.view);
        Ok(())
    }
}

#[derive(Default)]
pub struct UserModule;

impl Module for UserModule {
    fn register_types(&self, _registry: &mut ServiceContainer) -> Result<(), BoxError> {
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        provider
            .resolve::<RegionRegistry>()?
            .register_view_with_region("UserRegion", "ViewU");
        Ok(())
    }
}

#[derive(Default)]
pub struct ReportsModule;

impl Module for ReportsModule {
    fn register_types(&self, registry: &mut ServiceContainer) -> Result<(), BoxError> {
        registry.register_instance(ReportService);
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        provider
            .resolve::<RegionRegistry>()?
            .register_view_with_region("ReportsRegion", "ReportsView");
        Ok(())
    }
}

/// Registers fine, then fails to attach its view
#[derive(Default)]
pub struct BrokenModule;

impl Module for BrokenModule {
    fn register_types(&self, _registry: &mut ServiceContainer) -> Result<(), BoxError> {
        Ok(())
    }

    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError> {
        provider.resolve::<RegionRegistry>()?;
        Err("region 'BrokenRegion' does not exist".into())
    }
}

/// Resolver knowing every demo module type
pub fn demo_resolver() -> FactoryResolver {
    let mut resolver = FactoryResolver::new();
    resolver
        .register("demo::AdminModule", |_| Ok(AdminModule))
        .register("demo::UserModule", |_| Ok(UserModule))
        .register("demo::ReportsModule", |_| Ok(ReportsModule))
        .register("demo::BrokenModule", |_| Ok(BrokenModule));
    resolver
}

/// Container with the host services modules expect
pub fn host_container() -> ServiceContainer {
    let mut container = ServiceContainer::new();
    container.register_instance(RegionRegistry::default());
    container
}

/// Wire catalog, role declarations and initializer from a catalog file
pub fn build_manager(config: &CatalogConfig, logger: Arc<dyn Logger>) -> anyhow::Result<ModuleManager> {
    let catalog = ModuleCatalog::from_config(config)?;

    let mut roles = RoleRegistry::new();
    roles.load_from_catalog(config)?;

    let initializer = RoleBasedModuleInitializer::new(demo_resolver(), roles, logger.clone());
    Ok(ModuleManager::new(catalog, initializer, logger))
}

/// Views attached so far
pub fn attached_views(container: &ServiceContainer) -> BTreeMap<String, Vec<String>> {
    container
        .try_resolve::<RegionRegistry>()
        .map(|regions| regions.snapshot())
        .unwrap_or_default()
}
