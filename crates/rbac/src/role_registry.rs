//! RoleRegistry - Role tags declared per module type

use crate::authorization::{authorize, Authorization};
use shared::{CatalogConfig, ModuleType, Principal, RoleDeclarationError, RoleTag, UndeclaredRolesPolicy};
use std::collections::HashMap;

/// Maps module types to the roles permitted to load them
#[derive(Debug, Default)]
pub struct RoleRegistry {
    /// Declared tags (module type -> roles)
    tags: HashMap<ModuleType, RoleTag>,
    /// Policy for module types without a tag
    undeclared: UndeclaredRolesPolicy,
}

impl RoleRegistry {
    /// Create a new RoleRegistry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an explicit policy for undeclared modules
    pub fn with_policy(undeclared: UndeclaredRolesPolicy) -> Self {
        Self {
            tags: HashMap::new(),
            undeclared,
        }
    }

    /// Attach a role tag to a module type.
    ///
    /// Each module type is tagged at most once; blank role names are rejected.
    pub fn declare<I, S>(&mut self, module_type: impl Into<ModuleType>, roles: I) -> Result<(), RoleDeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let module_type = module_type.into();
        if self.tags.contains_key(&module_type) {
            return Err(RoleDeclarationError::AlreadyDeclared {
                module_type: module_type.to_string(),
            });
        }

        let tag = RoleTag::new(roles);
        if tag.iter().any(|r| r.trim().is_empty()) {
            return Err(RoleDeclarationError::BlankRole {
                module_type: module_type.to_string(),
            });
        }

        self.tags.insert(module_type, tag);
        Ok(())
    }

    /// Attach a role tag to `M`, keyed by its type path
    pub fn declare_type<M: ?Sized, I, S>(&mut self, roles: I) -> Result<ModuleType, RoleDeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let module_type = ModuleType::of::<M>();
        self.declare(module_type.clone(), roles)?;
        Ok(module_type)
    }

    /// Declare every module of a catalog file that lists roles
    pub fn load_from_catalog(&mut self, catalog: &CatalogConfig) -> Result<(), RoleDeclarationError> {
        self.undeclared = catalog.undeclared_roles;

        for module in &catalog.modules {
            if let Some(roles) = &module.roles {
                self.declare(module.module_type.clone(), roles.iter().cloned())?;
            }
        }
        Ok(())
    }

    /// Get the tag declared for a module type
    pub fn roles_for(&self, module_type: &ModuleType) -> Option<&RoleTag> {
        self.tags.get(module_type)
    }

    /// Check if a module type has a tag
    pub fn is_declared(&self, module_type: &ModuleType) -> bool {
        self.tags.contains_key(module_type)
    }

    pub fn undeclared_policy(&self) -> UndeclaredRolesPolicy {
        self.undeclared
    }

    pub fn set_undeclared_policy(&mut self, policy: UndeclaredRolesPolicy) {
        self.undeclared = policy;
    }

    /// Check a principal against a module type's tag
    pub fn authorize(&self, module_type: &ModuleType, principal: &dyn Principal) -> Authorization {
        authorize(self.roles_for(module_type), principal, self.undeclared)
    }

    /// Declared module types, sorted
    pub fn module_types(&self) -> Vec<&ModuleType> {
        let mut types: Vec<&ModuleType> = self.tags.keys().collect();
        types.sort();
        types
    }

    /// Module types whose tag names `role`, sorted
    pub fn modules_for_role(&self, role: &str) -> Vec<&ModuleType> {
        let mut types: Vec<&ModuleType> = self
            .tags
            .iter()
            .filter(|(_, tag)| tag.contains(role))
            .map(|(module_type, _)| module_type)
            .collect();
        types.sort();
        types
    }

    /// Every role name declared by any module, sorted and deduplicated
    pub fn declared_roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.tags.values().flat_map(|t| t.iter()).collect();
        roles.sort();
        roles.dedup();
        roles
    }
}
