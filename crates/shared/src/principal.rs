//! Principal types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity of the current execution context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Identity name (empty for anonymous)
    pub name: String,

    /// How the host authenticated this identity, if it did
    #[serde(default)]
    pub authentication_type: Option<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authentication_type: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builder: set authentication type
    pub fn with_authentication_type(mut self, kind: impl Into<String>) -> Self {
        self.authentication_type = Some(kind.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        !self.name.is_empty()
    }
}

/// The authenticated identity of the current execution context.
///
/// The host establishes it; initialization only reads it.
pub trait Principal {
    fn identity(&self) -> &Identity;

    /// Check role membership (case-sensitive)
    fn has_role(&self, role: &str) -> bool;
}

/// Principal holding a fixed set of role names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericPrincipal {
    identity: Identity,
    roles: BTreeSet<String>,
}

impl GenericPrincipal {
    pub fn new<I, S>(identity: Identity, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Principal with no name and no roles
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builder: add a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Held role names, sorted
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.as_str())
    }
}

impl Principal for GenericPrincipal {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
