//! Role tag types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered set of role names permitted to load one module type.
///
/// A tag is attached once, when the module type is declared, and never
/// mutated afterwards. It may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTag {
    roles: Vec<String>,
}

impl RoleTag {
    /// Create a tag from role names, keeping declaration order
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Tag declaring no roles
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declared role names, in declaration order
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.as_str())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Check if a role name is declared (case-sensitive)
    pub fn contains(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// First declared role accepted by `holds`, stopping at the first match
    pub fn first_match(&self, mut holds: impl FnMut(&str) -> bool) -> Option<&str> {
        self.iter().find(|role| holds(*role))
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.roles.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for RoleTag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// What to do with a module that declares no roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UndeclaredRolesPolicy {
    /// Load the module for every principal
    #[default]
    AllowAll,
    /// Load the module for no principal
    DenyAll,
}

impl UndeclaredRolesPolicy {
    pub fn allows(&self) -> bool {
        matches!(self, Self::AllowAll)
    }
}
