//! Authorization - Match a principal against a module's role tag

use serde::Serialize;
use shared::{Principal, RoleTag, UndeclaredRolesPolicy};

/// Result of checking one module against one principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "decision")]
pub enum Authorization {
    /// The principal holds this declared role
    Granted { role: String },
    /// The principal holds none of the declared roles
    Denied { declared: RoleTag },
    /// The module declares no roles; the policy decided
    Undeclared { allowed: bool },
}

impl Authorization {
    pub fn is_granted(&self) -> bool {
        match self {
            Self::Granted { .. } => true,
            Self::Denied { .. } => false,
            Self::Undeclared { allowed } => *allowed,
        }
    }

    /// Human-readable explanation, for logs and audit entries
    pub fn reason(&self) -> String {
        match self {
            Self::Granted { role } => format!("principal holds role '{}'", role),
            Self::Denied { declared } => format!("principal holds none of {}", declared),
            Self::Undeclared { allowed: true } => "no roles declared; open to all principals".to_string(),
            Self::Undeclared { allowed: false } => "no roles declared; closed to all principals".to_string(),
        }
    }
}

/// Authorized iff the principal holds at least one declared role.
///
/// Roles are checked in declaration order and the first match wins. An absent
/// or empty tag means no roles were declared and `policy` decides.
pub fn authorize(tag: Option<&RoleTag>, principal: &dyn Principal, policy: UndeclaredRolesPolicy) -> Authorization {
    let tag = match tag {
        Some(tag) if !tag.is_empty() => tag,
        _ => {
            return Authorization::Undeclared {
                allowed: policy.allows(),
            }
        }
    };

    match tag.first_match(|role| principal.has_role(role)) {
        Some(role) => Authorization::Granted {
            role: role.to_string(),
        },
        None => Authorization::Denied {
            declared: tag.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GenericPrincipal, Identity, Principal};
    use std::cell::RefCell;

    fn principal(roles: &[&str]) -> GenericPrincipal {
        GenericPrincipal::new(Identity::new("tester"), roles.iter().copied())
    }

    /// Principal that records every role it was asked about
    struct CountingPrincipal {
        inner: GenericPrincipal,
        asked: RefCell<Vec<String>>,
    }

    impl Principal for CountingPrincipal {
        fn identity(&self) -> &Identity {
            self.inner.identity()
        }

        fn has_role(&self, role: &str) -> bool {
            self.asked.borrow_mut().push(role.to_string());
            self.inner.has_role(role)
        }
    }

    // ============== Declared Roles ==============

    #[test]
    fn test_granted_when_principal_holds_declared_role() {
        let tag = RoleTag::new(["Admin"]);
        let result = authorize(Some(&tag), &principal(&["Admin"]), UndeclaredRolesPolicy::AllowAll);

        assert_eq!(result, Authorization::Granted { role: "Admin".to_string() });
        assert!(result.is_granted());
    }

    #[test]
    fn test_any_one_role_is_enough() {
        let tag = RoleTag::new(["User", "Admin"]);
        let result = authorize(Some(&tag), &principal(&["Admin"]), UndeclaredRolesPolicy::DenyAll);

        assert!(result.is_granted());
    }

    #[test]
    fn test_denied_when_no_declared_role_is_held() {
        let tag = RoleTag::new(["User", "Admin"]);
        let result = authorize(Some(&tag), &principal(&["Guest"]), UndeclaredRolesPolicy::AllowAll);

        assert_eq!(result, Authorization::Denied { declared: tag });
        assert!(!result.is_granted());
        assert!(result.reason().contains("[User, Admin]"));
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        let tag = RoleTag::new(["Admin"]);
        let result = authorize(Some(&tag), &principal(&["admin"]), UndeclaredRolesPolicy::AllowAll);

        assert!(!result.is_granted());
    }

    #[test]
    fn test_first_match_short_circuits_membership_checks() {
        let tag = RoleTag::new(["User", "Admin", "Auditor"]);
        let counting = CountingPrincipal {
            inner: principal(&["User", "Admin"]),
            asked: RefCell::new(Vec::new()),
        };

        let result = authorize(Some(&tag), &counting, UndeclaredRolesPolicy::AllowAll);

        assert_eq!(result, Authorization::Granted { role: "User".to_string() });
        assert_eq!(*counting.asked.borrow(), vec!["User".to_string()]);
    }

    // ============== Undeclared Roles ==============

    #[test]
    fn test_absent_tag_follows_policy() {
        let anonymous = GenericPrincipal::anonymous();

        assert!(authorize(None, &anonymous, UndeclaredRolesPolicy::AllowAll).is_granted());
        assert!(!authorize(None, &anonymous, UndeclaredRolesPolicy::DenyAll).is_granted());
    }

    #[test]
    fn test_empty_tag_counts_as_undeclared() {
        let tag = RoleTag::empty();
        let result = authorize(Some(&tag), &principal(&["Admin"]), UndeclaredRolesPolicy::AllowAll);

        assert_eq!(result, Authorization::Undeclared { allowed: true });
        assert!(result.reason().contains("open to all"));
    }

    #[test]
    fn test_authorization_serializes_with_decision_tag() {
        let json = serde_json::to_string(&Authorization::Granted { role: "Admin".to_string() }).unwrap();
        assert_eq!(json, r#"{"decision":"granted","role":"Admin"}"#);
    }
}
