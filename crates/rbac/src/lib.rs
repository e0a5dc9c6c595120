//! # Rolegate RBAC
//!
//! Role-Based Access Control for module initialization.
//!
//! ## Components
//!
//! - `RoleRegistry` - Role tags declared per module type
//! - `authorize` - "holds at least one declared role" check

pub mod authorization;
pub mod role_registry;

pub use authorization::{authorize, Authorization};
pub use role_registry::RoleRegistry;
