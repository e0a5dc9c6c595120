//! # Rolegate Shared
//!
//! Common types and interfaces used across all Rolegate crates.

pub mod error;
pub mod role;
pub mod principal;
pub mod module;
pub mod config;

// Re-exports
pub use error::*;
pub use role::*;
pub use principal::*;
pub use module::*;
pub use config::*;
