//! # Rolegate Audit
//!
//! Audit trail of module initialization decisions.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
