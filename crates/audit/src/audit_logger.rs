//! AuditLogger - Audit trail of module initialization

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: String,
    pub event_type: AuditEventType,
    pub module_name: String,
    pub principal: String,
    pub success: bool,
    pub reason: Option<String>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    ModuleInitialized,
    ModuleSkipped,
    ModuleFailed,
}

/// Bounded audit log; the oldest entry is dropped once full
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: AuditEntry) {
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    fn entry(event_type: AuditEventType, module_name: &str, principal: &str, success: bool, reason: Option<String>) -> AuditEntry {
        AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type,
            module_name: module_name.to_string(),
            principal: principal.to_string(),
            success,
            reason,
        }
    }

    /// Log a module that was registered and activated
    pub fn log_initialized(&mut self, module_name: &str, principal: &str, reason: &str) {
        self.log(Self::entry(
            AuditEventType::ModuleInitialized,
            module_name,
            principal,
            true,
            Some(reason.to_string()),
        ));
    }

    /// Log a module the principal was not authorized to load
    pub fn log_skipped(&mut self, module_name: &str, principal: &str, reason: &str) {
        self.log(Self::entry(
            AuditEventType::ModuleSkipped,
            module_name,
            principal,
            true,
            Some(reason.to_string()),
        ));
    }

    /// Log a module whose initialization failed
    pub fn log_failed(&mut self, module_name: &str, principal: &str, error: &str) {
        self.log(Self::entry(
            AuditEventType::ModuleFailed,
            module_name,
            principal,
            false,
            Some(error.to_string()),
        ));
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent failures, newest first
    pub fn get_recent_failures(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(limit)
            .collect()
    }

    /// Entries for one module, oldest first
    pub fn entries_for(&self, module_name: &str) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.module_name == module_name).collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let count = |kind: AuditEventType| self.entries.iter().filter(|e| e.event_type == kind).count();

        AuditStats {
            total_entries: self.entries.len(),
            initialized_count: count(AuditEventType::ModuleInitialized),
            skipped_count: count(AuditEventType::ModuleSkipped),
            failure_count: count(AuditEventType::ModuleFailed),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total_entries: usize,
    pub initialized_count: usize,
    pub skipped_count: usize,
    pub failure_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_initialized() {
        let mut logger = AuditLogger::new(100);

        logger.log_initialized("Admin", "alice", "principal holds role 'Admin'");

        let stats = logger.get_stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.initialized_count, 1);
        assert_eq!(stats.failure_count, 0);
    }

    #[test]
    fn test_skip_is_not_a_failure() {
        let mut logger = AuditLogger::new(100);

        logger.log_skipped("User", "guest", "principal holds none of [User, Admin]");

        let recent = logger.get_recent(1);
        assert!(recent[0].success);
        assert_eq!(recent[0].event_type, AuditEventType::ModuleSkipped);
        assert!(logger.get_recent_failures(10).is_empty());
    }

    #[test]
    fn test_log_failed() {
        let mut logger = AuditLogger::new(100);

        logger.log_failed("Broken", "alice", "Failed to initialize module 'Broken': boom");

        let failures = logger.get_recent_failures(10);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].module_name, "Broken");
        assert!(failures[0].reason.as_ref().unwrap().contains("boom"));
    }

    #[test]
    fn test_max_entries_limit() {
        let mut logger = AuditLogger::new(3);

        logger.log_initialized("m1", "alice", "ok");
        logger.log_initialized("m2", "alice", "ok");
        logger.log_initialized("m3", "alice", "ok");
        logger.log_initialized("m4", "alice", "ok");

        let stats = logger.get_stats();
        assert_eq!(stats.total_entries, 3);

        // Oldest entry should be removed
        assert!(logger.entries_for("m1").is_empty());
        assert_eq!(logger.entries_for("m4").len(), 1);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut logger = AuditLogger::new(0);
        logger.log_initialized("m1", "alice", "ok");

        assert_eq!(logger.get_stats().total_entries, 0);
    }

    #[test]
    fn test_get_recent_newest_first() {
        let mut logger = AuditLogger::new(100);

        logger.log_initialized("m1", "alice", "ok");
        logger.log_skipped("m2", "alice", "denied");
        logger.log_initialized("m3", "alice", "ok");

        let recent = logger.get_recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].module_name, "m3");
        assert_eq!(recent[1].module_name, "m2");
    }

    #[test]
    fn test_stats_by_event_type() {
        let mut logger = AuditLogger::new(100);

        logger.log_initialized("Admin", "alice", "ok");
        logger.log_skipped("User", "alice", "denied");
        logger.log_skipped("Reports", "alice", "denied");
        logger.log_failed("Broken", "alice", "boom");

        assert_eq!(
            logger.get_stats(),
            AuditStats {
                total_entries: 4,
                initialized_count: 1,
                skipped_count: 2,
                failure_count: 1,
            }
        );

        logger.clear();
        assert_eq!(logger.get_stats(), AuditStats::default());
    }

    #[test]
    fn test_export_json() {
        let mut logger = AuditLogger::new(100);

        logger.log_initialized("Admin", "alice", "ok");
        logger.log_failed("Broken", "alice", "boom");

        let json = logger.export_json();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["eventType"], "module_failed");
        assert_eq!(entries[0]["moduleName"], "Admin");
    }

    #[test]
    fn test_default_max_entries() {
        let logger = AuditLogger::default();
        assert_eq!(logger.max_entries, 10000);
    }
}
