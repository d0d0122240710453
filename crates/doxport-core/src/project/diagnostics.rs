//! Diagnostic tracking for projection passes
//!
//! Unrecognized host variants are never fatal: the projector drops the
//! fragment, records a structured diagnostic here, and the export still
//! completes. The collected report travels back to the caller alongside
//! the projected tree; every recorded item is also emitted to the
//! process-wide tracing sink.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Category of a dropped fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// A declaration variant the projector does not recognize
    UnrecognizedDeclaration,
    /// A type-reference variant the projector cannot express
    UnrecognizedType,
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::UnrecognizedDeclaration => write!(f, "UnrecognizedDeclaration"),
            DiagnosticCode::UnrecognizedType => write!(f, "UnrecognizedType"),
        }
    }
}

/// Severity of a diagnostic. All diagnostics are non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One dropped fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    /// Identifier of the nearest enclosing declaration
    pub path: String,
    /// Host variant name of the dropped fragment
    pub variant: String,
    pub message: String,
}

/// Aggregate statistics over a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    pub total: usize,
    pub by_code: HashMap<String, usize>,
}

/// Everything the projection pass dropped, with a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub items: Vec<Diagnostic>,
    pub summary: DiagnosticSummary,
}

impl DiagnosticReport {
    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.items.iter().map(|item| item.severity).max()
    }
}

/// Collects diagnostics during one projection pass.
#[derive(Debug, Default)]
pub struct DiagnosticTracker {
    items: Vec<Diagnostic>,
}

impl DiagnosticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration variant the projector dropped.
    pub fn record_declaration(&mut self, dri: &str, variant: &str) {
        tracing::warn!(dri, variant, "dropping unrecognized declaration variant");
        self.items.push(Diagnostic {
            code: DiagnosticCode::UnrecognizedDeclaration,
            severity: Severity::Warning,
            path: dri.to_string(),
            variant: variant.to_string(),
            message: format!("declaration variant '{}' is not exported", variant),
        });
    }

    /// Record a type-reference variant the projector dropped.
    pub fn record_bound(&mut self, dri: &str, variant: &str) {
        tracing::debug!(dri, variant, "dropping unrecognized type reference");
        self.items.push(Diagnostic {
            code: DiagnosticCode::UnrecognizedType,
            severity: Severity::Info,
            path: dri.to_string(),
            variant: variant.to_string(),
            message: format!("type reference variant '{}' is not exported", variant),
        });
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Build the final report.
    pub fn build_report(self) -> DiagnosticReport {
        let mut by_code = HashMap::new();
        for item in &self.items {
            *by_code.entry(item.code.to_string()).or_insert(0) += 1;
        }

        let summary = DiagnosticSummary {
            total: self.items.len(),
            by_code,
        };

        DiagnosticReport {
            items: self.items,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_builds_clean_report() {
        let report = DiagnosticTracker::new().build_report();
        assert!(report.is_clean());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.max_severity(), None);
    }

    #[test]
    fn test_record_declaration() {
        let mut tracker = DiagnosticTracker::new();
        tracker.record_declaration("pkg/Alias", "typeAlias");

        let report = tracker.build_report();
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].code, DiagnosticCode::UnrecognizedDeclaration);
        assert_eq!(report.items[0].severity, Severity::Warning);
        assert_eq!(report.items[0].path, "pkg/Alias");
        assert_eq!(report.max_severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_severity_keys_a_hash_map() {
        let mut tracker = DiagnosticTracker::new();
        tracker.record_declaration("a", "typeAlias");
        tracker.record_bound("b", "dynamic");

        // Severity is used as a grouping key by report consumers.
        let mut by_severity: HashMap<Severity, usize> = HashMap::new();
        for item in &tracker.build_report().items {
            *by_severity.entry(item.severity).or_insert(0) += 1;
        }
        assert_eq!(by_severity.get(&Severity::Warning), Some(&1));
        assert_eq!(by_severity.get(&Severity::Info), Some(&1));
    }

    #[test]
    fn test_summary_counts_by_code() {
        let mut tracker = DiagnosticTracker::new();
        tracker.record_declaration("a", "typeAlias");
        tracker.record_bound("b", "dynamic");
        tracker.record_bound("c", "unresolvedBound");

        let report = tracker.build_report();
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_code.get("UnrecognizedDeclaration"), Some(&1));
        assert_eq!(report.summary.by_code.get("UnrecognizedType"), Some(&2));
    }
}
