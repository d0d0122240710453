//! Projection pipeline
//!
//! Turns a host declaration tree into the serializable export schema in a
//! single pass. The pipeline has no global state: facet resolution, type
//! projection, and doc-tag rendering are pure helpers, and the only thing
//! accumulated across the walk is the diagnostic report.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

pub mod diagnostics;
pub mod doctags;
pub mod documentable;
pub mod facets;
pub mod types;

pub use diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticReport, DiagnosticSummary, DiagnosticTracker, Severity,
};
pub use doctags::{collect_docs, render, section_key};
pub use documentable::Projector;
pub use facets::{merge_modifiers, resolve_modifiers, resolve_visibility};
pub use types::{project_bound, project_projection};

use crate::model::Declaration;
use crate::schema::Documentable;

/// Result of projecting one host tree.
#[derive(Debug)]
pub struct ProjectionOutcome {
    /// The projected root, or `None` when the root itself is not
    /// representable in the schema.
    pub root: Option<Documentable>,
    pub report: DiagnosticReport,
}

/// Project a full host tree, collecting diagnostics for everything the
/// schema cannot represent.
pub fn project(root: &Declaration) -> ProjectionOutcome {
    let mut projector = Projector::new();
    let projected = projector.project(root);
    ProjectionOutcome {
        root: projected,
        report: projector.into_report(),
    }
}
