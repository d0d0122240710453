//! Doxport Core - Export engine for versioned API-documentation artifacts
//!
//! This crate turns a host documentation tree into a stable, serializable
//! schema and writes it as a deterministic JSON artifact.
//!
//! # Main Components
//!
//! - **Host Model**: Data structures mirroring the documentation tree as the
//!   host tool produces it, including per-platform facet maps
//! - **Export Schema**: The versioned, tagged output shape consumers decode
//! - **Projection Pipeline**: Facet resolution, type projection, doc-tag
//!   rendering, and the recursive declaration walk
//! - **Diagnostics**: A report of everything the schema could not represent
//! - **Writer**: Canonical rendering and atomic file replacement
//!
//! # Example
//!
//! ```no_run
//! use doxport_core::{export_model, model::{Declaration, Faceted}};
//!
//! fn example() -> doxport_core::Result<()> {
//!     let root = Declaration::Module {
//!         dri: "root".into(),
//!         name: "demo".into(),
//!         children: vec![],
//!         documentation: Faceted::default(),
//!     };
//!     let report = export_model(&root, std::path::Path::new("model.json"))?;
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod project;
pub mod schema;
pub mod writer;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use project::{
    project, Diagnostic, DiagnosticCode, DiagnosticReport, DiagnosticSummary, ProjectionOutcome,
    Projector, Severity,
};
pub use schema::{DocsMap, Documentable, TypeRef};
pub use writer::{render_artifact, write_artifact};

use std::path::Path;

use model::Declaration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project `root` and write its artifact to `path`.
///
/// Returns the diagnostic report for the pass. Fails without touching the
/// destination when the root itself is not representable in the schema.
pub fn export_model(root: &Declaration, path: &Path) -> Result<DiagnosticReport> {
    tracing::info!(path = %path.display(), "exporting documentation model");

    let outcome = project(root);
    let projected = outcome.root.ok_or_else(|| {
        Error::model(format!(
            "root declaration '{}' ({}) is not representable in the export schema",
            root.dri(),
            root.variant_name()
        ))
    })?;

    write_artifact(&projected, path)?;
    Ok(outcome.report)
}
