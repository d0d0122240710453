//! Type-reference projection
//!
//! Recursively converts host type references into their serializable form.
//! Constructor projections that fail to project are dropped from the
//! enclosing list rather than emitted as null placeholders; a nullable
//! wrapper survives even when its inner type does not, so consumers keep
//! the signal that the slot is nullable.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

use crate::model::{Bound, Projection};
use crate::project::diagnostics::DiagnosticTracker;
use crate::schema::TypeRef;

/// Project a host type reference, or yield `None` (with a diagnostic) for
/// variants the schema cannot express. `owner` is the dri of the
/// declaration whose signature the reference appears in.
pub fn project_bound(
    owner: &str,
    bound: &Bound,
    diagnostics: &mut DiagnosticTracker,
) -> Option<TypeRef> {
    match bound {
        Bound::TypeParameter {
            dri,
            name,
            presentable_name,
        } => Some(TypeRef::TypeParameterRef {
            dri: dri.clone(),
            name: name.clone(),
            presentable_name: presentable_name.clone(),
        }),

        Bound::GenericTypeConstructor {
            dri,
            projections,
            presentable_name,
        } => Some(TypeRef::GenericConstructorRef {
            dri: dri.clone(),
            projections: project_projections(owner, projections, diagnostics),
            presentable_name: presentable_name.clone(),
        }),

        Bound::FunctionalTypeConstructor {
            dri,
            projections,
            is_extension_function,
            is_suspendable,
            presentable_name,
        } => Some(TypeRef::FunctionalConstructorRef {
            dri: dri.clone(),
            projections: project_projections(owner, projections, diagnostics),
            is_extension_function: *is_extension_function,
            is_suspendable: *is_suspendable,
            presentable_name: presentable_name.clone(),
        }),

        // An unprojectable inner type collapses to `inner: null`; the
        // nullable slot itself never vanishes.
        Bound::Nullable { inner } => Some(TypeRef::NullableRef {
            inner: project_bound(owner, inner, diagnostics).map(Box::new),
        }),

        Bound::Void => Some(TypeRef::VoidRef),

        other @ (Bound::Dynamic | Bound::UnresolvedBound) => {
            diagnostics.record_bound(owner, other.variant_name());
            None
        }
    }
}

/// Project a generic argument. Variance wildcards and star projections are
/// recognized but have no schema form; they are dropped without a
/// diagnostic.
pub fn project_projection(
    owner: &str,
    projection: &Projection,
    diagnostics: &mut DiagnosticTracker,
) -> Option<TypeRef> {
    match projection {
        Projection::Bound(bound) => project_bound(owner, bound, diagnostics),
        Projection::Star | Projection::Variance { .. } => None,
    }
}

fn project_projections(
    owner: &str,
    projections: &[Projection],
    diagnostics: &mut DiagnosticTracker,
) -> Vec<TypeRef> {
    projections
        .iter()
        .filter_map(|p| project_projection(owner, p, diagnostics))
        .collect()
}
