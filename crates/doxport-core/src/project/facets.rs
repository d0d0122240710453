//! Facet resolution helpers
//!
//! Per-platform facets collapse to the single default-platform value via
//! [`Faceted::for_default_platform`](crate::model::Faceted); the helpers
//! here cover the two derived resolutions the projector needs: visibility
//! labels and the merged modifier list.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

use crate::model::Faceted;

/// Resolve a visibility facet to its default-platform label.
pub fn resolve_visibility(visibility: &Faceted<String>) -> Option<String> {
    visibility.for_default_platform().cloned()
}

/// Merge a declaration's primary keyword modifier with its secondary
/// modifier list into one ordered list.
///
/// The primary keyword, when resolvable for the default platform, always
/// comes first; otherwise the secondary list is returned unchanged.
pub fn merge_modifiers(primary: Option<&String>, secondary: Option<&Vec<String>>) -> Vec<String> {
    let secondary = secondary.cloned().unwrap_or_default();
    match primary {
        Some(keyword) => {
            let mut merged = Vec::with_capacity(1 + secondary.len());
            merged.push(keyword.clone());
            merged.extend(secondary);
            merged
        }
        None => secondary,
    }
}

/// Resolve and merge the modifier facets of a declaration.
pub fn resolve_modifiers(
    modifier: &Faceted<String>,
    extra_modifiers: &Faceted<Vec<String>>,
) -> Vec<String> {
    merge_modifiers(
        modifier.for_default_platform(),
        extra_modifiers.for_default_platform(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, SourceSet};

    #[test]
    fn test_primary_keyword_comes_first() {
        let merged = merge_modifiers(
            Some(&"final".to_string()),
            Some(&vec!["data".to_string(), "inline".to_string()]),
        );
        assert_eq!(merged, vec!["final", "data", "inline"]);
    }

    #[test]
    fn test_missing_primary_leaves_secondary_unchanged() {
        let merged = merge_modifiers(None, Some(&vec!["const".to_string()]));
        assert_eq!(merged, vec!["const"]);
    }

    #[test]
    fn test_all_absent_yields_empty_list() {
        assert!(merge_modifiers(None, None).is_empty());
    }

    #[test]
    fn test_resolve_modifiers_ignores_other_platforms() {
        let modifier = Faceted::new().with(SourceSet::new("jvmMain", Platform::Jvm), "open".to_string());
        let extra = Faceted::common(vec!["const".to_string()]);
        // No default-platform keyword: secondary list only.
        assert_eq!(resolve_modifiers(&modifier, &extra), vec!["const"]);
    }

    #[test]
    fn test_resolve_visibility() {
        let visibility = Faceted::common("private".to_string());
        assert_eq!(resolve_visibility(&visibility), Some("private".to_string()));
        assert_eq!(resolve_visibility(&Faceted::new()), None);
    }
}
