//! Property-based tests for the projection pipeline
//!
//! These tests verify structural laws of tag rendering and type
//! projection across a wide range of generated inputs.

use doxport_core::model::{Bound, DocBlock, DocSection, DocTag, SectionKind, TagNode};
use doxport_core::project::{collect_docs, project_bound, render, DiagnosticTracker};
use proptest::prelude::*;

/// Strategy for generating tag trees with controlled depth
fn doc_tag_strategy() -> impl Strategy<Value = DocTag> {
    let leaf = prop_oneof![
        "[a-zA-Z0-9 .,!?]{0,40}".prop_map(DocTag::text),
        "[a-z]{1,8}".prop_map(|kind| DocTag::Tag(TagNode::new(kind))),
    ];

    leaf.prop_recursive(3, 16, 4, |inner| {
        (
            "[a-z]{1,8}",
            proptest::collection::vec(("[a-z]{1,6}", "[a-zA-Z0-9 ]{0,12}"), 0..3),
            proptest::option::of("[a-z/.]{1,20}"),
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(kind, attributes, referenced_id, children)| {
                let mut node = TagNode::new(kind);
                for (key, value) in attributes {
                    node = node.attribute(key, value);
                }
                if let Some(dri) = referenced_id {
                    node = node.referencing(dri);
                }
                for child in children {
                    node = node.child(child);
                }
                DocTag::Tag(node)
            })
    })
}

/// Strategy for generating type-reference trees
fn bound_strategy() -> impl Strategy<Value = Bound> {
    let leaf = prop_oneof![
        Just(Bound::Void),
        Just(Bound::Dynamic),
        Just(Bound::UnresolvedBound),
        ("[a-z/.]{1,20}", "[A-Z][a-z]{0,8}").prop_map(|(dri, name)| Bound::TypeParameter {
            dri,
            name,
            presentable_name: None,
        }),
        "[a-z/.]{1,20}".prop_map(|dri| Bound::GenericTypeConstructor {
            dri,
            projections: vec![],
            presentable_name: None,
        }),
    ];

    leaf.prop_recursive(3, 12, 3, |inner| {
        inner.prop_map(|bound| Bound::Nullable {
            inner: Box::new(bound),
        })
    })
}

proptest! {
    /// A tag with no children always renders self-closing; a tag with
    /// children always closes with its own kind.
    #[test]
    fn render_self_closing_law(tag in doc_tag_strategy()) {
        let rendered = render(&tag);
        if let DocTag::Tag(node) = &tag {
            let closing = format!("</{}>", node.kind);
            let opening = format!("<{}", node.kind);
            if node.children.is_empty() {
                prop_assert!(rendered.ends_with(" />"));
            } else {
                prop_assert!(rendered.ends_with(&closing));
            }
            prop_assert!(rendered.starts_with(&opening));
        }
    }

    /// Rendering is deterministic.
    #[test]
    fn render_is_deterministic(tag in doc_tag_strategy()) {
        prop_assert_eq!(render(&tag), render(&tag));
    }

    /// Bound projection is total and drops exactly the variants the
    /// schema cannot express.
    #[test]
    fn bound_projection_totality(bound in bound_strategy()) {
        let mut tracker = DiagnosticTracker::new();
        let projected = project_bound("owner", &bound, &mut tracker);

        match &bound {
            Bound::Dynamic | Bound::UnresolvedBound => {
                prop_assert!(projected.is_none());
                prop_assert_eq!(tracker.item_count(), 1);
            }
            // Nullable of a droppable inner still projects to a
            // NullableRef with an absent inner.
            _ => prop_assert!(projected.is_some()),
        }
    }

    /// Documentation collection is deterministic and keys follow the
    /// "Label" / "Label: name" convention.
    #[test]
    fn collect_docs_keys_and_determinism(
        roots in proptest::collection::vec(doc_tag_strategy(), 0..4),
        name in proptest::option::of("[a-z]{1,10}"),
    ) {
        let sections: Vec<DocSection> = roots
            .iter()
            .map(|root| match &name {
                Some(n) => DocSection::named(SectionKind::Param, n.clone(), root.clone()),
                None => DocSection::new(SectionKind::Description, root.clone()),
            })
            .collect();
        let block = DocBlock::new(sections);

        let first = collect_docs(Some(&block));
        let second = collect_docs(Some(&block));
        prop_assert_eq!(&first, &second);

        for key in first.keys() {
            match &name {
                Some(n) => prop_assert_eq!(key, &format!("Param: {}", n)),
                None => prop_assert_eq!(key, "Description"),
            }
        }
    }
}
