//! Documentation-tag rendering
//!
//! Flattens the nested tag tree of a documentation comment into a markup
//! string and derives the lookup key each top-level section is stored
//! under. Attribute values and text bodies are embedded as-is: no escaping
//! is performed, so a quote character inside an attribute value produces
//! markup that is not well-formed. Known limitation, kept for parity with
//! the consumers of the format.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

use crate::model::{DocBlock, DocSection, DocTag};
use crate::schema::DocsMap;

/// Render one tag tree to its markup string.
///
/// Text leaves render to their raw body. A tag with no children renders
/// self-closing; otherwise its children are rendered in order and
/// concatenated with no separator between them.
pub fn render(tag: &DocTag) -> String {
    match tag {
        DocTag::Text { body } => body.clone(),
        DocTag::Tag(node) => {
            let mut open = format!("<{}", node.kind);
            for (key, value) in &node.attributes {
                open.push_str(&format!(" {}=\"{}\"", key, value));
            }
            // The reference attribute always comes last.
            if let Some(dri) = &node.referenced_id {
                open.push_str(&format!(" dri=\"{}\"", dri));
            }

            if node.children.is_empty() {
                open.push_str(" />");
                open
            } else {
                let children: String = node.children.iter().map(render).collect();
                format!("{}>{}</{}>", open, children, node.kind)
            }
        }
    }
}

/// Derive the documentation-mapping key of a top-level section:
/// `"<Label>: <name>"` for sections bound to a specific member, plain
/// `"<Label>"` otherwise.
pub fn section_key(section: &DocSection) -> String {
    match &section.name {
        Some(name) => format!("{}: {}", section.kind.label(), name),
        None => section.kind.label().to_string(),
    }
}

/// Build the documentation mapping for a declaration from its
/// default-platform block. Sections producing the same key overwrite
/// earlier ones (map semantics, not an error); an absent block yields an
/// empty mapping.
pub fn collect_docs(block: Option<&DocBlock>) -> DocsMap {
    let mut docs = DocsMap::new();
    if let Some(block) = block {
        for section in &block.sections {
            docs.insert(section_key(section), render(&section.root));
        }
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SectionKind, TagNode};

    #[test]
    fn test_text_leaf_renders_raw_body() {
        assert_eq!(render(&DocTag::text("plain & <unescaped>")), "plain & <unescaped>");
    }

    #[test]
    fn test_childless_tag_is_self_closing() {
        let tag = DocTag::Tag(TagNode::new("br"));
        assert_eq!(render(&tag), "<br />");
    }

    #[test]
    fn test_attributes_join_in_stored_order() {
        let tag = DocTag::Tag(
            TagNode::new("img")
                .attribute("src", "a.png")
                .attribute("alt", "diagram"),
        );
        assert_eq!(render(&tag), "<img src=\"a.png\" alt=\"diagram\" />");
    }

    #[test]
    fn test_link_tag_appends_dri_last() {
        let tag = DocTag::Tag(
            TagNode::new("a")
                .attribute("href", "#")
                .referencing("pkg/Widget///")
                .child(DocTag::text("Widget")),
        );
        assert_eq!(
            render(&tag),
            "<a href=\"#\" dri=\"pkg/Widget///\">Widget</a>"
        );
    }

    #[test]
    fn test_children_concatenate_without_separator() {
        let tag = DocTag::Tag(
            TagNode::new("p")
                .child(DocTag::text("one"))
                .child(DocTag::Tag(TagNode::new("b").child(DocTag::text("two"))))
                .child(DocTag::text("three")),
        );
        assert_eq!(render(&tag), "<p>one<b>two</b>three</p>");
    }

    #[test]
    fn test_attribute_values_are_not_escaped() {
        let tag = DocTag::Tag(TagNode::new("span").attribute("title", "say \"hi\""));
        assert_eq!(render(&tag), "<span title=\"say \"hi\"\" />");
    }

    #[test]
    fn test_section_key_naming() {
        let plain = DocSection::new(SectionKind::Description, DocTag::text("d"));
        assert_eq!(section_key(&plain), "Description");

        let named = DocSection::named(SectionKind::Property, "reason", DocTag::text("p"));
        assert_eq!(section_key(&named), "Property: reason");
    }

    #[test]
    fn test_collect_docs_last_write_wins() {
        let block = DocBlock::new(vec![
            DocSection::named(SectionKind::Property, "reason", DocTag::text("first")),
            DocSection::new(SectionKind::Description, DocTag::text("desc")),
            DocSection::named(SectionKind::Property, "reason", DocTag::text("second")),
        ]);

        let docs = collect_docs(Some(&block));
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.get("Property: reason"), Some(&"second".to_string()));
        assert_eq!(docs.get("Description"), Some(&"desc".to_string()));
    }

    #[test]
    fn test_collect_docs_absent_block() {
        assert!(collect_docs(None).is_empty());
    }
}
