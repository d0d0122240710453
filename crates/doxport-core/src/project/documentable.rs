//! Declaration projection
//!
//! The top-level recursive walk over the host tree. Each recognized
//! declaration variant builds its output counterpart using the facet,
//! type, and doc-tag helpers; unrecognized variants are dropped from
//! their parent's children with a diagnostic, leaving sibling order
//! untouched. The walk is pure structural recursion over an immutable,
//! acyclic tree.
//!
//! Copyright (c) 2025 Doxport Team
//! Licensed under the Apache-2.0 license

use crate::model::{Declaration, DocBlock, Faceted, Parameter};
use crate::project::diagnostics::{DiagnosticReport, DiagnosticTracker};
use crate::project::doctags::collect_docs;
use crate::project::facets::{resolve_modifiers, resolve_visibility};
use crate::project::types::project_bound;
use crate::schema::{DocsMap, Documentable};

/// Stateful walk over one host tree; collects diagnostics as it goes.
#[derive(Debug, Default)]
pub struct Projector {
    diagnostics: DiagnosticTracker,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the projector and produce the diagnostic report for the
    /// completed pass.
    pub fn into_report(self) -> DiagnosticReport {
        self.diagnostics.build_report()
    }

    /// Project one declaration, or `None` for variants the schema does
    /// not cover.
    pub fn project(&mut self, declaration: &Declaration) -> Option<Documentable> {
        match declaration {
            Declaration::Module {
                dri,
                name,
                children,
                documentation,
            } => Some(Documentable::Module {
                dri: dri.clone(),
                name: name.clone(),
                children: self.project_children(children),
                docs: self.docs(documentation),
            }),

            Declaration::Package {
                dri,
                name,
                children,
                documentation,
            } => Some(Documentable::Package {
                dri: dri.clone(),
                name: name.clone(),
                children: self.project_children(children),
                docs: self.docs(documentation),
            }),

            Declaration::Class {
                dri,
                name,
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion,
                documentation,
            } => Some(self.project_classlike(
                "class",
                dri,
                Some(name),
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion.as_deref(),
                documentation,
            )),

            Declaration::Interface {
                dri,
                name,
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion,
                documentation,
            } => Some(self.project_classlike(
                "interface",
                dri,
                Some(name),
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion.as_deref(),
                documentation,
            )),

            Declaration::Object {
                dri,
                name,
                children,
                visibility,
                modifier,
                extra_modifiers,
                documentation,
            } => Some(self.project_classlike(
                "object",
                dri,
                name.as_ref(),
                children,
                visibility,
                modifier,
                extra_modifiers,
                None,
                documentation,
            )),

            Declaration::Annotation {
                dri,
                name,
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion,
                documentation,
            } => Some(self.project_classlike(
                "annotation",
                dri,
                Some(name),
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion.as_deref(),
                documentation,
            )),

            Declaration::Enum {
                dri,
                name,
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion,
                documentation,
            } => Some(self.project_classlike(
                "enum",
                dri,
                Some(name),
                children,
                visibility,
                modifier,
                extra_modifiers,
                companion.as_deref(),
                documentation,
            )),

            Declaration::EnumEntry {
                dri,
                name,
                children,
                documentation,
            } => Some(Documentable::EnumEntry {
                dri: dri.clone(),
                name: name.clone(),
                children: self.project_children(children),
                docs: self.docs(documentation),
            }),

            Declaration::Function {
                dri,
                name,
                is_constructor,
                parameters,
                visibility,
                type_,
                modifier,
                extra_modifiers,
                documentation,
            } => Some(Documentable::Function {
                dri: dri.clone(),
                name: name.clone(),
                is_constructor: *is_constructor,
                parameters: parameters
                    .iter()
                    .map(|p| self.project_parameter(p))
                    .collect(),
                visibility: resolve_visibility(visibility),
                return_type: type_
                    .for_default_platform()
                    .and_then(|bound| project_bound(dri, bound, &mut self.diagnostics)),
                modifiers: resolve_modifiers(modifier, extra_modifiers),
                docs: self.docs(documentation),
            }),

            Declaration::Parameter(parameter) => Some(self.project_parameter(parameter)),

            Declaration::Property {
                dri,
                name,
                has_setter,
                visibility,
                type_,
                modifier,
                extra_modifiers,
                documentation,
            } => Some(Documentable::Property {
                dri: dri.clone(),
                name: name.clone(),
                is_mutable: *has_setter,
                visibility: resolve_visibility(visibility),
                return_type: type_
                    .for_default_platform()
                    .and_then(|bound| project_bound(dri, bound, &mut self.diagnostics)),
                modifiers: resolve_modifiers(modifier, extra_modifiers),
                docs: self.docs(documentation),
            }),

            // New host variants land here: dropped loudly, never
            // miscompiled silently.
            other @ Declaration::TypeAlias { .. } => {
                self.diagnostics
                    .record_declaration(other.dri(), other.variant_name());
                None
            }
        }
    }

    fn project_children(&mut self, children: &[Declaration]) -> Vec<Documentable> {
        children
            .iter()
            .filter_map(|child| self.project(child))
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn project_classlike(
        &mut self,
        kind: &str,
        dri: &str,
        name: Option<&String>,
        children: &[Declaration],
        visibility: &Faceted<String>,
        modifier: &Faceted<String>,
        extra_modifiers: &Faceted<Vec<String>>,
        companion: Option<&Declaration>,
        documentation: &Faceted<DocBlock>,
    ) -> Documentable {
        Documentable::Classlike {
            dri: dri.to_string(),
            name: name.cloned(),
            children: self.project_children(children),
            visibility: resolve_visibility(visibility),
            kind: kind.to_string(),
            modifiers: resolve_modifiers(modifier, extra_modifiers),
            companion: companion
                .and_then(|declaration| self.project(declaration))
                .map(Box::new),
            docs: self.docs(documentation),
        }
    }

    fn project_parameter(&mut self, parameter: &Parameter) -> Documentable {
        Documentable::Parameter {
            dri: parameter.dri.clone(),
            name: parameter.name.clone(),
            parameter_type: parameter
                .type_
                .for_default_platform()
                .and_then(|bound| project_bound(&parameter.dri, bound, &mut self.diagnostics)),
            docs: self.docs(&parameter.documentation),
        }
    }

    fn docs(&self, documentation: &Faceted<DocBlock>) -> DocsMap {
        collect_docs(documentation.for_default_platform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bound, DocSection, DocTag, SectionKind};

    fn leaf_property(dri: &str, name: &str) -> Declaration {
        Declaration::Property {
            dri: dri.to_string(),
            name: name.to_string(),
            has_setter: false,
            visibility: Faceted::common("public".to_string()),
            type_: Faceted::common(Bound::GenericTypeConstructor {
                dri: "kotlin/Double///".to_string(),
                projections: vec![],
                presentable_name: None,
            }),
            modifier: Faceted::common("final".to_string()),
            extra_modifiers: Faceted::common(vec!["const".to_string()]),
            documentation: Faceted::default(),
        }
    }

    #[test]
    fn test_kind_mapping_is_fixed() {
        let mut projector = Projector::new();
        let cases: Vec<(Declaration, &str)> = vec![
            (
                Declaration::Interface {
                    dri: "p/I".into(),
                    name: "I".into(),
                    children: vec![],
                    visibility: Faceted::new(),
                    modifier: Faceted::new(),
                    extra_modifiers: Faceted::new(),
                    companion: None,
                    documentation: Faceted::default(),
                },
                "interface",
            ),
            (
                Declaration::Object {
                    dri: "p/O".into(),
                    name: Some("O".into()),
                    children: vec![],
                    visibility: Faceted::new(),
                    modifier: Faceted::new(),
                    extra_modifiers: Faceted::new(),
                    documentation: Faceted::default(),
                },
                "object",
            ),
            (
                Declaration::Annotation {
                    dri: "p/A".into(),
                    name: "A".into(),
                    children: vec![],
                    visibility: Faceted::new(),
                    modifier: Faceted::new(),
                    extra_modifiers: Faceted::new(),
                    companion: None,
                    documentation: Faceted::default(),
                },
                "annotation",
            ),
        ];

        for (declaration, expected) in cases {
            match projector.project(&declaration) {
                Some(Documentable::Classlike { kind, .. }) => assert_eq!(kind, expected),
                other => panic!("expected Classlike, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_const_property_modifiers_and_empty_docs() {
        let mut projector = Projector::new();
        let projected = projector.project(&leaf_property("p/C/INVALID", "INVALID")).unwrap();

        match projected {
            Documentable::Property {
                modifiers,
                docs,
                is_mutable,
                ..
            } => {
                assert_eq!(modifiers, vec!["final", "const"]);
                assert!(docs.is_empty());
                assert!(!is_mutable);
            }
            other => panic!("expected Property, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_child_is_dropped_in_place() {
        let mut projector = Projector::new();
        let package = Declaration::Package {
            dri: "p".into(),
            name: "p".into(),
            children: vec![
                leaf_property("p/first", "first"),
                Declaration::TypeAlias {
                    dri: "p/Alias".into(),
                    name: "Alias".into(),
                    type_: Faceted::default(),
                    documentation: Faceted::default(),
                },
                leaf_property("p/last", "last"),
            ],
            documentation: Faceted::default(),
        };

        let projected = projector.project(&package).unwrap();
        let children = projected.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].dri(), "p/first");
        assert_eq!(children[1].dri(), "p/last");

        let report = projector.into_report();
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].path, "p/Alias");
        assert_eq!(report.items[0].variant, "typeAlias");
    }

    #[test]
    fn test_companion_is_projected_recursively() {
        let mut projector = Projector::new();
        let class = Declaration::Class {
            dri: "p/Widget".into(),
            name: "Widget".into(),
            children: vec![],
            visibility: Faceted::common("public".to_string()),
            modifier: Faceted::common("final".to_string()),
            extra_modifiers: Faceted::default(),
            companion: Some(Box::new(Declaration::Object {
                dri: "p/Widget.Companion".into(),
                name: Some("Companion".into()),
                children: vec![],
                visibility: Faceted::common("public".to_string()),
                modifier: Faceted::new(),
                extra_modifiers: Faceted::new(),
                documentation: Faceted::default(),
            })),
            documentation: Faceted::default(),
        };

        match projector.project(&class).unwrap() {
            Documentable::Classlike { companion, .. } => {
                let companion = companion.expect("companion survives projection");
                match *companion {
                    Documentable::Classlike { ref kind, ref dri, .. } => {
                        assert_eq!(kind, "object");
                        assert_eq!(dri, "p/Widget.Companion");
                    }
                    ref other => panic!("expected Classlike companion, got {:?}", other),
                }
            }
            other => panic!("expected Classlike, got {:?}", other),
        }
    }

    #[test]
    fn test_docs_use_default_platform_block_only() {
        let mut projector = Projector::new();
        use crate::model::{Platform, SourceSet};

        let documentation = Faceted::new()
            .with(
                SourceSet::new("jvmMain", Platform::Jvm),
                DocBlock::new(vec![DocSection::new(
                    SectionKind::Description,
                    DocTag::text("jvm only"),
                )]),
            )
            .with(
                SourceSet::new("commonMain", Platform::Common),
                DocBlock::new(vec![DocSection::new(
                    SectionKind::Description,
                    DocTag::text("common"),
                )]),
            );

        let module = Declaration::Module {
            dri: "root".into(),
            name: "m".into(),
            children: vec![],
            documentation,
        };

        let projected = projector.project(&module).unwrap();
        assert_eq!(
            projected.docs().get("Description"),
            Some(&"common".to_string())
        );
    }
}
