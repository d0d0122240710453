//! Host documentation model consumed by the projection pipeline
//!
//! These types describe the declaration tree the documentation host hands
//! over after parsing a codebase: declarations with per-target-platform
//! facets, recursive type references, and documentation-comment tag trees.
//! The tree is fully built and immutable by the time projection runs; the
//! exporter never mutates it and never reinterprets host identifiers.
//!
//! All types are serde-enabled so a dumped model can be loaded back from
//! JSON or YAML by the CLI and by test fixtures.

use serde::{Deserialize, Serialize};

/// Compilation target platform of a source set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Common,
    Jvm,
    Js,
    Native,
    Wasm,
}

impl Platform {
    /// The designated default analysis platform. Facet resolution selects
    /// values recorded for this platform and ignores all others.
    pub const DEFAULT: Platform = Platform::Common;
}

/// Identity of one compilation target the host analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    /// Display name of the source set (e.g. "commonMain")
    pub name: String,

    /// Analysis platform of the source set
    pub platform: Platform,
}

impl SourceSet {
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
        }
    }
}

/// One per-source-set value of a faceted attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetEntry<T> {
    pub source_set: SourceSet,
    pub value: T,
}

/// A per-target-platform mapping of some attribute value.
///
/// Entries keep the host's order. Resolution to a single value is the job
/// of [`Faceted::for_default_platform`]; no merging or fallback between
/// platforms ever happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faceted<T> {
    entries: Vec<FacetEntry<T>>,
}

impl<T> Default for Faceted<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Faceted<T> {
    /// An empty mapping (attribute recorded for no platform).
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping holding a single value for the default platform.
    pub fn common(value: T) -> Self {
        Self {
            entries: vec![FacetEntry {
                source_set: SourceSet::new("commonMain", Platform::DEFAULT),
                value,
            }],
        }
    }

    /// Append a value recorded for `source_set`.
    pub fn with(mut self, source_set: SourceSet, value: T) -> Self {
        self.entries.push(FacetEntry { source_set, value });
        self
    }

    /// Select the value recorded for the default analysis platform.
    ///
    /// Returns the first entry whose source set targets
    /// [`Platform::DEFAULT`], or `None` when the attribute only exists for
    /// other platforms. A missing default-platform value is not an error.
    pub fn for_default_platform(&self) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.source_set.platform == Platform::DEFAULT)
            .map(|e| &e.value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FacetEntry<T>] {
        &self.entries
    }
}

/// A declaration in the host's documentation tree.
///
/// The set of variants is the host's, not ours: the projector handles the
/// ones it recognizes and drops the rest with a diagnostic. `TypeAlias` is
/// such an unexported variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Declaration {
    Module {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Package {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Class {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        visibility: Faceted<String>,
        /// Primary keyword modifier per platform (e.g. "final", "open")
        #[serde(default)]
        modifier: Faceted<String>,
        /// Secondary modifier list per platform (e.g. ["data"])
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        companion: Option<Box<Declaration>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Interface {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        visibility: Faceted<String>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        companion: Option<Box<Declaration>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Object {
        dri: String,
        /// Anonymous objects have no name
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        visibility: Faceted<String>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Annotation {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        visibility: Faceted<String>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        companion: Option<Box<Declaration>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Enum {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        visibility: Faceted<String>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        companion: Option<Box<Declaration>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    EnumEntry {
        dri: String,
        name: String,
        #[serde(default)]
        children: Vec<Declaration>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Function {
        dri: String,
        name: String,
        #[serde(default)]
        is_constructor: bool,
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default)]
        visibility: Faceted<String>,
        /// Return type per platform
        #[serde(default, rename = "type")]
        type_: Faceted<Bound>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    Parameter(Parameter),
    Property {
        dri: String,
        name: String,
        /// True iff the property has a setter
        #[serde(default)]
        has_setter: bool,
        #[serde(default)]
        visibility: Faceted<String>,
        #[serde(default, rename = "type")]
        type_: Faceted<Bound>,
        #[serde(default)]
        modifier: Faceted<String>,
        #[serde(default)]
        extra_modifiers: Faceted<Vec<String>>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
    /// Known to the host, not part of the export schema.
    TypeAlias {
        dri: String,
        name: String,
        #[serde(default, rename = "type")]
        type_: Faceted<Bound>,
        #[serde(default)]
        documentation: Faceted<DocBlock>,
    },
}

/// A function or constructor parameter.
///
/// Receiver and other unnamed parameters carry no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub dri: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Faceted<Bound>,
    #[serde(default)]
    pub documentation: Faceted<DocBlock>,
}

impl Declaration {
    /// Opaque stable identifier of the declaration, forwarded verbatim.
    pub fn dri(&self) -> &str {
        match self {
            Declaration::Module { dri, .. }
            | Declaration::Package { dri, .. }
            | Declaration::Class { dri, .. }
            | Declaration::Interface { dri, .. }
            | Declaration::Object { dri, .. }
            | Declaration::Annotation { dri, .. }
            | Declaration::Enum { dri, .. }
            | Declaration::EnumEntry { dri, .. }
            | Declaration::Function { dri, .. }
            | Declaration::Property { dri, .. }
            | Declaration::TypeAlias { dri, .. } => dri,
            Declaration::Parameter(p) => &p.dri,
        }
    }

    /// Host variant name, used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Declaration::Module { .. } => "module",
            Declaration::Package { .. } => "package",
            Declaration::Class { .. } => "class",
            Declaration::Interface { .. } => "interface",
            Declaration::Object { .. } => "object",
            Declaration::Annotation { .. } => "annotation",
            Declaration::Enum { .. } => "enum",
            Declaration::EnumEntry { .. } => "enumEntry",
            Declaration::Function { .. } => "function",
            Declaration::Parameter(_) => "parameter",
            Declaration::Property { .. } => "property",
            Declaration::TypeAlias { .. } => "typeAlias",
        }
    }
}

/// A type reference in a declaration signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Bound {
    TypeParameter {
        dri: String,
        name: String,
        #[serde(default)]
        presentable_name: Option<String>,
    },
    GenericTypeConstructor {
        dri: String,
        #[serde(default)]
        projections: Vec<Projection>,
        #[serde(default)]
        presentable_name: Option<String>,
    },
    FunctionalTypeConstructor {
        dri: String,
        #[serde(default)]
        projections: Vec<Projection>,
        #[serde(default)]
        is_extension_function: bool,
        #[serde(default)]
        is_suspendable: bool,
        #[serde(default)]
        presentable_name: Option<String>,
    },
    Nullable {
        inner: Box<Bound>,
    },
    Void,
    /// Dynamically typed slot; carries nothing the schema can express.
    Dynamic,
    /// The host failed to resolve this type.
    UnresolvedBound,
}

impl Bound {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Bound::TypeParameter { .. } => "typeParameter",
            Bound::GenericTypeConstructor { .. } => "genericTypeConstructor",
            Bound::FunctionalTypeConstructor { .. } => "functionalTypeConstructor",
            Bound::Nullable { .. } => "nullable",
            Bound::Void => "void",
            Bound::Dynamic => "dynamic",
            Bound::UnresolvedBound => "unresolvedBound",
        }
    }
}

/// A generic argument: either a full type reference or a variance wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "projection", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Projection {
    Bound(Bound),
    /// Star projection (`*`); dropped by the projector, never encoded.
    Star,
    /// Use-site variance (`in`/`out`); dropped by the projector.
    Variance { inner: Box<Bound> },
}

/// The parsed documentation block attached to a declaration for one
/// source set: an ordered list of top-level tag sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocBlock {
    #[serde(default)]
    pub sections: Vec<DocSection>,
}

impl DocBlock {
    pub fn new(sections: Vec<DocSection>) -> Self {
        Self { sections }
    }
}

/// A top-level tag section of a documentation block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSection {
    pub kind: SectionKind,
    /// Bound member name for sections that document a specific member
    /// (e.g. a per-parameter or per-property block)
    #[serde(default)]
    pub name: Option<String>,
    pub root: DocTag,
}

impl DocSection {
    pub fn new(kind: SectionKind, root: DocTag) -> Self {
        Self {
            kind,
            name: None,
            root,
        }
    }

    pub fn named(kind: SectionKind, name: impl Into<String>, root: DocTag) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            root,
        }
    }
}

/// Built-in top-level tag kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Description,
    Constructor,
    Property,
    Param,
    Return,
    Receiver,
    Throws,
    See,
    Author,
    Since,
    Sample,
    Deprecated,
    Suppress,
    Custom,
}

impl SectionKind {
    /// Stable label used when deriving documentation-mapping keys.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Description => "Description",
            SectionKind::Constructor => "Constructor",
            SectionKind::Property => "Property",
            SectionKind::Param => "Param",
            SectionKind::Return => "Return",
            SectionKind::Receiver => "Receiver",
            SectionKind::Throws => "Throws",
            SectionKind::See => "See",
            SectionKind::Author => "Author",
            SectionKind::Since => "Since",
            SectionKind::Sample => "Sample",
            SectionKind::Deprecated => "Deprecated",
            SectionKind::Suppress => "Suppress",
            SectionKind::Custom => "Custom",
        }
    }
}

/// A node of a documentation-comment tag tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocTag {
    /// Raw text leaf
    Text { body: String },
    /// Structured markup tag
    Tag(TagNode),
}

impl DocTag {
    pub fn text(body: impl Into<String>) -> Self {
        DocTag::Text { body: body.into() }
    }
}

/// A structured tag with attributes and nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNode {
    /// Fixed label for built-in tag kinds, or the custom tag's own label
    pub kind: String,

    /// Attribute pairs in stored order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,

    /// Target identifier, populated only for link-type tags
    #[serde(default)]
    pub referenced_id: Option<String>,

    #[serde(default)]
    pub children: Vec<DocTag>,
}

impl TagNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
            referenced_id: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn referencing(mut self, dri: impl Into<String>) -> Self {
        self.referenced_id = Some(dri.into());
        self
    }

    pub fn child(mut self, child: DocTag) -> Self {
        self.children.push(child);
        self
    }
}
