//! Serializable export schema
//!
//! The stable, versioned JSON shape consumed by downstream documentation
//! tooling. Every object carries a `"type"` discriminator holding the
//! fully-qualified variant name so consumers can decode the tagged unions
//! without external schema knowledge. Field names and their order are part
//! of the contract; absent optional fields serialize as `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendered documentation mapping of a node: derived key to flattened
/// markup string. Keys are unique; sorted order keeps re-runs on unchanged
/// input byte-identical.
pub type DocsMap = BTreeMap<String, String>;

/// A projected declaration node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Documentable {
    #[serde(rename = "doxport.schema.Module")]
    Module {
        dri: String,
        name: String,
        children: Vec<Documentable>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.Package")]
    Package {
        dri: String,
        name: String,
        children: Vec<Documentable>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.Classlike")]
    Classlike {
        dri: String,
        name: Option<String>,
        children: Vec<Documentable>,
        visibility: Option<String>,
        /// One of `class`, `interface`, `object`, `annotation`, `enum`
        kind: String,
        modifiers: Vec<String>,
        /// Companion object; always a `Classlike` when present
        companion: Option<Box<Documentable>>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.Function")]
    Function {
        dri: String,
        name: String,
        #[serde(rename = "isConstructor")]
        is_constructor: bool,
        parameters: Vec<Documentable>,
        visibility: Option<String>,
        #[serde(rename = "returnType")]
        return_type: Option<TypeRef>,
        modifiers: Vec<String>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.Parameter")]
    Parameter {
        dri: String,
        name: Option<String>,
        #[serde(rename = "parameterType")]
        parameter_type: Option<TypeRef>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.Property")]
    Property {
        dri: String,
        name: String,
        #[serde(rename = "isMutable")]
        is_mutable: bool,
        visibility: Option<String>,
        #[serde(rename = "returnType")]
        return_type: Option<TypeRef>,
        modifiers: Vec<String>,
        docs: DocsMap,
    },

    #[serde(rename = "doxport.schema.EnumEntry")]
    EnumEntry {
        dri: String,
        name: String,
        children: Vec<Documentable>,
        docs: DocsMap,
    },
}

impl Documentable {
    pub fn dri(&self) -> &str {
        match self {
            Documentable::Module { dri, .. }
            | Documentable::Package { dri, .. }
            | Documentable::Classlike { dri, .. }
            | Documentable::Function { dri, .. }
            | Documentable::Parameter { dri, .. }
            | Documentable::Property { dri, .. }
            | Documentable::EnumEntry { dri, .. } => dri,
        }
    }

    /// Ordered children of container nodes; empty for leaf variants.
    pub fn children(&self) -> &[Documentable] {
        match self {
            Documentable::Module { children, .. }
            | Documentable::Package { children, .. }
            | Documentable::Classlike { children, .. }
            | Documentable::EnumEntry { children, .. } => children,
            _ => &[],
        }
    }

    pub fn docs(&self) -> &DocsMap {
        match self {
            Documentable::Module { docs, .. }
            | Documentable::Package { docs, .. }
            | Documentable::Classlike { docs, .. }
            | Documentable::Function { docs, .. }
            | Documentable::Parameter { docs, .. }
            | Documentable::Property { docs, .. }
            | Documentable::EnumEntry { docs, .. } => docs,
        }
    }
}

/// A projected type reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypeRef {
    #[serde(rename = "doxport.schema.TypeParameterRef")]
    TypeParameterRef {
        dri: String,
        name: String,
        #[serde(rename = "presentableName")]
        presentable_name: Option<String>,
    },

    #[serde(rename = "doxport.schema.GenericConstructorRef")]
    GenericConstructorRef {
        dri: String,
        projections: Vec<TypeRef>,
        #[serde(rename = "presentableName")]
        presentable_name: Option<String>,
    },

    #[serde(rename = "doxport.schema.FunctionalConstructorRef")]
    FunctionalConstructorRef {
        dri: String,
        projections: Vec<TypeRef>,
        #[serde(rename = "isExtensionFunction")]
        is_extension_function: bool,
        #[serde(rename = "isSuspendable")]
        is_suspendable: bool,
        #[serde(rename = "presentableName")]
        presentable_name: Option<String>,
    },

    #[serde(rename = "doxport.schema.NullableRef")]
    NullableRef { inner: Option<Box<TypeRef>> },

    /// Serializes as an empty type-tagged object
    #[serde(rename = "doxport.schema.VoidRef")]
    VoidRef,
}
