use serde::Serialize;
use tower_lsp::lsp_types::{self as lsp, Location};

use crate::infer::TypeHint;

/// Kind of a named entity extracted from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Function,
    Method,
    Variable,
    Class,
    Struct,
    Enum,
    EnumMember,
    Macro,
    Namespace,
}

impl SymbolKind {
    /// Closest LSP symbol kind, for consumers building outlines and
    /// completion items. LSP has no macro kind; macros surface as functions.
    pub fn to_lsp(self) -> lsp::SymbolKind {
        match self {
            SymbolKind::Function | SymbolKind::Macro => lsp::SymbolKind::FUNCTION,
            SymbolKind::Method => lsp::SymbolKind::METHOD,
            SymbolKind::Variable => lsp::SymbolKind::VARIABLE,
            SymbolKind::Class => lsp::SymbolKind::CLASS,
            SymbolKind::Struct => lsp::SymbolKind::STRUCT,
            SymbolKind::Enum => lsp::SymbolKind::ENUM,
            SymbolKind::EnumMember => lsp::SymbolKind::ENUM_MEMBER,
            SymbolKind::Namespace => lsp::SymbolKind::NAMESPACE,
        }
    }
}

/// One function, method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeHint,
    /// Serialized source text of the default value, when one was declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeHint::Any,
            default_value: None,
        }
    }
}

/// Payload attached to a symbol. Most fields are populated only by the
/// handler that created the symbol; `exported` is the one exception and may
/// be flipped by a later `export` statement within the same rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub documentation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParameterDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeHint>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeHint>,
    /// Owning enum type name, on `EnumMember` symbols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    /// Module path this symbol was imported from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_module: Option<String>,
    /// Pre-aliasing name, on aliased exports and renamed imports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub exported: bool,
    pub imported: bool,
    pub namespace_import: bool,
}

/// A named, located entity in one document's symbol table.
///
/// Qualified as `"Container.member"` for nested entities. Created by exactly
/// one handler invocation and destroyed wholesale when the owning document
/// is rebuilt or closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
    pub data: SymbolData,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: Location) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
            data: SymbolData::default(),
        }
    }
}
