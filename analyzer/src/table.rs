use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use dashmap::DashMap;
use lyra_core::Expr;
use tower_lsp::lsp_types::Url;

use crate::docs;
use crate::forms::FormKind;
use crate::symbols::{Symbol, SymbolKind};

/// One document's source and its derived symbol table.
#[derive(Debug)]
pub(crate) struct DocumentState {
    pub(crate) exprs: Arc<[Expr]>,
    pub(crate) text: Arc<str>,
    pub(crate) symbols: Arc<Vec<Symbol>>,
}

#[derive(Debug, Clone)]
struct EnumEntry {
    owner: Url,
    cases: Vec<String>,
    stamp: u64,
}

/// Registry of enum case names, shared across documents.
///
/// Entries are partitioned by owning document internally; when two documents
/// define an enum with the same name, queries shadow by the most recent
/// registration rather than silently overwriting, so the collision is an
/// inspectable policy.
#[derive(Debug, Default)]
pub(crate) struct EnumRegistry {
    entries: DashMap<String, Vec<EnumEntry>>,
    stamp: AtomicU64,
}

impl EnumRegistry {
    /// Register the ordered case list of `name` as defined by `owner`,
    /// replacing any previous registration by the same document.
    pub(crate) fn register(&self, owner: &Url, name: &str, cases: Vec<String>) {
        let stamp = self.stamp.fetch_add(1, Ordering::Relaxed);
        let mut list = self.entries.entry(name.to_string()).or_default();
        list.retain(|entry| entry.owner != *owner);
        list.push(EnumEntry {
            owner: owner.clone(),
            cases,
            stamp,
        });
    }

    /// Drop every registration attributed to `owner`, so stale enum names
    /// from removed forms do not linger across a rebuild.
    pub(crate) fn clear_document(&self, owner: &Url) {
        self.entries.retain(|_, list| {
            list.retain(|entry| entry.owner != *owner);
            !list.is_empty()
        });
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|list| !list.is_empty())
    }

    /// Case names of `name` in declaration order, from the most recent
    /// registration when several documents define the same enum name.
    pub(crate) fn cases(&self, name: &str) -> Vec<String> {
        self.entries
            .get(name)
            .and_then(|list| {
                list.iter()
                    .max_by_key(|entry| entry.stamp)
                    .map(|entry| entry.cases.clone())
            })
            .unwrap_or_default()
    }
}

/// Builds and stores per-document symbol tables.
///
/// Rebuilds are synchronous and run to completion; the caller is responsible
/// for debouncing edits. A rebuild assembles the new table in a local vector
/// and swaps it in whole, so concurrent readers of the same document never
/// see a torn table.
#[derive(Debug, Default)]
pub struct SymbolAnalyzer {
    pub(crate) documents: DashMap<Url, DocumentState>,
    pub(crate) enums: EnumRegistry,
}

impl SymbolAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the symbol table of one document from its parsed top-level
    /// forms and raw text, replacing the previous table atomically.
    ///
    /// On an unrecoverable failure the table is replaced with an empty one
    /// rather than left stale or partial: no symbols over wrong symbols.
    pub fn update_document_symbols(&self, uri: &Url, exprs: Vec<Expr>, text: &str) {
        self.enums.clear_document(uri);
        let exprs: Arc<[Expr]> = exprs.into();
        let text: Arc<str> = Arc::from(text);
        let symbols = match self.build_symbols(uri, &exprs, &text) {
            Ok(symbols) => symbols,
            Err(err) => {
                tracing::error!(uri = %uri, error = %err, "symbol rebuild failed, clearing table");
                Vec::new()
            }
        };
        self.documents.insert(
            uri.clone(),
            DocumentState {
                exprs,
                text,
                symbols: Arc::new(symbols),
            },
        );
    }

    /// Ordered symbols of a document, declaration order preserved. Empty for
    /// unknown documents.
    pub fn document_symbols(&self, uri: &Url) -> Arc<Vec<Symbol>> {
        self.documents
            .get(uri)
            .map(|doc| doc.symbols.clone())
            .unwrap_or_default()
    }

    /// Raw text the document's table was last built from, for consumers
    /// that render source snippets alongside symbols.
    pub fn document_text(&self, uri: &Url) -> Option<Arc<str>> {
        self.documents.get(uri).map(|doc| doc.text.clone())
    }

    pub fn is_enum_type(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    /// Ordered case names of an enum type, empty when unknown.
    pub fn enum_cases(&self, name: &str) -> Vec<String> {
        self.enums.cases(name)
    }

    /// Declared or inferred type of parameter `param` of callable `function`
    /// in the given document.
    pub fn parameter_type(&self, function: &str, param: &str, uri: &Url) -> Option<String> {
        let doc = self.documents.get(uri)?;
        doc.symbols
            .iter()
            .filter(|sym| {
                matches!(
                    sym.kind,
                    SymbolKind::Function | SymbolKind::Method | SymbolKind::Macro
                )
            })
            .find(|sym| sym.name == function)?
            .data
            .params
            .as_ref()?
            .iter()
            .find(|p| p.name == param)
            .map(|p| p.ty.name().to_string())
    }

    /// Drop a document's table and source. Enum registrations made by the
    /// document are not retroactively removed; they are displaced on the
    /// next rebuild of a document defining the same enum name.
    pub fn remove_document(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Dispatch every top-level form to its handler and collect the new
    /// table. Forms that are not lists, are empty, or have an unrecognized
    /// or non-symbol head are skipped without error.
    fn build_symbols(&self, uri: &Url, exprs: &[Expr], text: &str) -> Result<Vec<Symbol>> {
        let mut symbols = Vec::new();
        let mut prev_end: Option<usize> = None;
        for expr in exprs {
            let span = expr.span();
            if span.end.offset > text.len() || span.start.offset > span.end.offset {
                bail!(
                    "expression span {}..{} exceeds document text ({} bytes)",
                    span.start.offset,
                    span.end.offset,
                    text.len()
                );
            }
            let doc_comment = docs::extract_docs(text, prev_end, span.start.offset);
            prev_end = Some(span.end.offset);

            let Some(items) = expr.as_list() else { continue };
            let Some(head) = items.first().and_then(Expr::as_symbol) else {
                continue;
            };
            match FormKind::classify(head) {
                FormKind::Fn | FormKind::Fx => {
                    self.handle_function(uri, items, span, doc_comment, SymbolKind::Function, &mut symbols);
                }
                FormKind::Let | FormKind::Var => {
                    self.handle_variable(uri, items, span, doc_comment, &mut symbols);
                }
                FormKind::Class => {
                    self.handle_container(uri, items, span, doc_comment, SymbolKind::Class, &mut symbols);
                }
                FormKind::Struct => {
                    self.handle_container(uri, items, span, doc_comment, SymbolKind::Struct, &mut symbols);
                }
                FormKind::Enum => {
                    self.handle_enum(uri, items, span, doc_comment, true, &mut symbols);
                }
                FormKind::DefMacro => {
                    self.handle_function(uri, items, span, doc_comment, SymbolKind::Macro, &mut symbols);
                }
                FormKind::Export => {
                    self.handle_export(uri, items, span, &mut symbols);
                }
                FormKind::Import => {
                    self.handle_import(uri, items, span, &mut symbols);
                }
                FormKind::Other => {
                    tracing::trace!(head, "unrecognized form skipped");
                }
            }
        }
        Ok(symbols)
    }
}
