//! Module linkage: export and import statements, plus the cross-module
//! cloning routine that resolves imports against another open document.
//!
//! The exported set of a module is re-derived on every import edge — there
//! is no memoized per-module summary, so diamond imports each walk the
//! target independently.

use lyra_core::util::fast_map::FastHashSet;
use lyra_core::{Atom, Expr, Span};
use tower_lsp::lsp_types::Url;

use crate::forms::FormKind;
use crate::symbols::{Symbol, SymbolKind};
use crate::table::SymbolAnalyzer;
use crate::utils::location;

impl SymbolAnalyzer {
    /// `(export [a, b as c, ...])`, `(export (fn ...))` wrapping a
    /// definition, or the legacy `(export "name" value)` string form. Forms
    /// with fewer than two elements are skipped.
    pub(crate) fn handle_export(&self, uri: &Url, items: &[Expr], span: Span, out: &mut Vec<Symbol>) {
        if items.len() < 2 {
            return;
        }
        match &items[1] {
            Expr::List(inner, _) => {
                let wrapped_definition = inner
                    .first()
                    .and_then(Expr::as_symbol)
                    .is_some_and(|head| FormKind::classify(head).is_definition());
                if wrapped_definition {
                    // (export (fn util ...)): the wrapped definition is
                    // processed as usual and everything it emits is exported.
                    let start = out.len();
                    self.classify_definition(uri, &items[1], true, out);
                    for sym in &mut out[start..] {
                        sym.data.exported = true;
                    }
                } else {
                    self.export_names(uri, inner, span, out);
                }
            }
            Expr::Atom(Atom::Str(name), _) => {
                // Legacy (export "name" value) form.
                if items.len() >= 3 {
                    let mut sym = Symbol::new(name.as_str(), SymbolKind::Variable, location(uri, span));
                    sym.data.exported = true;
                    out.push(sym);
                }
            }
            _ => {}
        }
    }

    /// The `[a, b as c, ...]` export list: bare names flag (or placeholder)
    /// the named symbol; `original as alias` additionally creates an alias
    /// symbol carrying `original_name`.
    fn export_names(&self, uri: &Url, names: &[Expr], span: Span, out: &mut Vec<Symbol>) {
        let mut i = 0;
        while i < names.len() {
            let Some(name) = names[i].as_symbol() else {
                i += 1;
                continue;
            };
            let alias = names
                .get(i + 1)
                .is_some_and(|e| e.is_symbol("as"))
                .then(|| names.get(i + 2).and_then(Expr::as_symbol))
                .flatten();
            if let Some(alias) = alias {
                let kind = out
                    .iter()
                    .find(|sym| sym.name == name)
                    .map(|sym| sym.kind)
                    .unwrap_or(SymbolKind::Variable);
                Self::mark_exported(out, name);
                let mut sym = Symbol::new(alias, kind, location(uri, span));
                sym.data.original_name = Some(name.to_string());
                sym.data.exported = true;
                out.push(sym);
                i += 3;
            } else {
                if !Self::mark_exported(out, name) {
                    let mut sym = Symbol::new(name, SymbolKind::Variable, location(uri, span));
                    sym.data.exported = true;
                    out.push(sym);
                }
                i += 1;
            }
        }
    }

    fn mark_exported(out: &mut [Symbol], name: &str) -> bool {
        let mut found = false;
        for sym in out.iter_mut().filter(|sym| sym.name == name) {
            sym.data.exported = true;
            found = true;
        }
        found
    }

    /// `(import ns from "path")` or `(import [a, b as c] from "path")`. A
    /// missing `from "path"` suffix skips the whole form.
    pub(crate) fn handle_import(&self, uri: &Url, items: &[Expr], span: Span, out: &mut Vec<Symbol>) {
        let Some(path) = Self::import_path(items) else {
            tracing::debug!(uri = %uri, "import without a `from \"path\"` suffix skipped");
            return;
        };
        match items.get(1) {
            Some(Expr::List(names, _)) => self.selective_import(uri, names, &path, span, out),
            Some(Expr::Atom(Atom::Symbol(ns), _)) if ns != "from" => {
                self.namespace_import(uri, ns, &path, span, out);
            }
            _ => {}
        }
    }

    /// The string path following a literal `from` symbol, anywhere in the form.
    fn import_path(items: &[Expr]) -> Option<String> {
        items.windows(2).find_map(|pair| {
            pair[0]
                .is_symbol("from")
                .then(|| pair[1].as_string().map(str::to_string))
                .flatten()
        })
    }

    /// Namespace import: emits the `Namespace` symbol, then clones every
    /// exported symbol of the target module, renamed `"ns.originalName"`.
    fn namespace_import(&self, uri: &Url, ns: &str, path: &str, span: Span, out: &mut Vec<Symbol>) {
        let mut sym = Symbol::new(ns, SymbolKind::Namespace, location(uri, span));
        sym.data.source_module = Some(path.to_string());
        sym.data.imported = true;
        sym.data.namespace_import = true;
        out.push(sym);

        for exported in self.exported_symbols(uri, path) {
            let mut clone = exported;
            clone.data.original_name = Some(clone.name.clone());
            clone.name = format!("{ns}.{}", clone.name);
            clone.data.source_module = Some(path.to_string());
            clone.data.imported = true;
            clone.data.exported = false;
            out.push(clone);
        }
    }

    /// Selective import: a placeholder Variable symbol per requested name,
    /// corrected in place when the export resolves. An export the target
    /// does not provide leaves the placeholder untouched — silently, by
    /// design.
    fn selective_import(&self, uri: &Url, names: &[Expr], path: &str, span: Span, out: &mut Vec<Symbol>) {
        let exported = self.exported_symbols(uri, path);
        let mut i = 0;
        while i < names.len() {
            let Some(original) = names[i].as_symbol() else {
                i += 1;
                continue;
            };
            let alias = names
                .get(i + 1)
                .is_some_and(|e| e.is_symbol("as"))
                .then(|| names.get(i + 2).and_then(Expr::as_symbol))
                .flatten();
            let local_name = alias.unwrap_or(original);

            let mut sym = Symbol::new(local_name, SymbolKind::Variable, location(uri, span));
            sym.data.imported = true;
            sym.data.source_module = Some(path.to_string());
            if alias.is_some() {
                sym.data.original_name = Some(original.to_string());
            }
            match exported.iter().find(|s| s.name == original) {
                Some(resolved) => {
                    sym.kind = resolved.kind;
                    sym.location = resolved.location.clone();
                    sym.data.documentation = resolved.data.documentation.clone();
                    sym.data.params = resolved.data.params.clone();
                    sym.data.return_type = resolved.data.return_type.clone();
                    sym.data.ty = resolved.data.ty.clone();
                    sym.data.enum_name = resolved.data.enum_name.clone();
                }
                None => {
                    tracing::debug!(
                        name = original,
                        module = path,
                        "selective import did not resolve, leaving placeholder"
                    );
                }
            }
            out.push(sym);
            i += if alias.is_some() { 3 } else { 1 };
        }
    }

    /// The exported symbols of the module at `path`: symbols flagged
    /// `exported` in its built table, plus symbols re-derived from top-level
    /// forms wrapped in `export`/`public`, deduplicated by name.
    pub(crate) fn exported_symbols(&self, importer: &Url, path: &str) -> Vec<Symbol> {
        let Some(target) = self.resolve_module(importer, path) else {
            tracing::debug!(module = path, "module path did not resolve to an open document");
            return Vec::new();
        };
        let Some(doc) = self.documents.get(&target) else {
            return Vec::new();
        };

        let mut seen: FastHashSet<String> = FastHashSet::default();
        let mut result: Vec<Symbol> = Vec::new();
        for sym in doc.symbols.iter().filter(|sym| sym.data.exported) {
            if seen.insert(sym.name.clone()) {
                result.push(sym.clone());
            }
        }

        let exprs = doc.exprs.clone();
        drop(doc);
        for expr in exprs.iter() {
            let Some(items) = expr.as_list() else { continue };
            let head = items.first().and_then(Expr::as_symbol);
            if !matches!(head, Some("export" | "public")) {
                continue;
            }
            let Some(inner) = items.get(1) else { continue };
            let mut derived = Vec::new();
            self.classify_definition(&target, inner, false, &mut derived);
            for mut sym in derived {
                sym.data.exported = true;
                if seen.insert(sym.name.clone()) {
                    result.push(sym);
                }
            }
        }
        result
    }

    /// Apply the definition handlers to a single form, used for definitions
    /// wrapped in `export` and for re-deriving another module's exports.
    /// `register` gates enum-registry writes.
    pub(crate) fn classify_definition(
        &self,
        uri: &Url,
        expr: &Expr,
        register: bool,
        out: &mut Vec<Symbol>,
    ) {
        let Some(items) = expr.as_list() else { return };
        let Some(head) = items.first().and_then(Expr::as_symbol) else {
            return;
        };
        let span = expr.span();
        match FormKind::classify(head) {
            FormKind::Fn | FormKind::Fx => {
                self.handle_function(uri, items, span, String::new(), SymbolKind::Function, out);
            }
            FormKind::Let | FormKind::Var => {
                self.handle_variable(uri, items, span, String::new(), out);
            }
            FormKind::Class => {
                self.handle_container(uri, items, span, String::new(), SymbolKind::Class, out);
            }
            FormKind::Struct => {
                self.handle_container(uri, items, span, String::new(), SymbolKind::Struct, out);
            }
            FormKind::Enum => {
                self.handle_enum(uri, items, span, String::new(), register, out);
            }
            FormKind::DefMacro => {
                self.handle_function(uri, items, span, String::new(), SymbolKind::Macro, out);
            }
            FormKind::Export | FormKind::Import | FormKind::Other => {}
        }
    }

    /// Resolve a module path to an already-open document: exact URI, exact
    /// or suffix path match, the same with a `.lyr` extension appended when
    /// the path has none, or a bare file-stem match. The importing document
    /// itself never matches.
    fn resolve_module(&self, importer: &Url, path: &str) -> Option<Url> {
        let bare = std::path::Path::new(path).extension().is_none();
        let with_ext = format!("{path}.lyr");
        for entry in self.documents.iter() {
            let uri = entry.key();
            if uri == importer {
                continue;
            }
            if uri.as_str() == path {
                return Some(uri.clone());
            }
            let doc_path = uri.path();
            if Self::suffix_match(doc_path, path)
                || (bare && Self::suffix_match(doc_path, &with_ext))
                || (bare
                    && std::path::Path::new(doc_path)
                        .file_stem()
                        .is_some_and(|stem| stem == path))
            {
                return Some(uri.clone());
            }
        }
        None
    }

    fn suffix_match(doc_path: &str, wanted: &str) -> bool {
        doc_path == wanted || doc_path.ends_with(&format!("/{wanted}"))
    }
}
