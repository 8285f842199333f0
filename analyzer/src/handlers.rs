//! Definition handlers: one per form kind, all defensive. A form that does
//! not match its expected shape produces no symbol and no error, so the rest
//! of the document still gets analyzed.

use lyra_core::{Atom, Expr, Span};
use tower_lsp::lsp_types::Url;

use crate::infer::{self, TypeHint};
use crate::symbols::{ParameterDescriptor, Symbol, SymbolKind};
use crate::table::SymbolAnalyzer;
use crate::utils::location;

impl SymbolAnalyzer {
    /// `(fn name (params...) [(-> Type)] body...)` and the `fx` / `defmacro`
    /// variants. Requires at least a name and a parameter list.
    pub(crate) fn handle_function(
        &self,
        uri: &Url,
        items: &[Expr],
        span: Span,
        doc: String,
        kind: SymbolKind,
        out: &mut Vec<Symbol>,
    ) {
        if let Some(sym) = Self::function_symbol(uri, items, span, doc, kind, None) {
            out.push(sym);
        }
    }

    fn function_symbol(
        uri: &Url,
        items: &[Expr],
        span: Span,
        doc: String,
        kind: SymbolKind,
        container: Option<&str>,
    ) -> Option<Symbol> {
        let name = items.get(1)?.as_symbol()?;
        let param_list = items.get(2)?.as_list()?;
        let params = Self::parse_params(param_list);
        let return_type = items
            .get(3..)
            .unwrap_or(&[])
            .iter()
            .find_map(Self::return_type_of)
            .unwrap_or(TypeHint::Any);

        let qualified = match container {
            Some(container) => format!("{container}.{name}"),
            None => name.to_string(),
        };
        let mut sym = Symbol::new(qualified, kind, location(uri, span));
        sym.data.documentation = doc;
        sym.data.params = Some(params);
        sym.data.return_type = Some(return_type);
        Some(sym)
    }

    /// A `(-> Type)` sub-form, when `expr` is one.
    fn return_type_of(expr: &Expr) -> Option<TypeHint> {
        let items = expr.as_list()?;
        if items.first()?.as_symbol()? != "->" {
            return None;
        }
        items.get(1)?.as_symbol().map(TypeHint::named)
    }

    /// Parameter-list grammar, scanned left to right: a bare symbol is a
    /// parameter name; `name : Type` attaches a type; `name = value` (after
    /// an optional type) attaches a serialized default; a lone `&` is the
    /// variadic marker and is skipped.
    pub(crate) fn parse_params(items: &[Expr]) -> Vec<ParameterDescriptor> {
        let mut params = Vec::new();
        let mut i = 0;
        while i < items.len() {
            let Some(name) = items[i].as_symbol() else {
                i += 1;
                continue;
            };
            if matches!(name, "&" | ":" | "=") {
                i += 1;
                continue;
            }
            let mut param = ParameterDescriptor::new(name);
            i += 1;
            if items.get(i).is_some_and(|e| e.is_symbol(":")) {
                if let Some(ty) = items.get(i + 1).and_then(Expr::as_symbol) {
                    param.ty = TypeHint::named(ty);
                    i += 2;
                }
            }
            if items.get(i).is_some_and(|e| e.is_symbol("=")) {
                if let Some(value) = items.get(i + 1) {
                    param.default_value = Some(value.to_string());
                    i += 2;
                }
            }
            params.push(param);
        }
        params
    }

    /// `(let name value)` or `(let (n1 v1 n2 v2 ...) body...)`, and `var`.
    /// Forms with fewer than three elements are malformed and skipped.
    pub(crate) fn handle_variable(
        &self,
        uri: &Url,
        items: &[Expr],
        span: Span,
        doc: String,
        out: &mut Vec<Symbol>,
    ) {
        if items.len() < 3 {
            return;
        }
        match &items[1] {
            Expr::Atom(Atom::Symbol(name), _) => {
                out.push(Self::variable_symbol(uri, name, span, doc, Some(&items[2]), None));
            }
            Expr::List(bindings, _) => {
                // Pairs scanned two at a time; an odd trailing name with no
                // paired value is dropped.
                let mut i = 0;
                while i + 1 < bindings.len() {
                    if let Some(name) = bindings[i].as_symbol() {
                        out.push(Self::variable_symbol(
                            uri,
                            name,
                            span,
                            doc.clone(),
                            Some(&bindings[i + 1]),
                            None,
                        ));
                    }
                    i += 2;
                }
            }
            _ => {}
        }
    }

    fn variable_symbol(
        uri: &Url,
        name: &str,
        span: Span,
        doc: String,
        init: Option<&Expr>,
        container: Option<&str>,
    ) -> Symbol {
        let qualified = match container {
            Some(container) => format!("{container}.{name}"),
            None => name.to_string(),
        };
        let mut sym = Symbol::new(qualified, SymbolKind::Variable, location(uri, span));
        sym.data.documentation = doc;
        sym.data.ty = Some(init.map(infer::infer_type).unwrap_or(TypeHint::Any));
        sym
    }

    /// `(class Name members...)` / `(struct Name members...)`. Emits the
    /// container symbol, then one qualified symbol per recognized member:
    /// fields (`let`/`var`), methods (`fn`/`fx`/`method`), and the
    /// constructor (`constructor` for classes, `init` for structs). Members
    /// of any other shape are skipped; class bodies are not required to be
    /// exhaustively well-formed.
    pub(crate) fn handle_container(
        &self,
        uri: &Url,
        items: &[Expr],
        span: Span,
        doc: String,
        kind: SymbolKind,
        out: &mut Vec<Symbol>,
    ) {
        let Some(name) = items.get(1).and_then(Expr::as_symbol) else {
            return;
        };
        let mut container = Symbol::new(name, kind, location(uri, span));
        container.data.documentation = doc;
        out.push(container);

        let ctor_head = if kind == SymbolKind::Class { "constructor" } else { "init" };
        for member in items.get(2..).unwrap_or(&[]) {
            let Some(mitems) = member.as_list() else { continue };
            let Some(mhead) = mitems.first().and_then(Expr::as_symbol) else {
                continue;
            };
            let mspan = member.span();
            match mhead {
                "let" | "var" => {
                    if let Some(field) = mitems.get(1).and_then(Expr::as_symbol) {
                        out.push(Self::variable_symbol(
                            uri,
                            field,
                            mspan,
                            String::new(),
                            mitems.get(2),
                            Some(name),
                        ));
                    }
                }
                "fn" | "fx" | "method" => {
                    if let Some(sym) = Self::function_symbol(
                        uri,
                        mitems,
                        mspan,
                        String::new(),
                        SymbolKind::Method,
                        Some(name),
                    ) {
                        out.push(sym);
                    }
                }
                head if head == ctor_head => {
                    // (constructor (params) body...) — no return type.
                    if let Some(param_list) = mitems.get(1).and_then(Expr::as_list) {
                        let mut sym = Symbol::new(
                            format!("{name}.constructor"),
                            SymbolKind::Method,
                            location(uri, mspan),
                        );
                        sym.data.params = Some(Self::parse_params(param_list));
                        out.push(sym);
                    }
                }
                _ => {}
            }
        }
    }

    /// `(enum Name (case CaseName [rawValueOrType])...)`. Emits the type
    /// symbol, one `EnumMember` per valid case, and registers the ordered
    /// case list when at least one case was found. `register` is false when
    /// re-deriving another module's exports, so an import walk does not bump
    /// registry recency.
    pub(crate) fn handle_enum(
        &self,
        uri: &Url,
        items: &[Expr],
        span: Span,
        doc: String,
        register: bool,
        out: &mut Vec<Symbol>,
    ) {
        let Some(name) = items.get(1).and_then(Expr::as_symbol) else {
            return;
        };
        let mut container = Symbol::new(name, SymbolKind::Enum, location(uri, span));
        container.data.documentation = doc;
        out.push(container);

        let mut cases: Vec<String> = Vec::new();
        for member in items.get(2..).unwrap_or(&[]) {
            let Some(mitems) = member.as_list() else { continue };
            if mitems.first().and_then(Expr::as_symbol) != Some("case") {
                continue;
            }
            let Some(case_name) = mitems.get(1).and_then(Expr::as_symbol) else {
                continue;
            };
            let mut sym = Symbol::new(
                format!("{name}.{case_name}"),
                SymbolKind::EnumMember,
                location(uri, member.span()),
            );
            sym.data.enum_name = Some(name.to_string());
            if let Some(raw) = mitems.get(2) {
                sym.data.ty = Some(TypeHint::named(raw.to_string()));
            }
            out.push(sym);
            cases.push(case_name.to_string());
        }

        if register && !cases.is_empty() {
            self.enums.register(uri, name, cases);
        }
    }
}
