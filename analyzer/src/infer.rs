use std::fmt;

use lyra_core::util::fast_map::FastHashSet;
use lyra_core::{Atom, Expr};
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

/// Outcome of best-effort type inference.
///
/// `Any` is the sentinel for "nothing could be inferred" and is distinct
/// from an annotation that literally names `Any`, which comes through as
/// `Named("Any")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    Named(String),
    Any,
}

impl TypeHint {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            TypeHint::Named(name) => name,
            TypeHint::Any => "Any",
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TypeHint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

static PRIMITIVE_TYPES: Lazy<FastHashSet<&'static str>> = Lazy::new(|| {
    ["Int", "Float", "Bool", "String", "Nil", "Void", "Any"]
        .into_iter()
        .collect()
});

static CONTAINER_TYPES: Lazy<FastHashSet<&'static str>> = Lazy::new(|| {
    ["List", "Map", "Set", "Vector", "Pair", "Optional"]
        .into_iter()
        .collect()
});

/// Best-effort, total type inference over one expression.
///
/// Never fails; anything unrecognized comes back as [`TypeHint::Any`]. The
/// result is advisory and never validated against use sites.
pub fn infer_type(expr: &Expr) -> TypeHint {
    match expr {
        Expr::Atom(Atom::Number(n), _) => {
            if n.fract() == 0.0 && n.is_finite() {
                TypeHint::named("Int")
            } else {
                TypeHint::named("Float")
            }
        }
        Expr::Atom(Atom::Bool(_), _) => TypeHint::named("Bool"),
        Expr::Atom(Atom::Str(_), _) => TypeHint::named("String"),
        Expr::Atom(Atom::Symbol(name), _) => {
            let looks_like_type = name.chars().next().is_some_and(char::is_uppercase)
                || PRIMITIVE_TYPES.contains(name.as_str());
            if looks_like_type {
                TypeHint::named(name)
            } else {
                TypeHint::Any
            }
        }
        Expr::Atom(Atom::Nil, _) => TypeHint::Any,
        Expr::List(items, _) => match items.first().and_then(Expr::as_symbol) {
            Some("->") => items
                .get(1)
                .and_then(Expr::as_symbol)
                .map(TypeHint::named)
                .unwrap_or(TypeHint::Any),
            Some(head) if CONTAINER_TYPES.contains(head) => TypeHint::named(head),
            _ => TypeHint::Any,
        },
    }
}
