use std::fmt;

use serde::Serialize;

/// A 1-indexed source position with its absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

/// Half-open source region covered by one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn single(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }
}

/// Atomic values produced by the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Atom {
    Symbol(String),
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

/// A parsed Lyra expression: an atom or a parenthesized list.
///
/// Produced by the tolerant reader upstream and borrowed read-only by the
/// analyzer; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Atom(Atom, Span),
    List(Vec<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Atom(_, span) | Expr::List(_, span) => *span,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Atom(Atom::Symbol(name), _) => Some(name),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Expr::Atom(Atom::Str(value), _) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items, _) => Some(items),
            _ => None,
        }
    }

    /// First element of a list, when it is a symbol.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()?.first()?.as_symbol()
    }

    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => f.write_str(name),
            Atom::Number(n) => {
                // Integral values print without a fractional part.
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    f.write_str(itoa::Buffer::new().format(*n as i64))
                } else {
                    f.write_str(ryu::Buffer::new().format(*n))
                }
            }
            Atom::Str(value) => {
                f.write_str("\"")?;
                for ch in value.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        _ => write!(f, "{ch}")?,
                    }
                }
                f.write_str("\"")
            }
            Atom::Bool(true) => f.write_str("true"),
            Atom::Bool(false) => f.write_str("false"),
            Atom::Nil => f.write_str("nil"),
        }
    }
}

/// Best-effort serialization back to source text. Total: any expression the
/// reader can produce has a printable form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(atom, _) => write!(f, "{atom}"),
            Expr::List(items, _) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
