pub mod expr;
pub mod util;

pub use expr::{Atom, Expr, Position, Span};

#[cfg(test)]
mod expr_test;
