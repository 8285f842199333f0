//! Symbol table construction for Lyra documents.
//!
//! Consumes the pre-parsed expression stream of one document plus its raw
//! text, and derives the ordered set of named entities (functions, variables,
//! classes, enums and their cases, macros, imports, exports) that completion,
//! hover and navigation query. Each rebuild is a full rebuild: the new table
//! is assembled locally and swapped in whole, so readers never observe a
//! partially built table.

pub mod docs;
pub mod forms;
mod handlers;
pub mod infer;
mod linkage;
pub mod symbols;
pub mod table;
mod utils;

#[cfg(test)]
mod testutil;


pub use infer::{infer_type, TypeHint};
pub use symbols::{ParameterDescriptor, Symbol, SymbolData, SymbolKind};
pub use table::SymbolAnalyzer;
pub use utils::span_to_range;
