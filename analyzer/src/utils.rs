use lyra_core::Span;
use tower_lsp::lsp_types::{Location, Position, Range, Url};

/// Convert a 1-indexed core `Span` to a 0-indexed LSP `Range`.
pub fn span_to_range(span: Span) -> Range {
    Range {
        start: Position {
            line: span.start.line.saturating_sub(1),
            character: span.start.column.saturating_sub(1),
        },
        end: Position {
            line: span.end.line.saturating_sub(1),
            character: span.end.column.saturating_sub(1),
        },
    }
}

pub(crate) fn location(uri: &Url, span: Span) -> Location {
    Location::new(uri.clone(), span_to_range(span))
}
