//! Position conversions between tree-sitter points and LSP types

use tower_lsp::lsp_types::{Position, Range};
use tree_sitter::Point;

/// Convert a tree-sitter point to an LSP position
pub(crate) fn lsp_position(point: Point) -> Position {
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

/// Convert a start/end point pair to an LSP range
pub(crate) fn lsp_range(start: Point, end: Point) -> Range {
    Range {
        start: lsp_position(start),
        end: lsp_position(end),
    }
}

/// Convert an LSP position to a tree-sitter point
pub(crate) fn tree_point(position: Position) -> Point {
    Point {
        row: position.line as usize,
        column: position.character as usize,
    }
}
