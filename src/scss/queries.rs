//! Structural Pattern Queries
//!
//! The fixed set of tree-sitter queries the symbol extractor runs against a
//! parsed stylesheet. Each query captures nodes of exactly one entity kind.
//! All patterns are compiled once when the parser is constructed; a pattern
//! that fails to compile against the grammar is a startup error.

use tree_sitter::{Language, Node, Query, QueryCursor, QueryError};

/// Compiled structural queries for the scss grammar
pub struct ScssQueries {
    /// Every rule set, used for selector flattening
    pub rule_sets: Query,
    /// The selector list inside a rule set
    pub selectors: Query,
    /// Variable declarations (`$name: value;`)
    pub variable_declarations: Query,
    /// Mixin declarations (`@mixin name(...) { ... }`)
    pub mixin_statements: Query,
    /// Function declarations (`@function name(...) { ... }`)
    pub function_statements: Query,
    /// Mixin inclusions (`@include name;`)
    pub mixin_calls: Query,
    /// Function invocations (`name(...)` in a value)
    pub function_calls: Query,
    /// Variable uses (`$name` in a value)
    pub variable_references: Query,
}

impl ScssQueries {
    /// Compile the query set against the given grammar
    pub fn new(language: Language) -> Result<Self, QueryError> {
        Ok(Self {
            rule_sets: Query::new(&language, "(rule_set) @rule")?,
            selectors: Query::new(&language, "(rule_set (selectors) @selectors)")?,
            variable_declarations: Query::new(&language, "(declaration (variable_name)) @declaration")?,
            mixin_statements: Query::new(&language, "(mixin_statement) @mixin")?,
            function_statements: Query::new(&language, "(function_statement) @function")?,
            mixin_calls: Query::new(&language, "(include_statement (identifier) @name)")?,
            function_calls: Query::new(&language, "(call_expression (function_name) @name)")?,
            variable_references: Query::new(&language, "(variable_value) @name")?,
        })
    }
}

/// Run a query over the subtree rooted at `node` and collect every capture
/// node in match order (pre-order for single-pattern queries).
pub fn capture_nodes<'tree>(query: &Query, node: Node<'tree>, source: &[u8]) -> Vec<Node<'tree>> {
    let mut cursor = QueryCursor::new();
    let mut nodes = Vec::new();
    for query_match in cursor.matches(query, node, source) {
        for capture in query_match.captures {
            nodes.push(capture.node);
        }
    }
    nodes
}

/// Run a query over the subtree rooted at `node` and return the first
/// capture node, if any.
pub fn first_capture<'tree>(query: &Query, node: Node<'tree>, source: &[u8]) -> Option<Node<'tree>> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, node, source);
    matches
        .next()
        .and_then(|query_match| query_match.captures.first().map(|capture| capture.node))
}
