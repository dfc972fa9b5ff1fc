//! Symbol Extraction
//!
//! Converts query captures into typed records: flattened selector entries,
//! definition records for mixins, functions and variables, and call sites.
//!
//! Extraction is defensive throughout. A capture whose expected structural
//! children are missing, or whose text is not valid utf-8, yields no record;
//! the rest of the file is still extracted.

use tree_sitter::{Node, Point, Tree};

use crate::scss::queries::{self, ScssQueries};

/// One rule set's effective selector after ancestor flattening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorEntry {
    /// Fully qualified selector path, e.g. `body .foo .bar`
    pub name: String,
    pub start: Point,
    pub end: Point,
}

/// A named declaration: mixin, function, or variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Bare identifier (`test_mixin_b`, `$color1`)
    pub name: String,
    /// Declared signature: name plus parameter list for mixins and
    /// functions, the full declaration text for variables
    pub body: String,
    pub start: Point,
    pub end: Point,
}

/// A mixin inclusion, function invocation, or variable use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub name: String,
    pub start: Point,
    pub end: Point,
}

/// Extract one entry per rule set, in pre-order, with ancestor-flattened
/// selector names.
pub fn selector_entries(tree: &Tree, source: &[u8], queries: &ScssQueries) -> Vec<SelectorEntry> {
    let mut entries = Vec::new();
    for rule_set in queries::capture_nodes(&queries.rule_sets, tree.root_node(), source) {
        let name = flatten_selector(rule_set, source, queries);
        entries.push(SelectorEntry {
            name,
            start: rule_set.start_position(),
            end: rule_set.end_position(),
        });
    }
    entries
}

/// Resolve a rule set's selector against its rule-set ancestors.
///
/// Starting from the rule set's own selector text, each rule-set ancestor is
/// folded in from the inside out. A parent reference (`&`) in the
/// accumulated name means "concatenate directly": every `&` is removed and
/// the ancestor's selector is prepended with no separating space. Without a
/// parent reference, the ancestor is prepended with a descendant-combinator
/// space. Each ancestor level is applied exactly once; an ancestor selector
/// that itself contains `&` is folded in as literal text at this level and
/// only participates in replacement when its own level is processed.
fn flatten_selector(rule_set: Node, source: &[u8], queries: &ScssQueries) -> String {
    let mut name = own_selector_text(rule_set, source, queries);

    let mut current = rule_set.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "rule_set" {
            let ancestor_selector = own_selector_text(ancestor, source, queries);
            if name.contains('&') {
                name = format!("{}{}", ancestor_selector, name.replace('&', ""));
            } else {
                name = format!("{} {}", ancestor_selector, name);
            }
        }
        current = ancestor.parent();
    }

    // Selectors may be written with interior line breaks
    name.replace('\n', "")
}

/// The literal text of a rule set's own selector list.
///
/// The first `selectors` capture inside the rule set is the rule set's own
/// list (pre-order puts it before any nested rule's list). Empty when the
/// rule set is malformed enough to have none.
fn own_selector_text(rule_set: Node, source: &[u8], queries: &ScssQueries) -> String {
    queries::first_capture(&queries.selectors, rule_set, source)
        .and_then(|node| node.utf8_text(source).ok())
        .map(|text| text.to_string())
        .unwrap_or_default()
}

/// Extract mixin definitions
pub fn mixin_definitions(tree: &Tree, source: &[u8], queries: &ScssQueries) -> Vec<Definition> {
    signature_definitions(&queries.mixin_statements, tree, source)
}

/// Extract function definitions
pub fn function_definitions(tree: &Tree, source: &[u8], queries: &ScssQueries) -> Vec<Definition> {
    signature_definitions(&queries.function_statements, tree, source)
}

/// Shared extraction for mixin and function statements.
///
/// The statement's first named child is its name, the second its parameter
/// list; the body is their concatenated text, which is exactly the
/// call-compatible signature. A statement missing either child (or whose
/// second child is already the block, i.e. declared without parentheses)
/// yields no record.
fn signature_definitions(
    query: &tree_sitter::Query,
    tree: &Tree,
    source: &[u8],
) -> Vec<Definition> {
    let mut definitions = Vec::new();
    for statement in queries::capture_nodes(query, tree.root_node(), source) {
        let (Some(name), Some(parameters)) = (statement.named_child(0), statement.named_child(1))
        else {
            continue;
        };
        if parameters.kind() == "block" {
            continue;
        }
        let (Ok(name_text), Ok(parameters_text)) =
            (name.utf8_text(source), parameters.utf8_text(source))
        else {
            continue;
        };

        definitions.push(Definition {
            name: name_text.to_string(),
            body: format!("{}{}", name_text, parameters_text),
            start: statement.start_position(),
            end: statement.end_position(),
        });
    }
    definitions
}

/// Extract variable definitions.
///
/// The declaration's first named child is the variable name; the body is
/// the full declaration text including the terminator.
pub fn variable_definitions(tree: &Tree, source: &[u8], queries: &ScssQueries) -> Vec<Definition> {
    let mut definitions = Vec::new();
    for declaration in
        queries::capture_nodes(&queries.variable_declarations, tree.root_node(), source)
    {
        let Some(name) = declaration.named_child(0) else {
            continue;
        };
        let (Ok(name_text), Ok(body_text)) = (name.utf8_text(source), declaration.utf8_text(source))
        else {
            continue;
        };

        definitions.push(Definition {
            name: name_text.to_string(),
            body: body_text.to_string(),
            start: declaration.start_position(),
            end: declaration.end_position(),
        });
    }
    definitions
}

/// Extract every call site: mixin inclusions, function invocations and
/// variable uses, merged into one sequence.
pub fn call_sites(tree: &Tree, source: &[u8], queries: &ScssQueries) -> Vec<CallSite> {
    let call_queries = [
        &queries.mixin_calls,
        &queries.function_calls,
        &queries.variable_references,
    ];

    let mut calls = Vec::new();
    for query in call_queries {
        for node in queries::capture_nodes(query, tree.root_node(), source) {
            let Ok(text) = node.utf8_text(source) else {
                continue;
            };
            calls.push(CallSite {
                name: text.to_string(),
                start: node.start_position(),
                end: node.end_position(),
            });
        }
    }
    calls
}
