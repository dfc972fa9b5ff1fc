//! Tests for completion candidates

use std::path::Path;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Position};

use crate::scss::completion::ScssCompletionProvider;
use crate::test_utils::workspace_with;

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

#[test]
fn test_at_trigger_offers_mixins_and_functions() {
    let workspace = workspace_with(&[
        ("/defs.scss", "@mixin pad($s) { padding: $s; }\n@function double($n) { @return $n * 2; }"),
        ("/use.scss", ".a { color: red; }\n"),
    ]);

    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(1, 0),
        Some("@"),
    );

    assert!(!is_incomplete);
    let labels = labels(&items);
    assert!(labels.contains(&"pad"));
    assert!(labels.contains(&"double"));

    let mixin = items.iter().find(|item| item.label == "pad").unwrap();
    assert_eq!(mixin.kind, Some(CompletionItemKind::INTERFACE));
    assert_eq!(mixin.insert_text.as_deref(), Some("include pad"));
    let function = items.iter().find(|item| item.label == "double").unwrap();
    assert_eq!(function.insert_text.as_deref(), Some("double"));
}

#[test]
fn test_mixin_documentation_contains_body_and_path() {
    use tower_lsp::lsp_types::Documentation;

    let workspace = workspace_with(&[
        ("/defs.scss", "@mixin pad($s) { padding: $s; }"),
        ("/use.scss", ".a { color: red; }\n"),
    ]);

    let (items, _) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(1, 0),
        Some("@"),
    );

    let mixin = items.iter().find(|item| item.label == "pad").unwrap();
    let Some(Documentation::String(doc)) = &mixin.documentation else {
        panic!("expected string documentation");
    };
    assert!(doc.contains("pad($s)"));
    assert!(doc.contains("/defs.scss"));
}

#[test]
fn test_variable_prefix_filter() {
    let workspace = workspace_with(&[
        ("/defs.scss", "$primary-color: #000;\n$secondary-color: #111;\n$gap: 4px;"),
        ("/use.scss", ".a { color: $prim }"),
    ]);

    // cursor right after `$prim`
    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 17),
        None,
    );

    assert!(is_incomplete);
    assert_eq!(labels(&items), vec!["$primary-color"]);
}

#[test]
fn test_variable_filter_is_substring_not_anchored() {
    let workspace = workspace_with(&[
        ("/defs.scss", "$primary-color: #000;\n$discolored: #111;"),
        ("/use.scss", ".a { width: colo }"),
    ]);

    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 16),
        None,
    );

    assert!(is_incomplete);
    let mut found = labels(&items);
    found.sort();
    assert_eq!(found, vec!["$discolored", "$primary-color"]);
}

#[test]
fn test_short_prefix_offers_no_variables() {
    let workspace = workspace_with(&[
        ("/defs.scss", "$primary-color: #000;"),
        ("/use.scss", ".a { color: $pr }"),
    ]);

    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 15),
        None,
    );

    assert!(!is_incomplete);
    assert!(items.is_empty());
}

#[test]
fn test_trigger_and_prefix_sources_combine() {
    let workspace = workspace_with(&[
        ("/defs.scss", "@mixin padder($s) { padding: $s; }\n$padding-base: 4px;"),
        ("/use.scss", ".a { color: $padd }"),
    ]);

    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 17),
        Some("@"),
    );

    assert!(is_incomplete);
    let found = labels(&items);
    assert!(found.contains(&"padder"));
    assert!(found.contains(&"$padding-base"));
}

#[test]
fn test_unknown_document_yields_nothing() {
    let workspace = workspace_with(&[("/defs.scss", "@mixin pad($s) { padding: $s; }")]);
    let (items, is_incomplete) = ScssCompletionProvider::new().complete(
        &workspace,
        Path::new("/nope.scss"),
        Position::new(0, 0),
        Some("@"),
    );
    assert!(items.is_empty());
    assert!(!is_incomplete);
}
