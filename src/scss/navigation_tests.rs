//! Tests for go-to-definition and find-references

use std::path::Path;
use tower_lsp::lsp_types::Position;
use url::Url;

use crate::scss::navigation::ScssNavigationProvider;
use crate::scss::symbols::ScssSymbolProvider;
use crate::test_utils::workspace_with;

#[test]
fn test_definition_resolves_to_declaration() {
    let workspace = workspace_with(&[
        ("/defs.scss", "@mixin pad($size) { padding: $size; }"),
        ("/use.scss", ".a { @include pad; }"),
    ]);

    let locations = ScssNavigationProvider::new().definitions(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 15),
    );

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].uri, Url::from_file_path("/defs.scss").unwrap());
    assert_eq!(locations[0].range.start.line, 0);
    assert_eq!(locations[0].range.start.character, 0);
}

#[test]
fn test_definition_in_two_files_returns_two_locations() {
    let workspace = workspace_with(&[
        ("/a.scss", "$color: #000;"),
        ("/b.scss", "$color: #fff;"),
        ("/use.scss", ".a { color: $color; }"),
    ]);

    let locations = ScssNavigationProvider::new().definitions(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 13),
    );

    assert_eq!(locations.len(), 2);
    let mut uris: Vec<String> = locations.iter().map(|l| l.uri.to_string()).collect();
    uris.sort();
    assert_eq!(uris, vec!["file:///a.scss", "file:///b.scss"]);
}

#[test]
fn test_definition_without_match_is_empty() {
    let workspace = workspace_with(&[("/use.scss", ".a { color: $missing; }")]);
    let locations = ScssNavigationProvider::new().definitions(
        &workspace,
        Path::new("/use.scss"),
        Position::new(0, 13),
    );
    assert!(locations.is_empty());
}

#[test]
fn test_references_scan_call_sites_across_documents() {
    let workspace = workspace_with(&[
        ("/defs.scss", "$fg: #000;"),
        ("/a.scss", ".a { color: $fg; }"),
        ("/b.scss", ".b { color: $fg; border-color: $fg; }"),
    ]);

    // from the use in /a.scss
    let locations = ScssNavigationProvider::new().references(
        &workspace,
        Path::new("/a.scss"),
        Position::new(0, 13),
    );

    assert_eq!(locations.len(), 3);
    // the declaration site itself is never included
    assert!(locations
        .iter()
        .all(|l| l.uri != Url::from_file_path("/defs.scss").unwrap()));
}

#[test]
fn test_document_symbols_order_and_kinds() {
    use tower_lsp::lsp_types::SymbolKind;

    let workspace = workspace_with(&[(
        "/a.scss",
        "$gap: 4px;\n@mixin pad($s) { padding: $s; }\n@function double($n) { @return $n * 2; }\n.a { .b { color: red; } }",
    )]);

    let symbols = ScssSymbolProvider::new().document_symbols(&workspace, Path::new("/a.scss"));

    let kinds: Vec<SymbolKind> = symbols.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::INTERFACE,
            SymbolKind::VARIABLE,
            SymbolKind::FUNCTION,
            SymbolKind::CLASS,
            SymbolKind::CLASS,
        ]
    );

    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["pad", "$gap", "double", ".a", ".a .b"]);
}

#[test]
fn test_workspace_symbols_cover_all_documents() {
    let workspace = workspace_with(&[
        ("/a.scss", "$gap: 4px;"),
        ("/b.scss", "@mixin pad($s) { padding: $s; }"),
    ]);

    let symbols = ScssSymbolProvider::new().workspace_symbols(&workspace);
    let mut names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["$gap", "pad"]);
}
