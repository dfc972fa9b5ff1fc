//! Test utilities shared across the codebase

use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::scss::parser::ScssParser;
use crate::scss::workspace::Workspace;

/// Build a parser, panicking on grammar setup failure
pub fn test_parser() -> ScssParser {
    ScssParser::new().expect("Failed to create SCSS parser")
}

/// Build a workspace from in-memory files.
///
/// Paths should be absolute (e.g. `/a.scss`) so location URIs can be
/// derived from them in tests.
pub fn workspace_with(files: &[(&str, &str)]) -> Workspace {
    let mut parser = test_parser();
    let mut workspace = Workspace::new(PathBuf::from("/"), &ServerConfig::default());
    for (path, source) in files {
        workspace.index_document(PathBuf::from(path), source.to_string(), &mut parser);
    }
    workspace
}
