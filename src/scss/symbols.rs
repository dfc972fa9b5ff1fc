//! Document and Workspace Outline
//!
//! Emits one symbol entry per mixin, variable, function, and flattened
//! selector, in that fixed order per document. The workspace listing
//! concatenates the per-document results in index order.

use std::path::Path;
use tower_lsp::lsp_types::{Location, SymbolInformation, SymbolKind};
use url::Url;

use crate::scss::document::ScssDocument;
use crate::scss::position::lsp_range;
use crate::scss::workspace::Workspace;

/// Provides document and workspace symbol listings
pub struct ScssSymbolProvider;

impl ScssSymbolProvider {
    /// Create a new symbol provider
    pub fn new() -> Self {
        Self
    }

    /// Outline for one document: mixins, variables, functions, selectors
    pub fn document_symbols(&self, workspace: &Workspace, path: &Path) -> Vec<SymbolInformation> {
        workspace
            .document(path)
            .map(|document| self.symbols_in_document(document))
            .unwrap_or_default()
    }

    /// Outline across every indexed document
    pub fn workspace_symbols(&self, workspace: &Workspace) -> Vec<SymbolInformation> {
        let mut symbols = Vec::new();
        for document in workspace.documents() {
            symbols.extend(self.symbols_in_document(document));
        }
        symbols
    }

    // SymbolInformation carries a deprecated `deprecated` field we have to
    // populate to construct the struct at all
    #[allow(deprecated)]
    fn symbols_in_document(&self, document: &ScssDocument) -> Vec<SymbolInformation> {
        let Ok(uri) = Url::from_file_path(document.path()) else {
            return Vec::new();
        };

        let entry = |name: &str, kind: SymbolKind, start, end| SymbolInformation {
            name: name.to_string(),
            kind,
            tags: None,
            deprecated: None,
            location: Location {
                uri: uri.clone(),
                range: lsp_range(start, end),
            },
            container_name: None,
        };

        let mut symbols = Vec::new();
        for mixin in document.mixins() {
            symbols.push(entry(&mixin.name, SymbolKind::INTERFACE, mixin.start, mixin.end));
        }
        for variable in document.variables() {
            symbols.push(entry(
                &variable.name,
                SymbolKind::VARIABLE,
                variable.start,
                variable.end,
            ));
        }
        for function in document.functions() {
            symbols.push(entry(
                &function.name,
                SymbolKind::FUNCTION,
                function.start,
                function.end,
            ));
        }
        for selector in document.selectors() {
            symbols.push(entry(
                &selector.name,
                SymbolKind::CLASS,
                selector.start,
                selector.end,
            ));
        }
        symbols
    }
}

impl Default for ScssSymbolProvider {
    fn default() -> Self {
        Self::new()
    }
}
