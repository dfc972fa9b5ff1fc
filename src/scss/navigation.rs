//! Go-to-definition and Find-references
//!
//! Definition resolves the token under the cursor to every matching
//! declaration in the workspace. References resolves it to every call site;
//! the declaration itself is never part of the reference list.

use std::path::Path;
use tower_lsp::lsp_types::{Location, Position};
use url::Url;

use crate::scss::position::{lsp_range, tree_point};
use crate::scss::workspace::Workspace;

/// Provides definition and reference locations
pub struct ScssNavigationProvider;

impl ScssNavigationProvider {
    /// Create a new navigation provider
    pub fn new() -> Self {
        Self
    }

    /// Every definition location for the symbol at the position.
    ///
    /// A name declared in two files yields two locations.
    pub fn definitions(
        &self,
        workspace: &Workspace,
        path: &Path,
        position: Position,
    ) -> Vec<Location> {
        let Some(word) = self.word_at(workspace, path, position) else {
            return Vec::new();
        };

        workspace
            .lookup_by_name(&word)
            .iter()
            .filter_map(|entry| {
                let uri = Url::from_file_path(entry.path).ok()?;
                Some(Location {
                    uri,
                    range: lsp_range(entry.definition.start, entry.definition.end),
                })
            })
            .collect()
    }

    /// Every call site of the symbol at the position, across all documents
    pub fn references(
        &self,
        workspace: &Workspace,
        path: &Path,
        position: Position,
    ) -> Vec<Location> {
        let Some(word) = self.word_at(workspace, path, position) else {
            return Vec::new();
        };

        let mut locations = Vec::new();
        for document in workspace.documents() {
            let Ok(uri) = Url::from_file_path(document.path()) else {
                continue;
            };
            for call in document.calls() {
                if call.name == word {
                    locations.push(Location {
                        uri: uri.clone(),
                        range: lsp_range(call.start, call.end),
                    });
                }
            }
        }
        locations
    }

    fn word_at(&self, workspace: &Workspace, path: &Path, position: Position) -> Option<String> {
        workspace.document(path)?.token_at(tree_point(position))
    }
}

impl Default for ScssNavigationProvider {
    fn default() -> Self {
        Self::new()
    }
}
