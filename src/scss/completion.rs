//! SCSS Completion Provider
//!
//! Two independent candidate sources, combined when both apply:
//! - the `@` trigger offers every mixin and function in the workspace,
//!   unfiltered, with an `include` directive prepended for mixins;
//! - a word prefix longer than two characters (after the leading sigil is
//!   stripped) offers every variable whose name contains it.
//!
//! The result is marked incomplete whenever the prefix filter was applied,
//! so the client re-requests as the user keeps typing.

use std::path::Path;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation, Position};

use crate::scss::document::ScssDocument;
use crate::scss::workspace::Workspace;

/// Minimum prefix length (after sigil stripping) for variable filtering
const MIN_PREFIX_LEN: usize = 3;

/// SCSS completion provider
pub struct ScssCompletionProvider;

impl ScssCompletionProvider {
    /// Create a new completion provider
    pub fn new() -> Self {
        Self
    }

    /// Completion candidates at the given position.
    ///
    /// Returns the items plus the is-incomplete marker.
    pub fn complete(
        &self,
        workspace: &Workspace,
        path: &Path,
        position: Position,
        trigger_character: Option<&str>,
    ) -> (Vec<CompletionItem>, bool) {
        let Some(document) = workspace.document(path) else {
            return (Vec::new(), false);
        };

        // The word left of the cursor; the character just typed is at
        // column - 1. Out of range simply means there is no prefix yet.
        let prefix = if position.character > 0 {
            document
                .word_at(position.line as usize, position.character as usize - 1)
                .unwrap_or_default()
        } else {
            String::new()
        };

        let mut items = Vec::new();
        let mut is_incomplete = false;

        if trigger_character == Some("@") {
            self.complete_mixins_and_functions(workspace, &mut items);
        }

        let stripped = prefix
            .strip_prefix(['$', '@'])
            .unwrap_or(prefix.as_str());
        if stripped.len() >= MIN_PREFIX_LEN {
            is_incomplete = true;
            self.complete_variables(workspace, stripped, &mut items);
        }

        (items, is_incomplete)
    }

    /// Every mixin and function across the workspace, unfiltered
    fn complete_mixins_and_functions(&self, workspace: &Workspace, items: &mut Vec<CompletionItem>) {
        for document in workspace.documents() {
            for mixin in document.mixins() {
                items.push(CompletionItem {
                    label: mixin.name.clone(),
                    kind: Some(CompletionItemKind::INTERFACE),
                    documentation: Some(self.documentation(&mixin.body, document)),
                    insert_text: Some(format!("include {}", mixin.name)),
                    ..Default::default()
                });
            }
            for function in document.functions() {
                items.push(CompletionItem {
                    label: function.name.clone(),
                    kind: Some(CompletionItemKind::FUNCTION),
                    documentation: Some(self.documentation(&function.body, document)),
                    insert_text: Some(function.name.clone()),
                    ..Default::default()
                });
            }
        }
    }

    /// Every variable whose name contains the prefix, case-sensitive
    fn complete_variables(&self, workspace: &Workspace, prefix: &str, items: &mut Vec<CompletionItem>) {
        for document in workspace.documents() {
            for variable in document.variables() {
                if !variable.name.contains(prefix) {
                    continue;
                }
                items.push(CompletionItem {
                    label: variable.name.clone(),
                    kind: Some(CompletionItemKind::VARIABLE),
                    documentation: Some(self.documentation(&variable.body, document)),
                    insert_text: Some(variable.name.clone()),
                    ..Default::default()
                });
            }
        }
    }

    fn documentation(&self, body: &str, document: &ScssDocument) -> Documentation {
        Documentation::String(format!("{}\n\n{}", body, document.path().display()))
    }
}

impl Default for ScssCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}
