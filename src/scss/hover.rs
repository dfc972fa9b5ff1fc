//! SCSS Hover Provider
//!
//! Renders the declared signature of the symbol under the cursor: the body
//! in a fenced code block, followed by the kind label and the owning file.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::scss::position::tree_point;
use crate::scss::workspace::Workspace;

/// Provides hover information for SCSS symbols
pub struct ScssHoverProvider;

impl ScssHoverProvider {
    /// Create a new hover provider
    pub fn new() -> Self {
        Self
    }

    /// Hover content for the symbol at the given position, if it resolves
    /// to any definition in the workspace.
    ///
    /// With several candidates the kind precedence of
    /// [`Workspace::lookup_by_name`] decides which one is shown.
    pub fn hover(
        &self,
        workspace: &Workspace,
        path: &std::path::Path,
        position: Position,
    ) -> Option<Hover> {
        let document = workspace.document(path)?;
        let word = document.token_at(tree_point(position))?;

        let definitions = workspace.lookup_by_name(&word);
        let first = definitions.first()?;

        let value = format!(
            "```css\n{}\n```\n{} defined in: {}",
            first.definition.body,
            first.kind,
            first.path.display()
        );

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: None,
        })
    }
}

impl Default for ScssHoverProvider {
    fn default() -> Self {
        Self::new()
    }
}
