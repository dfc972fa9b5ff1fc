//! Undefined-symbol Diagnostics
//!
//! Walks a document's call sites and flags any whose name is neither
//! whitelisted nor defined anywhere in the workspace. The full diagnostic
//! set for a document is recomputed on every parse; there is no diffing
//! against the previous set.

use std::path::Path;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};

use crate::scss::position::lsp_range;
use crate::scss::workspace::Workspace;

/// Source tag attached to every diagnostic this engine emits
pub const DIAGNOSTIC_SOURCE: &str = "scss-lsp";

/// SCSS diagnostic analyzer
pub struct ScssDiagnostics;

impl ScssDiagnostics {
    /// Create a new diagnostics analyzer
    pub fn new() -> Self {
        Self
    }

    /// Diagnostics for one document's call sites.
    ///
    /// A whitelisted name skips that one call site and the rest of the list
    /// is still checked; the whitelist is consulted before, never instead
    /// of, the existence check.
    pub fn analyze(&self, workspace: &Workspace, path: &Path) -> Vec<Diagnostic> {
        let Some(document) = workspace.document(path) else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for call in document.calls() {
            if workspace.is_whitelisted(&call.name) {
                continue;
            }
            if workspace.exists_by_name(&call.name) {
                continue;
            }
            diagnostics.push(Diagnostic {
                range: lsp_range(call.start, call.end),
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: "undefined".to_string(),
                ..Default::default()
            });
        }
        diagnostics
    }
}

impl Default for ScssDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}
