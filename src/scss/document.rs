//! SCSS Document
//!
//! A single indexed stylesheet: its path, source text, syntax tree, and the
//! symbol records extracted from it. All record vectors are rebuilt and
//! swapped wholesale on every (re)parse; nothing is patched in place, so a
//! reader never sees a half-updated document.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Point, Tree};

use crate::scss::extract::{self, CallSite, Definition, SelectorEntry};
use crate::scss::parser::ScssParser;

/// Position outside the document bounds in [`ScssDocument::word_at`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid line number: {line}")]
    InvalidLine { line: usize },
    #[error("invalid column number: {column}")]
    InvalidColumn { column: usize },
}

/// Word separators for [`ScssDocument::word_at`]
fn is_separator(byte: u8) -> bool {
    byte == b' ' || byte == b'\t' || byte == b'\n' || byte == b'\r' || byte == b'@' || byte == b';'
}

/// An indexed SCSS document
pub struct ScssDocument {
    path: PathBuf,
    source: String,
    tree: Option<Tree>,
    selectors: Vec<SelectorEntry>,
    mixins: Vec<Definition>,
    functions: Vec<Definition>,
    variables: Vec<Definition>,
    calls: Vec<CallSite>,
}

impl ScssDocument {
    /// Create an empty, unparsed document
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            source: String::new(),
            tree: None,
            selectors: Vec::new(),
            mixins: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Replace the document content, reparse, and re-extract every record.
    ///
    /// On a parse failure the previous tree and records are kept so queries
    /// stay answerable from the last good state; returns false in that case.
    pub fn update(&mut self, source: String, parser: &mut ScssParser) -> bool {
        // Always a full parse. The old tree would need edit() bookkeeping to
        // be safe as an incremental base, and content arrives as full text.
        let Some(tree) = parser.parse(&source, None) else {
            log::error!("Failed to parse {}", self.path.display());
            return false;
        };

        self.source = source;
        let bytes = self.source.as_bytes();
        let queries = parser.queries();

        self.selectors = extract::selector_entries(&tree, bytes, queries);
        self.mixins = extract::mixin_definitions(&tree, bytes, queries);
        self.functions = extract::function_definitions(&tree, bytes, queries);
        self.variables = extract::variable_definitions(&tree, bytes, queries);
        self.calls = extract::call_sites(&tree, bytes, queries);
        self.tree = Some(tree);
        true
    }

    /// Literal text of the smallest named node containing the point.
    ///
    /// This is the lookup key for hover, definition and references.
    pub fn token_at(&self, point: Point) -> Option<String> {
        let tree = self.tree.as_ref()?;
        let node = tree
            .root_node()
            .named_descendant_for_point_range(point, point)?;
        node.utf8_text(self.source.as_bytes())
            .ok()
            .map(|text| text.to_string())
    }

    /// The raw word around a line/column position, without a tree lookup.
    ///
    /// Expands left and right from the column until a separator (space, tab,
    /// CR, LF, `@`, `;`) is hit. Out-of-range positions are a typed error,
    /// not clamped.
    pub fn word_at(&self, line: usize, column: usize) -> Result<String, PositionError> {
        let target_line = self
            .source
            .split('\n')
            .nth(line)
            .ok_or(PositionError::InvalidLine { line })?;
        let bytes = target_line.as_bytes();
        if column >= bytes.len() {
            return Err(PositionError::InvalidColumn { column });
        }

        let mut start = column;
        while start > 0 && !is_separator(bytes[start - 1]) {
            start -= 1;
        }

        let mut end = column;
        while end < bytes.len() - 1 && !is_separator(bytes[end + 1]) {
            end += 1;
        }

        Ok(String::from_utf8_lossy(&bytes[start..=end]).into_owned())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn selectors(&self) -> &[SelectorEntry] {
        &self.selectors
    }

    pub fn mixins(&self) -> &[Definition] {
        &self.mixins
    }

    pub fn functions(&self) -> &[Definition] {
        &self.functions
    }

    pub fn variables(&self) -> &[Definition] {
        &self.variables
    }

    pub fn calls(&self) -> &[CallSite] {
        &self.calls
    }
}
