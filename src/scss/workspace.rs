//! Workspace Symbol Index
//!
//! Owns every indexed document, the call whitelist, and the name lookups
//! that hover, definition and diagnostics resolve against. The index is a
//! derived view: lookups scan the documents' record vectors on demand, and
//! duplicate declarations across files are preserved, never merged.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ServerConfig;
use crate::scss::document::ScssDocument;
use crate::scss::extract::Definition;
use crate::scss::parser::ScssParser;

/// File extension of indexed stylesheets
const SCSS_EXTENSION: &str = "scss";

/// Human-readable kind labels used by hover and lookup results
pub const MIXIN_LABEL: &str = "@mixin";
pub const FUNCTION_LABEL: &str = "@function";
pub const VARIABLE_LABEL: &str = "$variable";

/// One lookup match: a definition plus its kind label and owning document
#[derive(Debug, Clone, Copy)]
pub struct DefinitionRef<'a> {
    pub path: &'a Path,
    pub kind: &'static str,
    pub definition: &'a Definition,
}

/// The indexed workspace
pub struct Workspace {
    root: PathBuf,
    documents: HashMap<PathBuf, ScssDocument>,
    whitelist: HashSet<String>,
    exclude_dirs: Vec<String>,
}

impl Workspace {
    /// Create an empty workspace for the given root
    pub fn new(root: PathBuf, config: &ServerConfig) -> Self {
        Self {
            root,
            documents: HashMap::new(),
            whitelist: config.call_whitelist.iter().cloned().collect(),
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    /// (Re)index one document from in-memory content.
    ///
    /// The document's whole record set is rebuilt before it becomes
    /// observable; a failed parse keeps the previous records.
    pub fn index_document(&mut self, path: PathBuf, source: String, parser: &mut ScssParser) {
        let document = self
            .documents
            .entry(path.clone())
            .or_insert_with(|| ScssDocument::new(path));
        document.update(source, parser);
    }

    /// (Re)index one document from disk.
    ///
    /// A read error is logged and leaves any previous index for the path
    /// untouched (stale rather than cleared).
    pub fn index_file(&mut self, path: &Path, parser: &mut ScssParser) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.index_document(path.to_path_buf(), source, parser),
            Err(e) => log::error!("Failed to read {}: {}", path.display(), e),
        }
    }

    /// Index every stylesheet under the workspace root.
    ///
    /// Used by tests and by callers that want a synchronous scan; the
    /// server's background scan drives [`collect_stylesheets`] itself so it
    /// can interleave with requests.
    pub fn scan(&mut self, parser: &mut ScssParser) {
        let paths = collect_stylesheets(&self.root, &self.exclude_dirs);
        log::info!(
            "Scanning {} stylesheets under {}",
            paths.len(),
            self.root.display()
        );
        for path in paths {
            self.index_file(&path, parser);
        }
    }

    pub fn document(&self, path: &Path) -> Option<&ScssDocument> {
        self.documents.get(path)
    }

    pub fn documents(&self) -> impl Iterator<Item = &ScssDocument> {
        self.documents.values()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Every definition with the given name, across all documents.
    ///
    /// Kind precedence is explicit: all mixins first, then functions, then
    /// variables, so single-result consumers take the highest-precedence
    /// match by reading the first element. Ordering across files within one
    /// kind follows map iteration and is unspecified.
    pub fn lookup_by_name(&self, name: &str) -> Vec<DefinitionRef<'_>> {
        let mut results = Vec::new();
        self.collect_matches(name, MIXIN_LABEL, |document| document.mixins(), &mut results);
        self.collect_matches(name, FUNCTION_LABEL, |document| document.functions(), &mut results);
        self.collect_matches(name, VARIABLE_LABEL, |document| document.variables(), &mut results);
        results
    }

    fn collect_matches<'a>(
        &'a self,
        name: &str,
        kind: &'static str,
        records: impl Fn(&'a ScssDocument) -> &'a [Definition],
        results: &mut Vec<DefinitionRef<'a>>,
    ) {
        for document in self.documents.values() {
            for definition in records(document) {
                if definition.name == name {
                    results.push(DefinitionRef {
                        path: document.path(),
                        kind,
                        definition,
                    });
                }
            }
        }
    }

    /// True when any document defines the name as a mixin, function, or
    /// variable. Call sites are not definitions and are never consulted.
    pub fn exists_by_name(&self, name: &str) -> bool {
        self.documents.values().any(|document| {
            document.mixins().iter().any(|d| d.name == name)
                || document.functions().iter().any(|d| d.name == name)
                || document.variables().iter().any(|d| d.name == name)
        })
    }

    /// True when the name is exempt from undefined-call diagnostics
    pub fn is_whitelisted(&self, name: &str) -> bool {
        self.whitelist.contains(name)
    }
}

/// Collect every `.scss` file under `root`, skipping excluded directories.
///
/// Unreadable entries are logged and skipped; the walk always completes.
pub fn collect_stylesheets(root: &Path, exclude_dirs: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(root).follow_links(false).into_iter();

    for entry in walker.filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && exclude_dirs
                .iter()
                .any(|dir| entry.file_name().to_str() == Some(dir.as_str())))
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry during scan: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(SCSS_EXTENSION) {
            paths.push(path);
        }
    }

    paths
}
