//! SCSS Language Server Implementation
//!
//! Wires the symbol engine to the Language Server Protocol using tower-lsp.
//! All engine state lives behind one mutex; the initial workspace scan runs
//! as a background task that takes the lock per file, so requests interleave
//! with index population instead of waiting for the whole scan.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use crate::config::ServerConfig;
use crate::scss::completion::ScssCompletionProvider;
use crate::scss::diagnostics::ScssDiagnostics;
use crate::scss::hover::ScssHoverProvider;
use crate::scss::navigation::ScssNavigationProvider;
use crate::scss::parser::ScssParser;
use crate::scss::symbols::ScssSymbolProvider;
use crate::scss::workspace::{collect_stylesheets, Workspace};

/// SCSS Language Server
pub struct ScssLanguageServer {
    client: Client,
    /// Arc<Mutex> is required here despite single-threaded async for three reasons:
    /// 1. tower-lsp requires LanguageServer implementations to be Send + Sync
    /// 2. Interior mutability is needed to modify state from &self methods
    /// 3. The background workspace scan shares this state with request handlers
    state: Arc<Mutex<ScssServerState>>,
}

/// Internal state for the SCSS language server
struct ScssServerState {
    workspace: Workspace,
    parser: ScssParser,
    hover_provider: ScssHoverProvider,
    navigation_provider: ScssNavigationProvider,
    symbol_provider: ScssSymbolProvider,
    completion_provider: ScssCompletionProvider,
    diagnostics: ScssDiagnostics,
}

impl ScssLanguageServer {
    /// Create a new SCSS language server
    pub fn new(client: Client) -> Self {
        let state = ScssServerState {
            workspace: Workspace::new(PathBuf::new(), &ServerConfig::default()),
            parser: ScssParser::new().expect("Failed to create SCSS parser"),
            hover_provider: ScssHoverProvider::new(),
            navigation_provider: ScssNavigationProvider::new(),
            symbol_provider: ScssSymbolProvider::new(),
            completion_provider: ScssCompletionProvider::new(),
            diagnostics: ScssDiagnostics::new(),
        };

        Self {
            client,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Resolve the workspace root from initialize params
    fn resolve_root(params: &InitializeParams) -> Option<PathBuf> {
        // root_uri is deprecated in the protocol but still what most
        // clients send
        #[allow(deprecated)]
        if let Some(root_uri) = params.root_uri.as_ref() {
            if let Ok(path) = root_uri.to_file_path() {
                return Some(path);
            }
        }

        params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|folder| folder.uri.to_file_path().ok())
    }

    /// Re-index a document from in-memory content and return its fresh
    /// diagnostics for publishing.
    fn reindex_document(&self, uri: &Url, source: String) -> Vec<Diagnostic> {
        let Ok(path) = uri.to_file_path() else {
            log::warn!("Ignoring non-file URI: {}", uri);
            return Vec::new();
        };

        if let Ok(mut state) = self.state.lock() {
            let state = &mut *state;
            state
                .workspace
                .index_document(path.clone(), source, &mut state.parser);
            state.diagnostics.analyze(&state.workspace, &path)
        } else {
            log::error!("Failed to acquire state lock for {}", uri);
            Vec::new()
        }
    }

    /// Start the background scan of the workspace root.
    ///
    /// The walk and the file reads happen off the lock; the lock is taken
    /// once per file to swap the freshly built document in.
    fn spawn_workspace_scan(&self) {
        let state = Arc::clone(&self.state);
        tokio::task::spawn_blocking(move || {
            let (root, exclude_dirs) = match state.lock() {
                Ok(state) => (
                    state.workspace.root().to_path_buf(),
                    state.workspace.exclude_dirs().to_vec(),
                ),
                Err(_) => return,
            };
            if root.as_os_str().is_empty() {
                log::warn!("No workspace root, skipping initial scan");
                return;
            }

            let paths = collect_stylesheets(&root, &exclude_dirs);
            log::info!(
                "Background scan: {} stylesheets under {}",
                paths.len(),
                root.display()
            );

            for path in paths {
                let source = match std::fs::read_to_string(&path) {
                    Ok(source) => source,
                    Err(e) => {
                        log::error!("Failed to read {}: {}", path.display(), e);
                        continue;
                    }
                };
                if let Ok(mut state) = state.lock() {
                    let state = &mut *state;
                    state.workspace.index_document(path, source, &mut state.parser);
                }
            }

            if let Ok(state) = state.lock() {
                log::info!(
                    "Background scan complete: {} documents indexed",
                    state.workspace.document_count()
                );
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ScssLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root) = Self::resolve_root(&params) {
            let config = ServerConfig::load(&root);
            if let Ok(mut state) = self.state.lock() {
                state.workspace = Workspace::new(root, &config);
            }
        } else {
            log::warn!("Client sent no workspace root; cross-file features limited to open documents");
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        will_save: Some(true),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                workspace_symbol_provider: Some(OneOf::Left(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec!["$".to_string(), "@".to_string()]),
                    all_commit_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    completion_item: None,
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "SCSS Language Server initialized")
            .await;
        self.spawn_workspace_scan();
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let diagnostics = self.reindex_document(&uri, params.text_document.text);
        self.client
            .log_message(MessageType::INFO, format!("Opened SCSS document: {}", uri))
            .await;
        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change event carries the complete text
        let Some(change) = params.content_changes.into_iter().next_back() else {
            return;
        };
        let diagnostics = self.reindex_document(&uri, change.text);
        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;

        let diagnostics = match params.text {
            Some(text) => self.reindex_document(&uri, text),
            None => {
                // Save without included text; read back from disk
                let Ok(path) = uri.to_file_path() else {
                    return;
                };
                if let Ok(mut state) = self.state.lock() {
                    let state = &mut *state;
                    state.workspace.index_file(&path, &mut state.parser);
                    state.diagnostics.analyze(&state.workspace, &path)
                } else {
                    Vec::new()
                }
            }
        };

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        if let Ok(state) = self.state.lock() {
            Ok(state.hover_provider.hover(&state.workspace, &path, position))
        } else {
            Ok(None)
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        let locations = if let Ok(state) = self.state.lock() {
            state
                .navigation_provider
                .definitions(&state.workspace, &path, position)
        } else {
            Vec::new()
        };

        if locations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(GotoDefinitionResponse::Array(locations)))
        }
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        let locations = if let Ok(state) = self.state.lock() {
            state
                .navigation_provider
                .references(&state.workspace, &path, position)
        } else {
            Vec::new()
        };

        if locations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(locations))
        }
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        if let Ok(state) = self.state.lock() {
            let symbols = state.symbol_provider.document_symbols(&state.workspace, &path);
            Ok(Some(DocumentSymbolResponse::Flat(symbols)))
        } else {
            Ok(None)
        }
    }

    async fn symbol(
        &self,
        _params: WorkspaceSymbolParams,
    ) -> Result<Option<Vec<SymbolInformation>>> {
        if let Ok(state) = self.state.lock() {
            Ok(Some(state.symbol_provider.workspace_symbols(&state.workspace)))
        } else {
            Ok(None)
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let trigger_character = params.context.and_then(|context| context.trigger_character);
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        if let Ok(state) = self.state.lock() {
            let (items, is_incomplete) = state.completion_provider.complete(
                &state.workspace,
                &path,
                position,
                trigger_character.as_deref(),
            );
            Ok(Some(CompletionResponse::List(CompletionList {
                is_incomplete,
                items,
            })))
        } else {
            Ok(None)
        }
    }
}

/// Create and start the SCSS language server on stdio
pub async fn start_scss_language_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(ScssLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
