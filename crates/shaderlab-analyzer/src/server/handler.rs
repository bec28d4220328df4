use std::{
    collections::HashMap,
    panic::AssertUnwindSafe,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use futures::FutureExt;
use serde_json::Value;
use tower_lsp::{Client, LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    definition::WorkspaceScan,
    progress::run_with_progress,
    semantic_tokens::get_legend,
    server::{
        FORMAT_SHADERLAB_COMMAND,
        formatting::{FormattingError, format_document, format_shaderlab},
        settings::{ServerSettings, SETTINGS_SECTION_KEY},
        state::ShaderLabLanguageServer,
    },
    signature_help::TRIGGER_CHARACTERS,
    syntax::SHADER_FAMILY_GLOB,
    vfs::FileId,
};

const CLIENT_NOTIFICATION_PREFIX: &str = "shaderlab-analyzer:";
const COMPLETION_TRIGGER_CHARACTERS: &[&str] = &[".", ":", "("];
const WATCHER_REGISTRATION_ID: &str = "shaderlab-analyzer/watch-shader-files";
const COMMAND_TAB_SIZE: u32 = 4;

#[tower_lsp::async_trait]
impl LanguageServer for ShaderLabLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing shaderlab-analyzer...");

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(strings(COMPLETION_TRIGGER_CHARACTERS)),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(strings(TRIGGER_CHARACTERS)),
                    retrigger_characters: None,
                    work_done_progress_options: Default::default(),
                }),
                document_link_provider: Some(DocumentLinkOptions {
                    resolve_provider: Some(false),
                    work_done_progress_options: Default::default(),
                }),
                document_symbol_provider: Some(OneOf::Left(true)),
                workspace_symbol_provider: Some(OneOf::Left(true)),
                semantic_tokens_provider: Some(SemanticTokensServerCapabilities::SemanticTokensOptions(
                    SemanticTokensOptions {
                        legend: get_legend(),
                        full: Some(SemanticTokensFullOptions::Bool(true)),
                        range: Some(false),
                        work_done_progress_options: Default::default(),
                    },
                )),
                document_formatting_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![FORMAT_SHADERLAB_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "shaderlab-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("shaderlab-analyzer initialized");
        let client = self.client.clone();
        tokio::spawn(async move {
            register_file_watcher(client).await;
        });
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated {SETTINGS_SECTION_KEY} settings");
    }

    async fn did_change_workspace_folders(
        &self,
        params: DidChangeWorkspaceFoldersParams,
    ) {
        {
            let mut roots = self.workspace_roots.write().await;
            roots.retain(|folder| !params.event.removed.iter().any(|removed| removed.uri == folder.uri));
            roots.extend(params.event.added);
        }
        self.refresh_include_roots().await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down shaderlab-analyzer ({} cached symbol trees)", self.symbol_cache.len());
        self.symbol_cache.clear();
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let item = params.text_document;
        let filename = short_name(&item.uri);
        info!("Opened {filename} (v{}, {} bytes)", item.version, item.text.len());

        self.document_store.open(item.uri.clone(), item.text, item.version, &item.language_id);
        self.invalidate(&item.uri);
        self.log_to_client(format!("Opened {filename}")).await;
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        if !self.document_store.apply_changes(&uri, params.content_changes, params.text_document.version) {
            debug!("didChange for untracked document {}", short_name(&uri));
            return;
        }
        self.invalidate(&uri);
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Closed {}", short_name(&uri));
        self.document_store.close(&uri);
    }

    async fn did_change_watched_files(
        &self,
        params: DidChangeWatchedFilesParams,
    ) {
        for change in params.changes {
            let file = FileId::from_url(&change.uri);
            match change.typ {
                FileChangeType::DELETED => {
                    self.symbol_cache.remove(&file);
                },
                _ => self.symbol_cache.invalidate(&file),
            }
        }
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let items = self.completion_provider.provide(&uri, position);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn signature_help(
        &self,
        params: SignatureHelpParams,
    ) -> Result<Option<SignatureHelp>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        Ok(self.signature_help_provider.provide(&uri, position))
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> Result<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(document) = self.document(&uri) else {
            return Ok(None);
        };
        let settings = self.settings_snapshot().await;

        match format_document(&document, &params.options, &settings.formatting) {
            Ok(Some(edit)) => Ok(Some(vec![edit])),
            Ok(None) => Ok(Some(Vec::new())),
            Err(FormattingError::Disabled) => {
                debug!("Formatting disabled for {}", short_name(&uri));
                Ok(Some(Vec::new()))
            },
            Err(error) => {
                warn!("Formatting failed for {uri}: {error}");
                self.client.show_message(MessageType::WARNING, prefixed_client_message(error.to_string())).await;
                Ok(None)
            },
        }
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>> {
        if params.command != FORMAT_SHADERLAB_COMMAND {
            warn!("Unknown command: {}", params.command);
            return Ok(None);
        }
        let Some(uri) = command_uri(&params.arguments) else {
            warn!("{FORMAT_SHADERLAB_COMMAND} called without a document uri");
            return Ok(None);
        };
        let Some(document) = self.document(&uri) else {
            return Ok(None);
        };
        let settings = self.settings_snapshot().await;
        let options = FormattingOptions {
            tab_size: COMMAND_TAB_SIZE,
            insert_spaces: true,
            properties: HashMap::new(),
            trim_trailing_whitespace: None,
            insert_final_newline: None,
            trim_final_newlines: None,
        };

        match format_shaderlab(&document, &options, &settings.formatting) {
            Ok(Some(edit)) => {
                let client = self.client.clone();
                let workspace_edit = WorkspaceEdit {
                    changes: Some(HashMap::from([(uri.clone(), vec![edit.clone()])])),
                    ..Default::default()
                };
                tokio::spawn(async move {
                    match AssertUnwindSafe(client.apply_edit(workspace_edit)).catch_unwind().await {
                        Ok(Ok(response)) if !response.applied => {
                            debug!("client declined formatting edit: {:?}", response.failure_reason);
                        },
                        Ok(Ok(_)) => {},
                        Ok(Err(error)) => debug!("workspace/applyEdit failed: {error}"),
                        Err(_) => warn!("workspace/applyEdit panicked (client may have disconnected)"),
                    }
                });
                Ok(serde_json::to_value(vec![edit]).ok())
            },
            Ok(None) => Ok(None),
            Err(error) => {
                info!("Rejected {FORMAT_SHADERLAB_COMMAND} for {}: {error}", short_name(&uri));
                self.client.show_message(MessageType::ERROR, prefixed_client_message(error.to_string())).await;
                Ok(None)
            },
        }
    }

    async fn hover(
        &self,
        params: HoverParams,
    ) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let settings = self.settings_snapshot().await;
        let roots = self.workspace_root_paths().await;
        let provider = Arc::clone(&self.hover_provider);
        let hover = run_blocking_query(Arc::clone(&self.hover_generation), "hover", move |is_cancelled| {
            provider.provide(&uri, position, workspace_scan(&settings, &roots, is_cancelled))
        })
        .await;
        Ok(hover)
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let settings = self.settings_snapshot().await;
        let roots = self.workspace_root_paths().await;
        let provider = Arc::clone(&self.definition_provider);
        let target = uri.clone();

        let start = std::time::Instant::now();
        let links = run_blocking_query(Arc::clone(&self.definition_generation), "goto-def", move |is_cancelled| {
            provider.provide(&target, position, workspace_scan(&settings, &roots, is_cancelled))
        })
        .await;
        let filename = short_name(&uri);
        match &links {
            Some(links) => debug!(
                "goto-def {filename}:{}:{} -> {} link(s) ({:?})",
                position.line + 1,
                position.character + 1,
                links.len(),
                start.elapsed()
            ),
            None => debug!(
                "goto-def {filename}:{}:{} -> none ({:?})",
                position.line + 1,
                position.character + 1,
                start.elapsed()
            ),
        }
        Ok(links.map(GotoDefinitionResponse::Link))
    }

    async fn document_link(
        &self,
        params: DocumentLinkParams,
    ) -> Result<Option<Vec<DocumentLink>>> {
        Ok(Some(self.document_link_provider.provide(&params.text_document.uri)))
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let tokens = self.semantic_token_provider.provide(&params.text_document.uri);
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data: tokens,
        })))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let symbols = self.symbol_provider.document_symbols(&params.text_document.uri);
        Ok(symbols.map(DocumentSymbolResponse::Nested))
    }

    async fn symbol(
        &self,
        params: WorkspaceSymbolParams,
    ) -> Result<Option<Vec<SymbolInformation>>> {
        let generation = self.workspace_symbol_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let latest = Arc::clone(&self.workspace_symbol_generation);
        let settings = self.settings_snapshot().await;
        let roots = self.workspace_root_paths().await;
        let provider = self.symbol_provider.clone();
        let query = params.query;
        let begin_message = format!("Searching for '{query}'");

        let symbols = run_with_progress(&self.client, "Workspace symbols", Some(begin_message), async move {
            let search = tokio::task::spawn_blocking(move || {
                let is_cancelled = || latest.load(Ordering::Relaxed) != generation;
                provider.workspace_symbols(
                    &query,
                    &roots,
                    settings.indexing.max_workspace_files,
                    &settings.indexing.exclude_paths,
                    &is_cancelled,
                )
            });
            let symbols = match search.await {
                Ok(symbols) => symbols,
                Err(error) => {
                    warn!("workspace symbol search failed: {error}");
                    Vec::new()
                },
            };
            let message = format!("{} symbol(s)", symbols.len());
            (symbols, Some(message))
        })
        .await;
        Ok(Some(symbols))
    }
}

impl ShaderLabLanguageServer {
    async fn log_to_client(
        &self,
        message: String,
    ) {
        if !self.settings_snapshot().await.logging.level.allows_info() {
            return;
        }
        let _ = AssertUnwindSafe(self.client.log_message(MessageType::INFO, prefixed_client_message(message)))
            .catch_unwind()
            .await;
    }
}

async fn register_file_watcher(client: Client) {
    let options = DidChangeWatchedFilesRegistrationOptions {
        watchers: vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String(SHADER_FAMILY_GLOB.to_string()),
            kind: None,
        }],
    };
    let registration = Registration {
        id: WATCHER_REGISTRATION_ID.to_string(),
        method: "workspace/didChangeWatchedFiles".to_string(),
        register_options: serde_json::to_value(options).ok(),
    };
    match AssertUnwindSafe(client.register_capability(vec![registration])).catch_unwind().await {
        Ok(Ok(())) => debug!("registered file watcher for {SHADER_FAMILY_GLOB}"),
        Ok(Err(error)) => warn!("file watcher registration failed: {error}"),
        Err(_) => warn!("file watcher registration panicked (client may have disconnected)"),
    }
}

fn workspace_scan<'a>(
    settings: &'a ServerSettings,
    roots: &'a [PathBuf],
    is_cancelled: &'a dyn Fn() -> bool,
) -> Option<WorkspaceScan<'a>> {
    settings.indexing.workspace_fallback.then_some(WorkspaceScan {
        roots,
        max_files: settings.indexing.max_workspace_files,
        excludes: &settings.indexing.exclude_paths,
        is_cancelled,
    })
}

/// Sets its flag when the request future holding it is dropped, which is
/// how tower-lsp abandons a request on `$/cancelRequest`.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Run `query` on the blocking pool. Its cancellation check turns true once
/// a newer query bumps `generation` or the awaiting request is dropped.
async fn run_blocking_query<T, F>(
    generation: Arc<AtomicU64>,
    label: &'static str,
    query: F,
) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn Fn() -> bool) -> Option<T> + Send + 'static,
{
    let current = generation.fetch_add(1, Ordering::Relaxed) + 1;
    let dropped = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(Arc::clone(&dropped));
    let task = tokio::task::spawn_blocking(move || {
        let is_cancelled = || dropped.load(Ordering::Relaxed) || generation.load(Ordering::Relaxed) != current;
        query(&is_cancelled)
    });
    match task.await {
        Ok(result) => result,
        Err(error) => {
            warn!("{label} query failed: {error}");
            None
        },
    }
}

/// The document named by a command's first argument, given either as a
/// bare URI string or as `{ "uri": ... }`.
fn command_uri(arguments: &[Value]) -> Option<Url> {
    let raw = match arguments.first()? {
        Value::String(uri) => uri.as_str(),
        Value::Object(object) => object.get("uri")?.as_str()?,
        _ => return None,
    };
    Url::parse(raw).ok()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}

#[cfg(test)]
#[path = "../../tests/src/server/handler_tests.rs"]
mod tests;
