use std::{
    path::PathBuf,
    sync::{Arc, atomic::AtomicU64},
};

use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{Url, WorkspaceFolder},
};
use tracing::debug;

use crate::{
    completion::CompletionProvider,
    definition::{DefinitionProvider, IncludeGraph},
    document::{Document, DocumentStore},
    hover::HoverProvider,
    includes::{IncludeConfig, IncludeResolver},
    links::DocumentLinkProvider,
    semantic_tokens::SemanticTokenProvider,
    server::settings::ServerSettings,
    signature_help::SignatureHelpProvider,
    symbols::{SymbolCache, SymbolProvider},
    vfs::{FileId, Vfs},
};

/// The shaderlab-analyzer backend that implements the Language Server Protocol.
pub struct ShaderLabLanguageServer {
    /// The LSP client handle, used for messages, edits and registrations.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Open documents first, the file system second.
    pub(crate) vfs: Vfs,

    /// Symbol trees of open and on-disk files, keyed by normalized path.
    pub(crate) symbol_cache: Arc<SymbolCache>,

    /// Include path resolution shared by every provider.
    pub(crate) include_resolver: Arc<IncludeResolver>,

    pub(crate) completion_provider: Arc<CompletionProvider>,
    pub(crate) hover_provider: Arc<HoverProvider>,
    pub(crate) definition_provider: Arc<DefinitionProvider>,
    pub(crate) signature_help_provider: Arc<SignatureHelpProvider>,
    pub(crate) document_link_provider: Arc<DocumentLinkProvider>,
    pub(crate) semantic_token_provider: Arc<SemanticTokenProvider>,
    pub(crate) symbol_provider: SymbolProvider,

    /// Workspace root folders, populated during `initialize`.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Monotonic generation for workspace symbol searches. A newer search
    /// makes older in-flight scans stop at the next file boundary.
    pub(crate) workspace_symbol_generation: Arc<AtomicU64>,

    /// Generations of hover and definition requests. Their workspace
    /// fallback scans stop once a newer request of the same kind arrives.
    pub(crate) hover_generation: Arc<AtomicU64>,
    pub(crate) definition_generation: Arc<AtomicU64>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl ShaderLabLanguageServer {
    /// Create a new server wired to the given LSP client.
    ///
    /// `_log_messages` is accepted for CLI compatibility; message-level
    /// logging is controlled through the `tracing` subscriber.
    pub fn new(
        client: Client,
        _log_messages: bool,
    ) -> Self {
        let document_store = Arc::new(DocumentStore::new());
        let vfs = Vfs::new(Arc::clone(&document_store));
        let symbol_cache = Arc::new(SymbolCache::new());
        let include_resolver = Arc::new(IncludeResolver::new(IncludeConfig::default()));
        let graph = IncludeGraph::new(vfs.clone(), Arc::clone(&symbol_cache), Arc::clone(&include_resolver));

        let definition_provider = Arc::new(DefinitionProvider::new(graph.clone()));
        let hover_provider = Arc::new(HoverProvider::new(Arc::clone(&definition_provider)));
        let completion_provider = Arc::new(CompletionProvider::new(graph.clone()));
        let signature_help_provider = Arc::new(SignatureHelpProvider::new(graph.clone()));
        let document_link_provider = Arc::new(DocumentLinkProvider::new(graph.clone()));
        let semantic_token_provider = Arc::new(SemanticTokenProvider::new(graph));
        let symbol_provider = SymbolProvider::new(Arc::clone(&symbol_cache), vfs.clone());

        Self {
            client,
            document_store,
            vfs,
            symbol_cache,
            include_resolver,
            completion_provider,
            hover_provider,
            definition_provider,
            signature_help_provider,
            document_link_provider,
            semantic_token_provider,
            symbol_provider,
            workspace_roots: RwLock::new(Vec::new()),
            workspace_symbol_generation: Arc::new(AtomicU64::new(0)),
            hover_generation: Arc::new(AtomicU64::new(0)),
            definition_generation: Arc::new(AtomicU64::new(0)),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn workspace_root_paths(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|folder| folder.uri.to_file_path().ok()).collect()
    }

    /// Store `settings` and push the include inputs to the resolver. A
    /// changed include configuration drops the package registry.
    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        let roots = self.workspace_root_paths().await;
        if self.include_resolver.configure(settings.include_config(roots)) {
            debug!("[settings] include configuration changed");
        }
        *self.settings.write().await = settings;
    }

    /// Re-read workspace folders into the include configuration.
    pub(crate) async fn refresh_include_roots(&self) {
        let settings = self.settings_snapshot().await;
        self.apply_settings(settings).await;
    }

    /// The open document for `uri`, or the file behind it.
    pub(crate) fn document(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.vfs.snapshot_url(uri).map(|snapshot| snapshot.document)
    }

    /// Drop the cached symbols of `uri` after an edit or a file event.
    pub(crate) fn invalidate(
        &self,
        uri: &Url,
    ) {
        self.symbol_cache.invalidate(&FileId::from_url(uri));
    }
}
