use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::lsp_types::{self, DocumentSymbol, Location, SymbolInformation, Url};
use tracing::debug;

use crate::vfs::{self, Vfs};

use super::cache::{CacheEntry, SymbolCache};
use super::types::{SymbolId, SymbolKind};

/// Queries shorter than this return nothing from `workspace/symbol`.
const MIN_WORKSPACE_QUERY_LEN: usize = 2;

pub fn lsp_symbol_kind(kind: SymbolKind) -> lsp_types::SymbolKind {
    match kind {
        SymbolKind::File => lsp_types::SymbolKind::FILE,
        SymbolKind::Package => lsp_types::SymbolKind::PACKAGE,
        SymbolKind::Struct => lsp_types::SymbolKind::STRUCT,
        SymbolKind::Class => lsp_types::SymbolKind::CLASS,
        SymbolKind::Function => lsp_types::SymbolKind::FUNCTION,
        SymbolKind::Method => lsp_types::SymbolKind::METHOD,
        SymbolKind::Field => lsp_types::SymbolKind::FIELD,
        SymbolKind::Variable => lsp_types::SymbolKind::VARIABLE,
        SymbolKind::Constant => lsp_types::SymbolKind::CONSTANT,
        SymbolKind::Module => lsp_types::SymbolKind::MODULE,
        SymbolKind::Property => lsp_types::SymbolKind::PROPERTY,
    }
}

/// Hierarchical outline of a cached entry.
///
/// Built bottom-up over the reverse preorder so that nesting depth never
/// turns into recursion depth.
pub fn document_symbols(entry: &CacheEntry) -> Vec<DocumentSymbol> {
    let tree = &entry.tree;
    let mut built: HashMap<SymbolId, DocumentSymbol> = HashMap::with_capacity(tree.len());
    for id in tree.preorder().into_iter().rev() {
        let children: Vec<DocumentSymbol> = tree.children(id).iter().filter_map(|child| built.remove(child)).collect();
        let symbol = tree.get(id);
        #[allow(deprecated)]
        let node = DocumentSymbol {
            name: symbol.name.clone(),
            detail: (!symbol.detail.is_empty()).then(|| symbol.detail.clone()),
            kind: lsp_symbol_kind(symbol.kind),
            tags: None,
            deprecated: None,
            range: entry.document.range_of(symbol.range),
            selection_range: entry.document.range_of(symbol.selection_range),
            children: (!children.is_empty()).then_some(children),
        };
        built.insert(id, node);
    }
    tree.roots().iter().filter_map(|id| built.remove(id)).collect()
}

/// Outline and workspace symbol queries over the shared cache.
#[derive(Clone)]
pub struct SymbolProvider {
    cache: Arc<SymbolCache>,
    vfs: Vfs,
}

impl SymbolProvider {
    pub fn new(
        cache: Arc<SymbolCache>,
        vfs: Vfs,
    ) -> Self {
        Self {
            cache,
            vfs,
        }
    }

    pub fn document_symbols(
        &self,
        uri: &Url,
    ) -> Option<Vec<DocumentSymbol>> {
        let snapshot = self.vfs.snapshot_url(uri)?;
        let entry = self.cache.get(&snapshot)?;
        Some(document_symbols(&entry))
    }

    /// Case-insensitive substring search over every shader-family file under
    /// `roots`. Cancellation is polled between files; a cancelled search
    /// returns what it found so far.
    pub fn workspace_symbols(
        &self,
        query: &str,
        roots: &[PathBuf],
        max_files: usize,
        excludes: &[String],
        is_cancelled: &dyn Fn() -> bool,
    ) -> Vec<SymbolInformation> {
        let query = query.trim();
        if query.chars().count() < MIN_WORKSPACE_QUERY_LEN {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        let files = vfs::discover_shader_files(roots, max_files, excludes, is_cancelled);
        for path in &files {
            if is_cancelled() {
                debug!("[workspace-symbol] superseded after {} result(s)", results.len());
                break;
            }
            let Some(entry) = self.vfs.snapshot_path(path).and_then(|snapshot| self.cache.get(&snapshot)) else {
                continue;
            };
            collect_matches(&entry, &needle, &mut results);
        }
        debug!("[workspace-symbol] '{query}': {} match(es) in {} file(s)", results.len(), files.len());
        results
    }
}

fn collect_matches(
    entry: &CacheEntry,
    needle: &str,
    out: &mut Vec<SymbolInformation>,
) {
    let tree = &entry.tree;
    for id in tree.preorder() {
        let symbol = tree.get(id);
        if !symbol.name.to_lowercase().contains(needle) {
            continue;
        }
        let container_name = tree.parent(id).map(|parent| tree.get(parent).name.clone());
        #[allow(deprecated)]
        out.push(SymbolInformation {
            name: symbol.name.clone(),
            kind: lsp_symbol_kind(symbol.kind),
            tags: None,
            deprecated: None,
            location: Location {
                uri: entry.document.uri.clone(),
                range: entry.document.range_of(symbol.selection_range),
            },
            container_name,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/provider_tests.rs"]
mod tests;
