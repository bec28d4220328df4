use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::document::Document;
use crate::syntax::{ShaderLanguage, never_cancelled};
use crate::vfs::{FileId, Fingerprint, Snapshot};

use super::types::{SymbolId, SymbolKind, SymbolTree};

/// The symbol tree of one file together with the text it was built from.
#[derive(Debug)]
pub struct CacheEntry {
    pub file: FileId,
    pub fingerprint: Fingerprint,
    pub language: ShaderLanguage,
    pub document: Document,
    pub tree: SymbolTree,
}

impl CacheEntry {
    pub fn find_by_name(
        &self,
        name: &str,
    ) -> Option<SymbolId> {
        self.tree.find_by_name(name)
    }

    /// Parameters of a function symbol: its variable children declared
    /// before the body opens.
    pub fn parameters(
        &self,
        id: SymbolId,
    ) -> Vec<SymbolId> {
        let range = self.tree.get(id).range;
        let body = range.slice(&self.document.text).find('{').map_or(range.end, |open| range.start + open);
        self.tree
            .children(id)
            .iter()
            .copied()
            .filter(|child| {
                let symbol = self.tree.get(*child);
                symbol.kind == SymbolKind::Variable && symbol.selection_range.start < body
            })
            .collect()
    }

    /// `name(type param, ...)` for a function, or its detail when that
    /// already spells out a parameter list.
    pub fn signature_label(
        &self,
        id: SymbolId,
    ) -> String {
        let symbol = self.tree.get(id);
        if symbol.detail.contains('(') {
            return symbol.detail.clone();
        }
        let params: Vec<String> = self
            .parameters(id)
            .into_iter()
            .map(|param| {
                let param = self.tree.get(param);
                format!("{} {}", param.detail, param.name).trim().to_owned()
            })
            .collect();
        format!("{}({})", symbol.name, params.join(", "))
    }
}

/// Per-file symbol trees keyed by document version or content hash.
///
/// Entries are immutable. A stale entry stays visible to concurrent readers
/// until its replacement is fully built and swapped in.
#[derive(Debug, Default)]
pub struct SymbolCache {
    entries: DashMap<FileId, Arc<CacheEntry>>,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols for `snapshot`, re-extracting synchronously when the cached
    /// entry was built from a different version. Files of no supported
    /// language get `None`.
    pub fn get(
        &self,
        snapshot: &Snapshot,
    ) -> Option<Arc<CacheEntry>> {
        let language = snapshot.language()?;
        if let Some(entry) = self.entries.get(&snapshot.file)
            && entry.fingerprint == snapshot.fingerprint
            && entry.language == language
        {
            return Some(Arc::clone(entry.value()));
        }

        let tree = super::extract(language, &snapshot.document.text, &never_cancelled).ok()?;
        let entry = Arc::new(CacheEntry {
            file: snapshot.file.clone(),
            fingerprint: snapshot.fingerprint,
            language,
            document: snapshot.document.clone(),
            tree,
        });
        self.entries.insert(snapshot.file.clone(), Arc::clone(&entry));
        Some(entry)
    }

    /// Drop the entry so the next `get` rebuilds it.
    pub fn invalidate(
        &self,
        file: &FileId,
    ) {
        if self.entries.remove(file).is_some() {
            debug!("[symbols] invalidated {file}");
        }
    }

    /// Forget a deleted file.
    pub fn remove(
        &self,
        file: &FileId,
    ) -> bool {
        let removed = self.entries.remove(file).is_some();
        if removed {
            debug!("[symbols] removed {file}");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/cache_tests.rs"]
mod tests;
