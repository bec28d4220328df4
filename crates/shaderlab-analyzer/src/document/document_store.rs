use dashmap::DashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use crate::vfs::FileId;

use super::Document;

/// Thread-safe store of all open documents.
///
/// Uses `DashMap` internally so that all operations are safe to call
/// concurrently from any async task without external synchronisation.
/// Documents are also indexed by canonical file identity, so a path spelled
/// differently from the client's URI still finds the open buffer.
#[derive(Debug)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
    by_file: DashMap<FileId, Url>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            by_file: DashMap::new(),
        }
    }

    /// Open (register) a new document. `language_id` comes from `didOpen`.
    pub fn open(
        &self,
        uri: Url,
        text: String,
        version: i32,
        language_id: &str,
    ) {
        let document = Document::new(uri.clone(), text, version).with_language_id(language_id);
        self.by_file.insert(FileId::from_url(&uri), uri.clone());
        self.documents.insert(uri, document);
    }

    /// Apply incremental or full-content changes to an already-open document.
    /// Returns `false` when the document is not tracked.
    pub fn apply_changes(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut doc) => {
                doc.apply_changes(changes, version);
                true
            },
            None => false,
        }
    }

    /// Close (unregister) a document.
    pub fn close(
        &self,
        uri: &Url,
    ) {
        self.documents.remove(uri);
        self.by_file.retain(|_, open| open != uri);
    }

    /// Return a clone of the full `Document`, if the URI is tracked.
    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.get(uri).map(|r| r.value().clone())
    }

    /// The open document backed by `file`, whatever URI it was opened with.
    pub fn get_by_file(
        &self,
        file: &FileId,
    ) -> Option<Document> {
        let uri = self.by_file.get(file).map(|r| r.value().clone())?;
        self.get(&uri)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
