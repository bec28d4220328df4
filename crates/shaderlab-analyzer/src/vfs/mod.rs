//! File identity and the read path shared by every provider: open documents
//! first, the file system second.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Url;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::document::{Document, DocumentStore};
use crate::syntax::{ShaderLanguage, is_shader_family_file};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    pub fn from_path(path: &Path) -> Self {
        Self(normalized_path(path).display().to_string())
    }

    pub fn from_url(url: &Url) -> Self {
        if let Ok(path) = url.to_file_path() {
            return Self::from_path(&path);
        }
        Self(url.as_str().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalized_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Resolves `.` and `..` components without touching the file system.
/// A `..` above the root is dropped; leading `..` of a relative path stay.
pub fn lexically_normalized(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                },
                Some(Component::RootDir | Component::Prefix(_)) => {},
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// What a cached symbol tree was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// Client version of an open document.
    Version(i32),
    /// FNV-1a hash of a file read from disk.
    Content(u64),
}

/// FNV-1a over the UTF-8 bytes of `text`.
pub fn content_hash(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    text.bytes().fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// A document's text as seen by one query.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub file: FileId,
    pub document: Document,
    pub fingerprint: Fingerprint,
}

impl Snapshot {
    pub fn path(&self) -> Option<PathBuf> {
        self.document.uri.to_file_path().ok()
    }

    pub fn language(&self) -> Option<ShaderLanguage> {
        self.document.language
    }
}

/// Read access to shader sources.
#[derive(Debug, Clone)]
pub struct Vfs {
    documents: Arc<DocumentStore>,
}

impl Vfs {
    pub fn new(documents: Arc<DocumentStore>) -> Self {
        Self {
            documents,
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// The open document for `url`, or the file behind it.
    pub fn snapshot_url(
        &self,
        url: &Url,
    ) -> Option<Snapshot> {
        let file = FileId::from_url(url);
        if let Some(document) = self.documents.get(url).or_else(|| self.documents.get_by_file(&file)) {
            return Some(open_snapshot(file, document));
        }
        let path = url.to_file_path().ok()?;
        self.read_disk(&path, url.clone())
    }

    /// Like [`snapshot_url`](Self::snapshot_url) for a path as produced by
    /// include resolution or a workspace walk. The open buffer is matched by
    /// canonical file identity, not by spelling.
    pub fn snapshot_path(
        &self,
        path: &Path,
    ) -> Option<Snapshot> {
        let path = lexically_normalized(path);
        let file = FileId::from_path(&path);
        if let Some(document) = self.documents.get_by_file(&file) {
            return Some(open_snapshot(file, document));
        }
        let url = Url::from_file_path(&path).ok()?;
        self.read_disk(&path, url)
    }

    fn read_disk(
        &self,
        path: &Path,
        url: Url,
    ) -> Option<Snapshot> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                debug!("[vfs] cannot read {}: {error}", path.display());
                return None;
            },
        };
        let fingerprint = Fingerprint::Content(content_hash(&text));
        Some(Snapshot {
            file: FileId::from_path(path),
            document: Document::new(url, text, 0),
            fingerprint,
        })
    }
}

fn open_snapshot(
    file: FileId,
    document: Document,
) -> Snapshot {
    Snapshot {
        file,
        fingerprint: Fingerprint::Version(document.version),
        document,
    }
}

/// Existence check used by include resolution.
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Whether `path` matches one of the configured exclusion fragments. A
/// fragment matches a whole path component or any substring of the
/// forward-slash form of the path.
pub fn is_excluded(
    path: &Path,
    excludes: &[String],
) -> bool {
    if excludes.is_empty() {
        return false;
    }
    let display = path.to_string_lossy().replace('\\', "/");
    excludes.iter().any(|fragment| {
        let fragment = fragment.trim_matches('/');
        !fragment.is_empty()
            && (display.contains(fragment) || path.components().any(|part| part.as_os_str() == fragment))
    })
}

fn should_descend(
    entry: &DirEntry,
    excludes: &[String],
) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
    {
        return false;
    }
    !is_excluded(entry.path(), excludes)
}

/// Shader-family files under `roots`, in walk order, at most `max_files` of
/// them. Stops early once `is_cancelled` reports true.
pub fn discover_shader_files(
    roots: &[PathBuf],
    max_files: usize,
    excludes: &[String],
    is_cancelled: &dyn Fn() -> bool,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    'roots: for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| should_descend(entry, excludes))
            .filter_map(|entry| entry.ok())
        {
            if is_cancelled() {
                debug!("[vfs] workspace walk cancelled after {} file(s)", files.len());
                break 'roots;
            }
            if !entry.file_type().is_file() || !is_shader_family_file(entry.path()) {
                continue;
            }
            let normalized = normalized_path(entry.path());
            if seen.insert(normalized.clone()) {
                files.push(normalized);
            }
            if files.len() >= max_files {
                debug!("[vfs] workspace walk capped at {max_files} file(s)");
                break 'roots;
            }
        }
    }
    files
}

#[cfg(test)]
#[path = "../../tests/src/vfs/mod_tests.rs"]
mod tests;
