//! Include-chain traversal and the workspace-wide fallback.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tower_lsp::lsp_types::{Location, LocationLink, Range, Url};
use tracing::debug;

use crate::includes::{IncludeResolver, parse_includes};
use crate::symbols::{CacheEntry, Symbol, SymbolCache, SymbolId};
use crate::vfs::{self, FileId, Vfs};

/// A symbol together with the cached file it was found in.
#[derive(Debug, Clone)]
pub struct SymbolMatch {
    pub entry: Arc<CacheEntry>,
    pub id: SymbolId,
}

impl SymbolMatch {
    pub fn symbol(&self) -> &Symbol {
        self.entry.tree.get(self.id)
    }

    pub fn uri(&self) -> &Url {
        &self.entry.document.uri
    }

    pub fn location_link(
        &self,
        origin: Option<Range>,
    ) -> LocationLink {
        let symbol = self.symbol();
        LocationLink {
            origin_selection_range: origin,
            target_uri: self.uri().clone(),
            target_range: self.entry.document.range_of(symbol.range),
            target_selection_range: self.entry.document.range_of(symbol.selection_range),
        }
    }

    pub fn location(&self) -> Location {
        Location {
            uri: self.uri().clone(),
            range: self.entry.document.range_of(self.symbol().selection_range),
        }
    }
}

/// Bounds of a workspace-wide scan.
#[derive(Clone, Copy)]
pub struct WorkspaceScan<'a> {
    pub roots: &'a [PathBuf],
    pub max_files: usize,
    pub excludes: &'a [String],
    pub is_cancelled: &'a dyn Fn() -> bool,
}

/// Cached symbol trees of files connected by `#include` directives.
#[derive(Clone)]
pub struct IncludeGraph {
    vfs: Vfs,
    cache: Arc<SymbolCache>,
    resolver: Arc<IncludeResolver>,
}

impl IncludeGraph {
    pub fn new(
        vfs: Vfs,
        cache: Arc<SymbolCache>,
        resolver: Arc<IncludeResolver>,
    ) -> Self {
        Self {
            vfs,
            cache,
            resolver,
        }
    }

    pub fn resolver(&self) -> &IncludeResolver {
        &self.resolver
    }

    pub fn entry(
        &self,
        uri: &Url,
    ) -> Option<Arc<CacheEntry>> {
        let snapshot = self.vfs.snapshot_url(uri)?;
        self.cache.get(&snapshot)
    }

    pub fn entry_at_path(
        &self,
        path: &Path,
    ) -> Option<Arc<CacheEntry>> {
        let snapshot = self.vfs.snapshot_path(path)?;
        self.cache.get(&snapshot)
    }

    /// Files named by the include directives of `entry`, in directive
    /// order. Unresolved directives are skipped.
    pub fn resolved_includes(
        &self,
        entry: &CacheEntry,
    ) -> Vec<PathBuf> {
        let Ok(source) = entry.document.uri.to_file_path() else {
            return Vec::new();
        };
        parse_includes(&entry.document.text)
            .iter()
            .filter_map(|directive| self.resolver.resolve(&source, &directive.path))
            .collect()
    }

    /// Visit `start` and every file reachable through its includes, depth
    /// first in directive order. Each file is visited at most once, so
    /// cyclic includes terminate. `visit` receives the include depth.
    pub fn walk<B>(
        &self,
        start: Arc<CacheEntry>,
        mut visit: impl FnMut(&Arc<CacheEntry>, usize) -> ControlFlow<B>,
    ) -> Option<B> {
        if let ControlFlow::Break(found) = visit(&start, 0) {
            return Some(found);
        }
        let includes = self.resolved_includes(&start);
        self.walk_includes(&start, includes, visit)
    }

    /// Like [`walk`](Self::walk), but starting from an explicit list of
    /// files included by `start`. `start` itself is not visited.
    pub fn walk_includes<B>(
        &self,
        start: &CacheEntry,
        includes: Vec<PathBuf>,
        mut visit: impl FnMut(&Arc<CacheEntry>, usize) -> ControlFlow<B>,
    ) -> Option<B> {
        let mut visited: HashSet<FileId> = HashSet::new();
        visited.insert(start.file.clone());

        let mut pending: Vec<(PathBuf, usize)> = includes.into_iter().rev().map(|path| (path, 1)).collect();
        while let Some((path, depth)) = pending.pop() {
            if !visited.insert(FileId::from_path(&path)) {
                continue;
            }
            let Some(entry) = self.entry_at_path(&path) else {
                debug!("[chain] cannot load {}", path.display());
                continue;
            };
            if let ControlFlow::Break(found) = visit(&entry, depth) {
                return Some(found);
            }
            pending.extend(self.resolved_includes(&entry).into_iter().rev().map(|path| (path, depth + 1)));
        }
        None
    }

    /// First symbol named `name` in the include chain of `start`.
    pub fn find(
        &self,
        start: Arc<CacheEntry>,
        name: &str,
    ) -> Option<SymbolMatch> {
        self.walk(start, |entry, _| match entry.find_by_name(name) {
            Some(id) => ControlFlow::Break(SymbolMatch {
                entry: Arc::clone(entry),
                id,
            }),
            None => ControlFlow::Continue(()),
        })
    }

    /// First symbol named `name` in the files reachable from `includes`.
    pub fn find_in_includes(
        &self,
        start: &CacheEntry,
        includes: Vec<PathBuf>,
        name: &str,
    ) -> Option<SymbolMatch> {
        self.walk_includes(start, includes, |entry, _| match entry.find_by_name(name) {
            Some(id) => ControlFlow::Break(SymbolMatch {
                entry: Arc::clone(entry),
                id,
            }),
            None => ControlFlow::Continue(()),
        })
    }

    /// First symbol named `name` accepted by `accept`.
    pub fn find_matching(
        &self,
        start: Arc<CacheEntry>,
        name: &str,
        accept: impl Fn(&Symbol) -> bool,
    ) -> Option<SymbolMatch> {
        self.walk(start, |entry, _| match first_accepted(entry, name, &accept) {
            Some(id) => ControlFlow::Break(SymbolMatch {
                entry: Arc::clone(entry),
                id,
            }),
            None => ControlFlow::Continue(()),
        })
    }

    /// Every symbol named `name` accepted by `accept`, in traversal order.
    pub fn find_all(
        &self,
        start: Arc<CacheEntry>,
        name: &str,
        accept: impl Fn(&Symbol) -> bool,
    ) -> Vec<SymbolMatch> {
        let mut found = Vec::new();
        self.walk::<()>(start, |entry, _| {
            for id in entry.tree.find_all_by_name(name) {
                if accept(entry.tree.get(id)) {
                    found.push(SymbolMatch {
                        entry: Arc::clone(entry),
                        id,
                    });
                }
            }
            ControlFlow::Continue(())
        });
        found
    }

    /// First symbol named `name` in any shader-family file of the
    /// workspace. Cancellation is polled between files.
    pub fn find_in_workspace(
        &self,
        name: &str,
        scan: WorkspaceScan<'_>,
    ) -> Option<SymbolMatch> {
        let files = vfs::discover_shader_files(scan.roots, scan.max_files, scan.excludes, scan.is_cancelled);
        for path in files {
            if (scan.is_cancelled)() {
                debug!("[chain] workspace lookup for '{name}' cancelled");
                return None;
            }
            let Some(entry) = self.entry_at_path(&path) else {
                continue;
            };
            if let Some(id) = entry.find_by_name(name) {
                return Some(SymbolMatch {
                    entry,
                    id,
                });
            }
        }
        None
    }
}

fn first_accepted(
    entry: &CacheEntry,
    name: &str,
    accept: &impl Fn(&Symbol) -> bool,
) -> Option<SymbolId> {
    if let Some(id) = entry.find_by_name(name)
        && accept(entry.tree.get(id))
    {
        return Some(id);
    }
    entry.tree.find_all_by_name(name).into_iter().find(|id| accept(entry.tree.get(*id)))
}

#[cfg(test)]
#[path = "../../tests/src/definition/chain_tests.rs"]
mod tests;
