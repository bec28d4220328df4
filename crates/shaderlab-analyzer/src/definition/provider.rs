//! Go-to-definition for HLSL and ShaderLab documents.

use std::iter;
use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::lsp_types::{LocationLink, Position, Url};
use tracing::debug;

use crate::includes::{include_at, parse_includes};
use crate::symbols::{CacheEntry, SymbolId, SymbolKind, is_code_region, is_include_region};
use crate::syntax::{ShaderLanguage, TextRange, class_at};

use super::chain::{IncludeGraph, SymbolMatch, WorkspaceScan};

/// Built-in Unity header searched last for ShaderLab documents.
pub const UNITY_CG_INCLUDE: &str = "UnityCG.cginc";

/// File extensions that show up as words inside include paths.
const EXTENSION_WORDS: &[&str] = &["hlsl", "hlsli", "cginc", "compute", "shader"];

/// The identifier under the cursor and the symbol it names.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub word: String,
    pub origin: TextRange,
    pub target: SymbolMatch,
}

/// Whether `word` can name a declaration at all.
pub fn is_navigable_word(word: &str) -> bool {
    !word.is_empty()
        && !word.bytes().all(|b| b.is_ascii_digit())
        && !EXTENSION_WORDS.iter().any(|ext| ext.eq_ignore_ascii_case(word))
}

/// Whether `offset` sits in a comment, either on a `//` line or inside a
/// block comment.
pub fn is_in_comment(
    entry: &CacheEntry,
    offset: usize,
) -> bool {
    let document = &entry.document;
    let line = document.line_text(document.line_of(offset)).unwrap_or_default();
    line.trim_start().starts_with("//") || class_at(&document.text, offset).is_comment()
}

pub struct DefinitionProvider {
    graph: IncludeGraph,
}

impl DefinitionProvider {
    pub fn new(graph: IncludeGraph) -> Self {
        Self {
            graph,
        }
    }

    pub fn graph(&self) -> &IncludeGraph {
        &self.graph
    }

    /// `textDocument/definition`. `fallback` enables the workspace-wide
    /// scan for HLSL documents.
    pub fn provide(
        &self,
        uri: &Url,
        position: Position,
        fallback: Option<WorkspaceScan<'_>>,
    ) -> Option<Vec<LocationLink>> {
        let entry = self.graph.entry(uri)?;
        let resolved = self.resolve(&entry, position, fallback)?;
        let origin = entry.document.range_of(resolved.origin);
        Some(vec![resolved.target.location_link(Some(origin))])
    }

    pub fn resolve(
        &self,
        entry: &Arc<CacheEntry>,
        position: Position,
        fallback: Option<WorkspaceScan<'_>>,
    ) -> Option<Resolved> {
        let offset = entry.document.offset_of(position)?;
        let text = &entry.document.text;
        if include_at(&parse_includes(text), offset).is_some() {
            debug!("[goto-def] cursor is inside an include path");
            return None;
        }
        let origin = entry.document.word_range_at(offset)?;
        let word = origin.slice(text);
        if !is_navigable_word(word) {
            debug!("[goto-def] skipping non-navigable word: {word}");
            return None;
        }
        debug!("[goto-def] word={word} at {}:{}", position.line, position.character);

        let target = match entry.language {
            ShaderLanguage::Hlsl => {
                if is_in_comment(entry, offset) {
                    debug!("[goto-def] skipping word in comment: {word}");
                    return None;
                }
                self.find_hlsl(entry, offset, word, fallback)
            },
            ShaderLanguage::ShaderLab => self.find_shaderlab(entry, offset, word),
        };
        let Some(target) = target else {
            debug!("[goto-def] no definition found for {word}");
            return None;
        };
        Some(Resolved {
            word: word.to_owned(),
            origin,
            target,
        })
    }

    /// HLSL lookup: symbols of the declarations enclosing `offset`, then the
    /// include chain of `entry`, then the workspace when `fallback` is set.
    pub fn find_hlsl(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
        name: &str,
        fallback: Option<WorkspaceScan<'_>>,
    ) -> Option<SymbolMatch> {
        let tree = &entry.tree;
        for scope in tree.stack_at(offset).into_iter().rev() {
            if let Some(id) = tree.find_child(Some(scope), name) {
                debug!("[goto-def] TIER-1 (enclosing scope): hit");
                return Some(SymbolMatch {
                    entry: Arc::clone(entry),
                    id,
                });
            }
        }

        if let Some(found) = self.graph.find(Arc::clone(entry), name) {
            debug!("[goto-def] TIER-2 (include chain): hit in {}", found.entry.document.file_name());
            return Some(found);
        }

        let scan = fallback?;
        let found = self.graph.find_in_workspace(name, scan);
        if found.is_some() {
            debug!("[goto-def] TIER-3 (workspace scan): hit");
        }
        found
    }

    /// ShaderLab lookup: every level of the symbol stack at `offset` from
    /// the innermost outwards, including shared `CGINCLUDE`/`HLSLINCLUDE`
    /// regions at each level; then the headers included by embedded code;
    /// then `UnityCG.cginc` from the library root.
    pub fn find_shaderlab(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
        name: &str,
    ) -> Option<SymbolMatch> {
        let tree = &entry.tree;
        let found = |id: SymbolId| SymbolMatch {
            entry: Arc::clone(entry),
            id,
        };

        let stack = tree.stack_at(offset);
        for level in stack.into_iter().rev().map(Some).chain(iter::once(None)) {
            if let Some(id) = tree.find_child(level, name) {
                debug!("[goto-def] TIER-1 (symbol stack): hit");
                return Some(found(id));
            }
            let shared = tree.level(level).iter().copied().filter(|id| {
                let symbol = tree.get(*id);
                symbol.kind == SymbolKind::Package && is_include_region(&symbol.name)
            });
            for region in shared {
                if let Some(id) = tree.find_child(Some(region), name) {
                    debug!("[goto-def] TIER-1 (shared region): hit");
                    return Some(found(id));
                }
            }
        }

        let includes = self.region_includes(entry);
        if !includes.is_empty()
            && let Some(hit) = self.graph.find_in_includes(entry, includes, name)
        {
            debug!("[goto-def] TIER-2 (region includes): hit in {}", hit.entry.document.file_name());
            return Some(hit);
        }

        let library = self.graph.resolver().config().cg_includes_path.clone()?;
        let unity = self.graph.entry_at_path(&library.join(UNITY_CG_INCLUDE))?;
        let hit = self.graph.find(unity, name);
        if hit.is_some() {
            debug!("[goto-def] TIER-3 ({UNITY_CG_INCLUDE}): hit");
        }
        hit
    }

    /// Resolved files of the `#include` directives inside embedded code
    /// regions of a ShaderLab document.
    pub fn region_includes(
        &self,
        entry: &CacheEntry,
    ) -> Vec<PathBuf> {
        let Ok(source) = entry.document.uri.to_file_path() else {
            return Vec::new();
        };
        let tree = &entry.tree;
        let regions: Vec<TextRange> = tree
            .preorder()
            .into_iter()
            .map(|id| tree.get(id))
            .filter(|symbol| is_code_region(symbol))
            .map(|symbol| symbol.range)
            .collect();
        parse_includes(&entry.document.text)
            .into_iter()
            .filter(|directive| regions.iter().any(|region| region.contains_range(directive.range)))
            .filter_map(|directive| self.graph.resolver().resolve(&source, &directive.path))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/provider_tests.rs"]
mod tests;
