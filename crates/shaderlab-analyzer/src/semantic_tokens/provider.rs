use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, Url};
use tracing::debug;

use crate::{
    definition::IncludeGraph,
    document::Document,
    semantic_tokens::{RawToken, encode_delta, mapping::declared_type_token},
    symbols::{CacheEntry, SymbolId, SymbolKind, is_code_region},
    syntax::{ShaderLanguage, TextRange},
};

/// Highlights struct, field and variable declarations inside the
/// `CGPROGRAM`/`HLSLPROGRAM`/... regions of ShaderLab documents.
pub struct SemanticTokenProvider {
    graph: IncludeGraph,
}

impl SemanticTokenProvider {
    pub fn new(graph: IncludeGraph) -> Self {
        Self {
            graph,
        }
    }

    /// `textDocument/semanticTokens/full`. HLSL documents get no tokens.
    pub fn provide(
        &self,
        uri: &Url,
    ) -> Vec<SemanticToken> {
        let Some(entry) = self.graph.entry(uri) else {
            return Vec::new();
        };
        if entry.language != ShaderLanguage::ShaderLab {
            return Vec::new();
        }
        let raw = region_tokens(&entry);
        debug!("[semantic-tokens] {} token(s) for {}", raw.len(), entry.document.file_name());
        encode_delta(raw)
    }
}

fn region_tokens(entry: &CacheEntry) -> Vec<RawToken> {
    let tree = &entry.tree;
    let document = &entry.document;
    let mut raw = Vec::new();
    for region in tree.preorder().into_iter().filter(|id| is_code_region(tree.get(*id))) {
        for id in descendants(entry, region) {
            let symbol = tree.get(id);
            match symbol.kind {
                SymbolKind::Struct => {
                    if let Some(keyword) = document.word_range_at(symbol.range.start) {
                        push(&mut raw, document, keyword, SemanticTokenType::MACRO);
                    }
                    push(&mut raw, document, symbol.selection_range, SemanticTokenType::STRUCT);
                },
                SymbolKind::Field | SymbolKind::Variable => {
                    if let Some(ty) = type_range(entry, id) {
                        push(&mut raw, document, ty, declared_type_token(ty.slice(&document.text)));
                    }
                    let name = if symbol.kind == SymbolKind::Field {
                        SemanticTokenType::PROPERTY
                    } else {
                        SemanticTokenType::VARIABLE
                    };
                    push(&mut raw, document, symbol.selection_range, name);
                },
                _ => {},
            }
        }
    }
    raw
}

/// Every symbol below `root`, parents before children.
fn descendants(
    entry: &CacheEntry,
    root: SymbolId,
) -> Vec<SymbolId> {
    let tree = &entry.tree;
    let mut out = Vec::new();
    let mut stack: Vec<SymbolId> = tree.children(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.children(id).iter().rev().copied());
    }
    out
}

/// The type word of a declaration: the detail's leading identifier where it
/// appears before the name, else the word the declaration starts with.
fn type_range(
    entry: &CacheEntry,
    id: SymbolId,
) -> Option<TextRange> {
    let symbol = entry.tree.get(id);
    let text = &entry.document.text;
    let type_name = symbol.detail.split(|c: char| !(c.is_alphanumeric() || c == '_')).next().unwrap_or_default();
    let head = text.get(symbol.range.start..symbol.selection_range.start).unwrap_or_default();
    if !type_name.is_empty()
        && let Some(at) = head.rmatch_indices(type_name).map(|(at, _)| at).find(|at| {
            let before = head[..*at].chars().next_back();
            let after = head[at + type_name.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
    {
        let start = symbol.range.start + at;
        return Some(TextRange::new(start, start + type_name.len()));
    }
    entry.document.word_range_at(symbol.range.start)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn push(
    raw: &mut Vec<RawToken>,
    document: &Document,
    range: TextRange,
    token_type: SemanticTokenType,
) {
    let range = document.range_of(range);
    if range.start.line != range.end.line || range.end.character <= range.start.character {
        return;
    }
    raw.push(RawToken {
        line: range.start.line,
        col: range.start.character,
        length: range.end.character - range.start.character,
        token_type,
    });
}

#[cfg(test)]
#[path = "../../tests/src/semantic_tokens/provider_tests.rs"]
mod tests;
