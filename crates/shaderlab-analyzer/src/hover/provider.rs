use std::sync::Arc;

use tower_lsp::lsp_types::{Hover, Position, Url};
use tracing::debug;

use crate::definition::{DefinitionProvider, WorkspaceScan, is_navigable_word};
use crate::hlsl::{self, builtins};
use crate::includes::{include_on_line, parse_includes};
use crate::symbols::CacheEntry;
use crate::syntax::ShaderLanguage;

use super::builtins::{
    code_block, find_semantic, make_hover_from_entry, make_semantic_hover, make_shaderlab_function_hover,
    markdown_hover,
};
use super::user_symbol::{make_hover_from_user_symbol, make_shaderlab_symbol_hover};

/// Provides hover information for HLSL and ShaderLab symbols.
pub struct HoverProvider {
    definition_provider: Arc<DefinitionProvider>,
}

impl HoverProvider {
    pub fn new(definition_provider: Arc<DefinitionProvider>) -> Self {
        Self {
            definition_provider,
        }
    }

    /// `fallback` enables the workspace-wide lookup for HLSL documents.
    pub fn provide(
        &self,
        uri: &Url,
        position: Position,
        fallback: Option<WorkspaceScan<'_>>,
    ) -> Option<Hover> {
        let entry = self.definition_provider.graph().entry(uri)?;
        let offset = entry.document.offset_of(position)?;
        match entry.language {
            ShaderLanguage::Hlsl => self.hover_hlsl(&entry, offset, fallback),
            ShaderLanguage::ShaderLab => self.hover_shaderlab(&entry, offset),
        }
    }

    fn hover_hlsl(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
        fallback: Option<WorkspaceScan<'_>>,
    ) -> Option<Hover> {
        let document = &entry.document;
        let text = &document.text;

        let directives = parse_includes(text);
        if let Some(directive) = include_on_line(&directives, text, offset) {
            return Some(self.include_hover(entry, &directive.path));
        }

        let word_range = document.word_range_at(offset)?;
        let word = word_range.slice(text);
        let range = Some(document.range_of(word_range));
        if hlsl::is_hlsl_keyword(word) {
            return None;
        }
        debug!("Hover requested for symbol: {word}");

        let line_start = document.line_start(document.line_of(word_range.start)).unwrap_or(0);
        let before = &text[line_start.min(word_range.start)..word_range.start];
        if before.trim_end().ends_with(':')
            && let Some(semantic) = find_semantic(word)
        {
            return Some(make_semantic_hover(semantic, range));
        }

        if let Some(function) = builtins::function(word) {
            return Some(make_hover_from_entry(function, range));
        }

        if !is_navigable_word(word) {
            return None;
        }
        let found = self.definition_provider.find_hlsl(entry, offset, word, fallback)?;
        Some(make_hover_from_user_symbol(&found, &document.uri, range))
    }

    fn include_hover(
        &self,
        entry: &CacheEntry,
        path: &str,
    ) -> Hover {
        let resolved = entry
            .document
            .uri
            .to_file_path()
            .ok()
            .and_then(|source| self.definition_provider.graph().resolver().resolve(&source, path));
        let mut md = String::from("**Include File**\n\n");
        md.push_str(&code_block("hlsl", &format!("#include \"{path}\"")));
        match resolved {
            Some(file) => md.push_str(&format!("\n{}", file.display())),
            None => md.push_str("\n*File not found in include paths*"),
        }
        markdown_hover(md, None)
    }

    /// Definitions in the current document first; otherwise the builtin
    /// function card.
    fn hover_shaderlab(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
    ) -> Option<Hover> {
        let document = &entry.document;
        let word_range = document.word_range_at(offset)?;
        let word = word_range.slice(&document.text);
        let range = Some(document.range_of(word_range));

        if let Some(found) = self.definition_provider.find_shaderlab(entry, offset, word)
            && found.uri() == &document.uri
        {
            return Some(make_shaderlab_symbol_hover(&found, range));
        }
        let function = builtins::shaderlab_function(word)?;
        Some(make_shaderlab_function_hover(function, range))
    }
}

#[cfg(test)]
#[path = "../../tests/src/hover/provider_tests.rs"]
mod tests;
