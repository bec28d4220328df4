use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind,
};

use crate::hlsl::builtins::{BuiltinEntry, BuiltinKind, ShaderStage, TypeCategory};

/// Detail shown for keywords that only make sense in compute shaders.
const COMPUTE_KEYWORD_DETAIL: &str = "Compute Shader Keyword";
const COMPUTE_KEYWORDS: &[&str] = &["numthreads", "groupshared"];
const RW_TEXTURE_DETAIL: &str = "HLSL RW Texture (Compute Shader)";

pub(crate) fn builtin_to_completion_item(
    entry: &BuiltinEntry,
    sort_prefix: &str,
) -> CompletionItem {
    let kind = match entry.kind {
        BuiltinKind::Keyword => CompletionItemKind::KEYWORD,
        BuiltinKind::Type => CompletionItemKind::CLASS,
        BuiltinKind::Function => CompletionItemKind::FUNCTION,
        BuiltinKind::Semantic => CompletionItemKind::CONSTANT,
        BuiltinKind::Snippet => CompletionItemKind::SNIPPET,
    };

    let insert_text_format =
        if entry.is_snippet || entry.insert_text.as_ref().is_some_and(|t| t.contains('$')) {
            Some(InsertTextFormat::SNIPPET)
        } else {
            Some(InsertTextFormat::PLAIN_TEXT)
        };

    CompletionItem {
        label: entry.label.clone(),
        kind: Some(kind),
        detail: Some(entry.detail.clone()),
        documentation: markdown(&entry.documentation),
        insert_text: entry.insert_text.clone(),
        insert_text_format,
        sort_text: Some(format!("{}_{}", sort_prefix, entry.label)),
        ..Default::default()
    }
}

pub(crate) fn markdown(value: &str) -> Option<Documentation> {
    if value.is_empty() {
        return None;
    }
    Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.to_string(),
    }))
}

/// Builtin types sort by category: scalars first, buffers last.
pub(crate) fn type_item(entry: &BuiltinEntry) -> CompletionItem {
    let category = entry.type_category.unwrap_or(TypeCategory::Buffer);
    let mut item = builtin_to_completion_item(entry, &category.sort_index().to_string());
    if category == TypeCategory::RwTexture {
        item.detail = Some(RW_TEXTURE_DETAIL.to_string());
    }
    item
}

pub(crate) fn keyword_item(entry: &BuiltinEntry) -> CompletionItem {
    let mut item = builtin_to_completion_item(entry, "7");
    if COMPUTE_KEYWORDS.contains(&entry.label.as_str()) {
        item.detail = Some(COMPUTE_KEYWORD_DETAIL.to_string());
    }
    item
}

pub(crate) fn function_item(entry: &BuiltinEntry) -> CompletionItem {
    let category = entry.function_category.map_or(0, |category| category.sort_index());
    let mut item = builtin_to_completion_item(entry, &format!("8_{category}"));
    if let Some(category) = entry.function_category {
        item.label_details = Some(tower_lsp::lsp_types::CompletionItemLabelDetails {
            detail: None,
            description: Some(category.as_str().to_string()),
        });
    }
    item
}

/// Semantic items; compute semantics sort to the top of compute shaders.
pub(crate) fn semantic_item(
    entry: &BuiltinEntry,
    compute: bool,
) -> CompletionItem {
    let prefix = if compute && entry.stage == Some(ShaderStage::Compute) { "0" } else { "9" };
    builtin_to_completion_item(entry, prefix)
}
