use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Range};

use crate::hlsl::builtins::{self, BuiltinEntry, BuiltinKind, ShaderLabFunction};

pub(crate) fn markdown_hover(
    value: String,
    range: Option<Range>,
) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range,
    }
}

pub(crate) fn code_block(
    language: &str,
    code: &str,
) -> String {
    format!("```{language}\n{code}\n```\n")
}

/// Signature block of a builtin function followed by its description.
pub(crate) fn make_hover_from_entry(
    entry: &BuiltinEntry,
    range: Option<Range>,
) -> Hover {
    let mut md = code_block("hlsl", if entry.detail.is_empty() { &entry.label } else { &entry.detail });
    if !entry.documentation.is_empty() {
        md.push('\n');
        md.push_str(&entry.documentation);
        md.push('\n');
    }
    if let Some(category) = entry.function_category {
        md.push_str(&format!("\n*(Function · {})*\n", category.as_str()));
    }
    markdown_hover(md, range)
}

/// A known semantic, matched case-insensitively; `TEXCOORD9` falls back to
/// the `TEXCOORD` family.
pub(crate) fn find_semantic(word: &str) -> Option<&'static BuiltinEntry> {
    if let Some(entry) = builtins::semantic(word) {
        return Some(entry);
    }
    let family = word.trim_end_matches(|c: char| c.is_ascii_digit());
    builtins::of_kind(BuiltinKind::Semantic)
        .find(|entry| entry.label.trim_end_matches(|c: char| c.is_ascii_digit()).eq_ignore_ascii_case(family))
}

pub(crate) fn make_semantic_hover(
    entry: &BuiltinEntry,
    range: Option<Range>,
) -> Hover {
    let stage = entry.stage.map_or("all", |stage| stage.as_str());
    let md = format!("**Semantic**: `{}`\n\n{}\n\n*Stage*: {stage}", entry.label, entry.documentation);
    markdown_hover(md, range)
}

pub(crate) fn make_shaderlab_function_hover(
    function: &ShaderLabFunction,
    range: Option<Range>,
) -> Hover {
    let mut md = code_block("shaderlab", function.signature);
    md.push_str(function.description);
    markdown_hover(md, range)
}
