use tower_lsp::lsp_types::{Hover, Range, Url};

use crate::definition::SymbolMatch;
use crate::document::Document;
use crate::symbols::{Symbol, SymbolKind};

use super::builtins::{code_block, markdown_hover};

/// The `//` lines or the block comment directly above `line`. A blank line
/// ends the comment.
pub fn doc_comment(
    document: &Document,
    line: usize,
) -> Option<String> {
    let mut comments: Vec<String> = Vec::new();
    let mut current = line;
    while current > 0 {
        current -= 1;
        let raw = document.line_text(current).unwrap_or_default();
        let trimmed = raw.trim();
        if let Some(comment) = trimmed.strip_prefix("//") {
            comments.push(comment.strip_prefix(' ').unwrap_or(comment).trim().to_string());
            continue;
        }
        if trimmed.ends_with("*/") {
            let mut block = Vec::new();
            loop {
                let raw = document.line_text(current).unwrap_or_default();
                block.push(raw);
                if raw.contains("/*") || current == 0 {
                    break;
                }
                current -= 1;
            }
            block.reverse();
            let cleaned: Vec<String> = block
                .join("\n")
                .replace("/**", "")
                .replace("/*", "")
                .replace("*/", "")
                .lines()
                .map(|line| {
                    let line = line.trim();
                    line.strip_prefix('*').map_or(line, str::trim_start).to_string()
                })
                .filter(|line| !line.is_empty())
                .collect();
            if !cleaned.is_empty() {
                comments.push(cleaned.join("\n"));
            }
        }
        break;
    }
    comments.reverse();
    (!comments.is_empty()).then(|| comments.join("\n"))
}

fn header(symbol: &Symbol) -> String {
    let label = match symbol.kind {
        SymbolKind::Function | SymbolKind::Method => "Function",
        SymbolKind::Struct if matches!(symbol.detail.as_str(), "cbuffer" | "tbuffer") => "Constant Buffer",
        SymbolKind::Struct | SymbolKind::Class => "Struct",
        SymbolKind::Variable => "Variable",
        SymbolKind::Field => "Field",
        SymbolKind::Constant => "Macro",
        SymbolKind::Module => "Include",
        _ => return format!("**{}**", symbol.name),
    };
    format!("**{label}** `{}`", symbol.name)
}

/// Declaration text shown in the hover code block.
pub fn declaration_text(found: &SymbolMatch) -> String {
    let symbol = found.symbol();
    let document = &found.entry.document;
    let line = document.line_of(symbol.range.start);
    let line_text = document.line_text(line).unwrap_or_default();

    match symbol.kind {
        SymbolKind::Function | SymbolKind::Method => {
            let start = document.line_start(line).unwrap_or(symbol.range.start);
            let text = &document.text[start..];
            let head = text.split('{').next().unwrap_or(text);
            let collapsed = head.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() { line_text.trim().to_string() } else { collapsed }
        },
        SymbolKind::Struct | SymbolKind::Class => {
            let keyword = if symbol.detail.is_empty() { "struct" } else { symbol.detail.as_str() };
            format!("{keyword} {}", symbol.name)
        },
        SymbolKind::Variable | SymbolKind::Field if !symbol.detail.is_empty() => {
            format!("{} {};", symbol.detail, symbol.name)
        },
        SymbolKind::Module => format!("#include \"{}\"", symbol.name),
        _ => line_text.trim().to_string(),
    }
}

/// Hover for a symbol defined in user code. The "Defined in" trailer is
/// added when the symbol lives outside `origin`.
pub(crate) fn make_hover_from_user_symbol(
    found: &SymbolMatch,
    origin: &Url,
    range: Option<Range>,
) -> Hover {
    let symbol = found.symbol();
    let document = &found.entry.document;
    let mut md = format!("{}\n\n", header(symbol));
    md.push_str(&code_block("hlsl", &declaration_text(found)));

    if let Some(comment) = doc_comment(document, document.line_of(symbol.range.start)) {
        md.push_str("\n---\n");
        md.push_str(&comment);
        md.push('\n');
    }
    if found.uri() != origin {
        md.push_str(&format!("\n*Defined in: {}*", document.file_name()));
    }
    markdown_hover(md, range)
}

/// ShaderLab rendering: the declaration as written, with continuation
/// lines de-indented by the column the declaration starts at.
pub fn shaderlab_declaration(found: &SymbolMatch) -> String {
    let symbol = found.symbol();
    let document = &found.entry.document;
    let line_start = document.line_start(document.line_of(symbol.range.start)).unwrap_or(symbol.range.start);
    let indent = symbol.range.start.saturating_sub(line_start);

    let raw = symbol.range.slice(&document.text).replace("\r\n", "\n");
    let text = match symbol.kind {
        SymbolKind::Method | SymbolKind::Function => raw.split('{').next().unwrap_or_default().trim_end().to_string(),
        _ => raw,
    };
    let mut lines = text.lines();
    let mut out: Vec<String> = lines.next().map(str::to_string).into_iter().collect();
    for line in lines {
        let strip = line.bytes().take(indent).take_while(u8::is_ascii_whitespace).count();
        out.push(line[strip..].to_string());
    }
    let mut text = out.join("\n");
    if symbol.kind == SymbolKind::Variable {
        text.push(';');
    }
    text
}

pub(crate) fn make_shaderlab_symbol_hover(
    found: &SymbolMatch,
    range: Option<Range>,
) -> Hover {
    markdown_hover(code_block("shaderlab", &shaderlab_declaration(found)), range)
}
