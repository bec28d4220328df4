//! Local variable recovery around a cursor.
//!
//! Works on a bounded window of text before the cursor: the innermost open
//! block is scanned for declarations, then the parameter list in front of
//! that block. Block declarations are listed before parameters and a name is
//! reported once, so a local shadows a parameter of the same name.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::hlsl::builtins::keywords;
use crate::syntax::{mask_comments, never_cancelled};

/// Bytes scanned backwards from the cursor.
pub const SCOPE_WINDOW: usize = 5000;

static LOCAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_]\w*(?:\s*<\s*[\w\s,]+\s*>)?)\s+([A-Za-z_]\w*)(?:\s*\[[^\]]*\])?\s*[=;,]").unwrap()
});

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:in|out|inout|uniform|const)\s+)*([A-Za-z_]\w*(?:\s*<\s*[\w\s,]+\s*>)?)\s+([A-Za-z_]\w*)").unwrap()
});

static TRAILING_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s*$").unwrap());

static SEMANTIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*\w+$").unwrap());

const CONTROL_HEADS: &[&str] = &["if", "for", "while", "switch"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOrigin {
    Block,
    Parameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLocal {
    pub name: String,
    pub type_name: String,
    pub origin: LocalOrigin,
}

fn is_keyword(word: &str) -> bool {
    keywords::all_keywords().any(|keyword| keyword == word)
}

/// Comment-free text of the scan window ending at `offset`.
fn window(
    text: &str,
    offset: usize,
) -> String {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut start = end.saturating_sub(SCOPE_WINDOW);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    let slice = &text[start..end];
    mask_comments(slice, &never_cancelled).unwrap_or_else(|_| slice.to_owned())
}

/// Index of the innermost `{` that is still open at the end of `text`.
fn open_block(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, byte) in text.bytes().enumerate().rev() {
        match byte {
            b'}' => depth += 1,
            b'{' if depth == 0 => return Some(index),
            b'{' => depth -= 1,
            _ => {},
        }
    }
    None
}

/// `text` with the content of every closed `{}` block blanked out, so
/// declarations of finished inner blocks are not seen.
fn top_level(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth > 0 && ch != '\n' => {
                out.push(' ');
                continue;
            },
            _ => {},
        }
        out.push(ch);
    }
    out
}

/// The parenthesised list that ends right before `block_open`, with the
/// word in front of it.
fn header_before(
    text: &str,
    block_open: usize,
) -> Option<(&str, &str)> {
    let mut before = text[..block_open].trim_end();
    if !before.ends_with(')')
        && let Some(semantic) = SEMANTIC_SUFFIX.find(before)
    {
        before = before[..semantic.start()].trim_end();
    }
    if !before.ends_with(')') {
        return None;
    }
    let close = before.len() - 1;
    let mut depth = 0usize;
    let mut open = None;
    for (index, byte) in before.bytes().enumerate().take(close).rev() {
        match byte {
            b')' => depth += 1,
            b'(' if depth == 0 => {
                open = Some(index);
                break;
            },
            b'(' => depth -= 1,
            _ => {},
        }
    }
    let open = open?;
    let head = TRAILING_WORD.captures(&before[..open]).and_then(|c| c.get(1)).map_or("", |m| m.as_str());
    Some((head, &before[open + 1..close]))
}

fn push_local(
    locals: &mut Vec<ScopeLocal>,
    seen: &mut HashSet<String>,
    type_name: &str,
    name: &str,
    origin: LocalOrigin,
) {
    if is_keyword(type_name) || !seen.insert(name.to_owned()) {
        return;
    }
    locals.push(ScopeLocal {
        name: name.to_owned(),
        type_name: type_name.split_whitespace().collect::<Vec<_>>().join(""),
        origin,
    });
}

fn push_declarations(
    locals: &mut Vec<ScopeLocal>,
    seen: &mut HashSet<String>,
    text: &str,
) {
    for captures in LOCAL.captures_iter(text) {
        if let (Some(ty), Some(name)) = (captures.get(1), captures.get(2)) {
            push_local(locals, seen, ty.as_str(), name.as_str(), LocalOrigin::Block);
        }
    }
}

/// Variables visible at `offset`: block declarations first, then the
/// parameters of the block's header.
pub fn locals_in_scope(
    text: &str,
    offset: usize,
) -> Vec<ScopeLocal> {
    let window = window(text, offset);
    let mut locals = Vec::new();
    let mut seen = HashSet::new();

    let open = open_block(&window);
    let body = top_level(open.map_or(window.as_str(), |open| &window[open + 1..]));
    push_declarations(&mut locals, &mut seen, &body);

    if let Some(open) = open
        && let Some((head, list)) = header_before(&window, open)
    {
        if head == "for" {
            push_declarations(&mut locals, &mut seen, list);
        } else if !CONTROL_HEADS.contains(&head) {
            for piece in list.split(',') {
                if let Some(captures) = PARAM.captures(piece.trim())
                    && let (Some(ty), Some(name)) = (captures.get(1), captures.get(2))
                {
                    push_local(&mut locals, &mut seen, ty.as_str(), name.as_str(), LocalOrigin::Parameter);
                }
            }
        }
    }
    locals
}

/// Declared type of `name` as seen from `offset`.
///
/// Scope locals are consulted first; otherwise the nearest preceding
/// `Type name` declaration inside the window is used.
pub fn variable_type(
    text: &str,
    offset: usize,
    name: &str,
) -> Option<String> {
    if let Some(local) = locals_in_scope(text, offset).into_iter().find(|local| local.name == name) {
        return Some(local.type_name);
    }

    let pattern = Regex::new(&format!(r"\b([A-Za-z_]\w*)\s+{}\s*[=;,):\[]", regex::escape(name))).ok()?;
    let window = window(text, offset);
    pattern
        .captures_iter(&window)
        .filter_map(|captures| captures.get(1))
        .map(|ty| ty.as_str())
        .filter(|ty| !is_keyword(ty))
        .last()
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "../../tests/src/definition/scope_tests.rs"]
mod tests;
