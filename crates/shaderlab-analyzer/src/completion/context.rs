use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::class_at;

static INCLUDE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"#\s*include\s*["<][^">]*$"#).unwrap());
static MEMBER_ACCESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\.\s*\w*$").unwrap());
static SEMANTIC: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*\w*$").unwrap());

/// Describes the syntactic context at the cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CursorContext {
    /// Inside a comment or an `#include` path; nothing is offered.
    Silent,
    /// After `ident.` (struct field or swizzle).
    MemberAccess {
        receiver: String,
    },
    /// After `:` in a declaration.
    Semantic,
    General,
}

/// Classify the cursor at byte `offset` of `text`.
pub(crate) fn detect_context(
    text: &str,
    offset: usize,
) -> CursorContext {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    if class_at(text, offset).is_comment() {
        return CursorContext::Silent;
    }

    let line_start = text[..offset].rfind('\n').map_or(0, |newline| newline + 1);
    let prefix = &text[line_start..offset];
    if INCLUDE_PATH.is_match(prefix) {
        return CursorContext::Silent;
    }

    if let Some(captures) = MEMBER_ACCESS.captures(prefix)
        && let Some(receiver) = captures.get(1)
    {
        return CursorContext::MemberAccess {
            receiver: receiver.as_str().to_owned(),
        };
    }

    if SEMANTIC.is_match(prefix) && !prefix.trim_end().ends_with("::") {
        return CursorContext::Semantic;
    }

    CursorContext::General
}

#[cfg(test)]
#[path = "../../tests/src/completion/context_tests.rs"]
mod tests;
