//! Backward scan from the cursor to the call it sits in.

use crate::syntax::{mask_comments, never_cancelled};

/// Words that open a parenthesised list without being a call.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "return"];

/// The open call around the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub name: String,
    /// Zero-based index of the argument the cursor is in.
    pub active_parameter: u32,
}

/// Find the innermost unclosed call before `offset`.
///
/// Commas count only at the call's own nesting depth; a `;`, `{` or `}` at
/// that depth means the cursor is not inside a call.
pub fn call_at(
    text: &str,
    offset: usize,
) -> Option<CallSite> {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let masked = mask_comments(&text[..end], &never_cancelled).ok()?;
    let bytes = masked.as_bytes();

    let mut depth = 0usize;
    let mut active_parameter = 0u32;
    let mut open = None;
    for index in (0..bytes.len()).rev() {
        match bytes[index] {
            b')' => depth += 1,
            b'(' if depth == 0 => {
                open = Some(index);
                break;
            },
            b'(' => depth -= 1,
            b',' if depth == 0 => active_parameter += 1,
            b';' | b'{' | b'}' if depth == 0 => return None,
            _ => {},
        }
    }

    let before = masked[..open?].trim_end();
    let start = before.rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).map_or(0, |index| index + 1);
    let name = &before[start..];
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) || CONTROL_KEYWORDS.contains(&name) {
        return None;
    }
    Some(CallSite {
        name: name.to_owned(),
        active_parameter,
    })
}

#[cfg(test)]
#[path = "../../tests/src/signature_help/call_tests.rs"]
mod tests;
