//! The built-in shader code formatter used for both HLSL and ShaderLab.
//!
//! Formatting runs in three stages over the document lines:
//! 1. each line is split into code and trailing comment, and the code is
//!    broken at braces and statement ends;
//! 2. the code of every line is re-spaced token by token;
//! 3. lines are re-indented from brace and `#if` nesting.
//!
//! String literals are never altered.

mod indent;
mod lines;
mod spacing;

use self::lines::Line;

pub const MIN_TAB_SIZE: u32 = 1;
pub const MAX_TAB_SIZE: u32 = 16;

/// Format `text` with `tab_size` spaces per indentation level, clamped to
/// `MIN_TAB_SIZE..=MAX_TAB_SIZE`. The result always ends with exactly one
/// newline.
pub fn format_code(
    text: &str,
    tab_size: u32,
) -> String {
    let tab_size = tab_size.clamp(MIN_TAB_SIZE, MAX_TAB_SIZE) as usize;
    let text = text.replace("\r\n", "\n").replace('\r', "");
    let mut formatted: Vec<Line> = lines::split_lines(&text);
    for line in &mut formatted {
        line.content = if line.content.starts_with('#') {
            spacing::format_directive(&line.content)
        } else {
            spacing::format_line(&line.content)
        };
    }
    indent::reset_indentation(&formatted, tab_size)
}

#[cfg(test)]
#[path = "../../tests/src/format/mod_tests.rs"]
mod tests;
