use once_cell::sync::Lazy;
use regex::Regex;

use super::lines::Line;

/// A control statement head whose body may be a single unbraced statement.
static CONTROL_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:if|else|for|while)\b").unwrap());

/// Indent `lines` by brace and `#if` nesting and join them. Trailing
/// comments are aligned to the next tab stop after the code.
pub(crate) fn reset_indentation(
    lines: &[Line],
    tab_size: usize,
) -> String {
    let mut level = 0usize;
    let mut text = String::new();
    let mut previous: &str = "";
    for line in lines {
        let content = line.content.as_str();
        let block_start = content.starts_with('{');
        let block_end = content.starts_with('}');
        let inline_block = block_start && content.ends_with('}');
        let directive_start = content.starts_with("#if") || content.starts_with("#elif") || content.starts_with("#else");
        let directive_end =
            content.starts_with("#elif") || content.starts_with("#else") || content.starts_with("#endif");

        if block_end || directive_end {
            level = level.saturating_sub(1);
        }
        let mut current = level;
        if !block_start {
            if is_unbraced_body(previous) {
                current += 1;
            }
            if content.starts_with('?') || content.starts_with(':') {
                current += 1;
            }
        }

        if !content.is_empty() || !line.comment.is_empty() {
            let indent = current * tab_size;
            text.push_str(&" ".repeat(indent));
            text.push_str(content);
            if !line.comment.is_empty() {
                if !content.is_empty() {
                    let width = indent + content.chars().count();
                    text.push_str(&" ".repeat(tab_size - width % tab_size));
                }
                text.push_str(line.comment.trim_end());
            }
        }
        text.push('\n');

        if (block_start && !inline_block) || directive_start {
            level += 1;
        }
        if !content.is_empty() {
            previous = content;
        }
    }

    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    text.push('\n');
    text
}

fn is_unbraced_body(previous: &str) -> bool {
    CONTROL_HEAD.is_match(previous) && !previous.ends_with(';') && !previous.ends_with('}')
}

#[cfg(test)]
#[path = "../../tests/src/format/indent_tests.rs"]
mod tests;
