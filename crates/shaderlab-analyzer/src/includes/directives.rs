use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::{TextRange, mask_comments, never_cancelled};

static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"#\s*include\s*["<]([^"<>\r\n]+)[">]"#).unwrap());

/// One `#include "..."` or `#include <...>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// The literal path between the delimiters.
    pub path: String,
    /// Span of the literal path.
    pub path_range: TextRange,
    /// Span of the whole directive, from `#` to the closing delimiter.
    pub range: TextRange,
    pub angled: bool,
}

impl IncludeDirective {
    pub fn is_package_path(&self) -> bool {
        self.path.starts_with(super::PACKAGES_PREFIX)
    }
}

/// Every include directive of `text` in document order. Directives inside
/// comments are skipped.
pub fn parse_includes(text: &str) -> Vec<IncludeDirective> {
    let masked = match mask_comments(text, &never_cancelled) {
        Ok(masked) => masked,
        Err(_) => return Vec::new(),
    };
    INCLUDE
        .captures_iter(&masked)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let path = captures.get(1)?;
            Some(IncludeDirective {
                path: path.as_str().trim().to_owned(),
                path_range: TextRange::new(path.start(), path.end()),
                range: TextRange::new(whole.start(), whole.end()),
                angled: masked.as_bytes().get(path.start().wrapping_sub(1)) == Some(&b'<'),
            })
        })
        .collect()
}

/// The directive whose path literal contains `offset`.
pub fn include_at(
    directives: &[IncludeDirective],
    offset: usize,
) -> Option<&IncludeDirective> {
    directives.iter().find(|directive| directive.path_range.contains(offset))
}

/// The directive on the same line as `offset`, if any.
pub fn include_on_line<'a>(
    directives: &'a [IncludeDirective],
    text: &str,
    offset: usize,
) -> Option<&'a IncludeDirective> {
    let bytes = text.as_bytes();
    let offset = offset.min(bytes.len());
    let line_start = bytes[..offset].iter().rposition(|byte| *byte == b'\n').map_or(0, |index| index + 1);
    let line_end = bytes[offset..].iter().position(|byte| *byte == b'\n').map_or(bytes.len(), |index| offset + index);
    directives.iter().find(|directive| directive.range.start >= line_start && directive.range.start <= line_end)
}

#[cfg(test)]
#[path = "../../tests/src/includes/directives_tests.rs"]
mod tests;
