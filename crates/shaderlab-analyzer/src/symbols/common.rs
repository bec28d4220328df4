//! Building blocks shared by the HLSL and ShaderLab extractors.

use std::collections::HashSet;
use std::panic::AssertUnwindSafe;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::hlsl;
use crate::syntax::{BracketKind, BracketTree, TextRange};

use super::types::{Symbol, SymbolId, SymbolKind, SymbolTree};

pub(crate) static STRUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bstruct\s+(\w+)\s*\{").unwrap());

/// `ret name(params) [: SEMANTIC] {`
pub(crate) static FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+)\s+(\w+)\s*\(([^)]*)\)(?:\s*:\s*(\w+))?\s*\{").unwrap());

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)\s+(\w+)(?:\s*\[\s*(\w+)\s*\])?(?:\s*:\s*(\w+))?(?:\s*\[\s*(\w+)\s*\])?\s*;").unwrap()
});

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:in|out|inout|uniform|const|point|line|triangle|lineadj|triangleadj)\s+)*(\w+)\s+(\w+)",
    )
    .unwrap()
});

static LOCAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\w+)\s+(\w+)(?:\s*=\s*[^;]+)?\s*;").unwrap());

static DECLARED_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:struct|class)\s+(\w+)").unwrap());

/// One document prepared for extraction.
pub(crate) struct Source<'a> {
    /// The text with comment content blanked out.
    pub(crate) masked: &'a str,
    pub(crate) brackets: &'a BracketTree,
}

impl Source<'_> {
    /// Full range and inner range of the `{}` region opened at `open`.
    pub(crate) fn brace_at(
        &self,
        open: usize,
    ) -> Option<(TextRange, TextRange)> {
        let region = self.brackets.region_starting_at(open)?;
        if region.kind != BracketKind::Brace {
            return None;
        }
        Some((region.range(), region.inner()))
    }

    pub(crate) fn is_top_level(
        &self,
        offset: usize,
    ) -> bool {
        self.brackets.enclosing_brace(offset).is_none()
    }

    /// Names declared with `struct` or `class` anywhere in `span`.
    pub(crate) fn declared_types(
        &self,
        span: TextRange,
    ) -> HashSet<String> {
        DECLARED_TYPE
            .captures_iter(span.slice(self.masked))
            .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Run one extraction pass. A pass that panics contributes whatever it
/// pushed before failing and never takes the other passes down with it.
pub(crate) fn run_pass(
    name: &str,
    tree: &mut SymbolTree,
    pass: impl FnOnce(&mut SymbolTree),
) {
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| pass(tree)));
    if result.is_err() {
        debug!("[symbols] extraction pass '{name}' failed; skipping");
    }
}

pub(crate) fn group_range(
    captures: &regex::Captures<'_>,
    index: usize,
    base: usize,
) -> Option<TextRange> {
    captures.get(index).map(|m| TextRange::new(m.start(), m.end()).shifted(base))
}

pub(crate) fn array_suffix(size: Option<&str>) -> String {
    size.map(|size| format!("[{size}]")).unwrap_or_default()
}

/// `type name[n] : SEMANTIC;` members of a struct body.
pub(crate) fn push_fields(
    tree: &mut SymbolTree,
    parent: SymbolId,
    masked: &str,
    body: TextRange,
    with_semantic: bool,
) {
    let text = body.slice(masked);
    for captures in FIELD.captures_iter(text) {
        let (Some(whole), Some(ty), Some(name)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        if hlsl::is_declaration_guard(ty.as_str()) {
            continue;
        }
        let size = captures.get(3).or_else(|| captures.get(5)).map(|m| m.as_str());
        let mut detail = format!("{}{}", ty.as_str(), array_suffix(size));
        if with_semantic && let Some(semantic) = captures.get(4) {
            detail.push_str(" : ");
            detail.push_str(semantic.as_str());
        }
        tree.push(
            Some(parent),
            Symbol::new(
                name.as_str(),
                detail,
                SymbolKind::Field,
                TextRange::new(ty.start(), whole.end()).shifted(body.start),
                TextRange::new(name.start(), name.end()).shifted(body.start),
            ),
        );
    }
}

/// Parameters of a parenthesised list, one Variable per matched entry.
/// Storage and primitive modifiers are skipped; the detail is the type.
pub(crate) fn push_params(
    tree: &mut SymbolTree,
    parent: SymbolId,
    masked: &str,
    list: TextRange,
) {
    for piece in split_top_level(masked, list) {
        let raw = piece.slice(masked);
        let trimmed = raw.trim_start();
        let base = piece.start + (raw.len() - trimmed.len());
        let Some(captures) = PARAM.captures(trimmed) else {
            continue;
        };
        let (Some(ty), Some(name)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let end = base + trimmed.trim_end().len();
        tree.push(
            Some(parent),
            Symbol::new(
                name.as_str(),
                ty.as_str(),
                SymbolKind::Variable,
                TextRange::new(base, end),
                TextRange::new(name.start(), name.end()).shifted(base),
            ),
        );
    }
}

/// Local declarations inside a function body. `accepts_type` is the type
/// recognition guard applied after the control-keyword guard.
pub(crate) fn push_locals(
    tree: &mut SymbolTree,
    parent: SymbolId,
    masked: &str,
    body: TextRange,
    accepts_type: &dyn Fn(&str) -> bool,
) {
    let text = body.slice(masked);
    for captures in LOCAL.captures_iter(text) {
        let (Some(whole), Some(ty), Some(name)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        if hlsl::is_declaration_guard(ty.as_str()) || hlsl::is_declaration_guard(name.as_str()) {
            continue;
        }
        if !accepts_type(ty.as_str()) {
            continue;
        }
        tree.push(
            Some(parent),
            Symbol::new(
                name.as_str(),
                ty.as_str(),
                SymbolKind::Variable,
                TextRange::new(whole.start(), whole.end()).shifted(body.start),
                TextRange::new(name.start(), name.end()).shifted(body.start),
            ),
        );
    }
}

/// Split `list` on commas that are not nested in brackets.
pub(crate) fn split_top_level(
    text: &str,
    list: TextRange,
) -> Vec<TextRange> {
    let slice = list.slice(text);
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (index, ch) in slice.char_indices() {
        match ch {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth -= 1,
            ',' if depth <= 0 => {
                pieces.push(TextRange::new(start, index).shifted(list.start));
                start = index + 1;
            },
            _ => {},
        }
    }
    if !slice[start..].trim().is_empty() {
        pieces.push(TextRange::new(start, slice.len()).shifted(list.start));
    }
    pieces
}

/// Whether an existing sibling already records this exact declaration.
pub(crate) fn is_duplicate(
    tree: &SymbolTree,
    parent: Option<SymbolId>,
    name: &str,
    kind: SymbolKind,
    selection: TextRange,
) -> bool {
    tree.level(parent).iter().any(|id| {
        let symbol = tree.get(*id);
        symbol.kind == kind && symbol.name == name && symbol.selection_range == selection
    })
}

#[cfg(test)]
#[path = "../../tests/src/symbols/common_tests.rs"]
mod tests;
