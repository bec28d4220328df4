//! Outline of a ShaderLab document: the declarative `Shader` blocks and the
//! HLSL code regions embedded in them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::hlsl;
use crate::syntax::TextRange;

use super::common::{self, FUNCTION, STRUCT, Source};
use super::types::{Symbol, SymbolId, SymbolKind, SymbolTree};

static SHADER: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\b(Shader)\s*("[^"\n]*")\s*\{"#).unwrap());
static PROPERTIES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(Properties)\s*\{").unwrap());
static SUBSHADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(SubShader)\s*\{").unwrap());
static PASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(Pass)\s*\{").unwrap());

/// `_MainTex ("Texture", 2D) = "white" {}`
static PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)(\w+)\s*\(\s*"[^"\n]*"\s*,\s*(.+?)\)\s*(?:=\s*.*)$"#).unwrap());

static REGION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(CGPROGRAM|CGINCLUDE|HLSLPROGRAM|HLSLINCLUDE)\b").unwrap());
static END_CG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bENDCG\b").unwrap());
static END_HLSL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bENDHLSL\b").unwrap());

static VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s+(\w+)(?:\[(\d*)\])?\s*[=;]").unwrap());

/// A `{}` block or code region together with the span its contents occupy.
#[derive(Clone, Copy)]
struct Block {
    id: SymbolId,
    body: TextRange,
}

pub fn is_include_region(name: &str) -> bool {
    name == "CGINCLUDE" || name == "HLSLINCLUDE"
}

/// Whether `symbol` is an embedded `CGPROGRAM`/`HLSLINCLUDE`/... region.
pub fn is_code_region(symbol: &Symbol) -> bool {
    symbol.kind == SymbolKind::Package
        && matches!(symbol.name.as_str(), "CGPROGRAM" | "CGINCLUDE" | "HLSLPROGRAM" | "HLSLINCLUDE")
}

/// Whether `label` names a type visible at `offset`: a ShaderLab base type,
/// or a struct declared at any level enclosing `offset` (including shared
/// `CGINCLUDE`/`HLSLINCLUDE` regions at those levels).
pub fn is_type(
    tree: &SymbolTree,
    offset: usize,
    label: &str,
) -> bool {
    if hlsl::is_shaderlab_base_type(label) {
        return true;
    }
    let declares = |level: &[SymbolId]| {
        level.iter().any(|id| {
            let symbol = tree.get(*id);
            symbol.kind.is_type() && symbol.name == label
        })
    };
    let mut stack = tree.stack_at(offset);
    stack.reverse();
    let levels = stack.into_iter().map(Some).chain(std::iter::once(None));
    for level in levels {
        let children = tree.level(level);
        if declares(children) {
            return true;
        }
        let shared = children.iter().filter(|id| {
            let symbol = tree.get(**id);
            symbol.kind == SymbolKind::Package && is_include_region(&symbol.name)
        });
        for region in shared {
            if declares(tree.children(*region)) {
                return true;
            }
        }
    }
    false
}

/// Build the ShaderLab outline. A document without a `Shader "name" {}`
/// block has no symbols.
pub(crate) fn extract(
    source: &Source<'_>,
    tree: &mut SymbolTree,
) {
    let Some(shader) = shader_root(source, tree) else {
        return;
    };

    let mut subshaders = Vec::new();
    let mut passes = Vec::new();
    let mut regions = Vec::new();

    common::run_pass("properties", tree, |tree| properties(source, shader, tree));
    common::run_pass("subshader", tree, |tree| subshaders = blocks(source, shader, &SUBSHADER, "SubShader", tree));
    common::run_pass("pass", tree, |tree| {
        for subshader in &subshaders {
            passes.extend(blocks(source, *subshader, &PASS, "Pass", tree));
        }
    });
    common::run_pass("code-region", tree, |tree| {
        for level in passes.iter().chain(&subshaders).chain(std::iter::once(&shader)) {
            regions.extend(code_regions(source, *level, tree));
        }
    });

    // Shared regions first, so their structs are known when other regions
    // recognise declaration types.
    regions.sort_by_key(|region: &Block| (!is_include_region(&tree.get(region.id).name), region.body.start));

    for region in &regions {
        let mut structs = Vec::new();
        let mut methods = Vec::new();
        common::run_pass("region-struct", tree, |tree| structs = region_structs(source, *region, tree));
        common::run_pass("region-function", tree, |tree| methods = region_functions(source, *region, tree));
        common::run_pass("region-field", tree, |tree| {
            for block in &structs {
                common::push_fields(tree, block.id, source.masked, block.body, true);
            }
        });
        common::run_pass("region-variable", tree, |tree| {
            for method in &methods {
                variables(source, *method, tree);
            }
            variables(source, *region, tree);
        });
    }
}

fn shader_root(
    source: &Source<'_>,
    tree: &mut SymbolTree,
) -> Option<Block> {
    let captures = SHADER.captures(source.masked)?;
    let (whole, keyword, name) = (captures.get(0)?, captures.get(1)?, captures.get(2)?);
    let (region, body) = source.brace_at(whole.end() - 1)?;
    let id = tree.push(
        None,
        Symbol::new(
            "Shader",
            name.as_str(),
            SymbolKind::File,
            TextRange::new(whole.start(), region.end),
            TextRange::new(keyword.start(), keyword.end()),
        ),
    );
    Some(Block {
        id,
        body,
    })
}

fn properties(
    source: &Source<'_>,
    shader: Block,
    tree: &mut SymbolTree,
) {
    let Some(block) = blocks(source, shader, &PROPERTIES, "Properties", tree).into_iter().next() else {
        return;
    };
    let text = block.body.slice(source.masked);
    for captures in PROPERTY.captures_iter(text) {
        let (Some(whole), Some(name), Some(kind)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        tree.push(
            Some(block.id),
            Symbol::new(
                name.as_str(),
                kind.as_str().trim(),
                SymbolKind::Property,
                TextRange::new(whole.start(), whole.end()).shifted(block.body.start),
                TextRange::new(name.start(), name.end()).shifted(block.body.start),
            ),
        );
    }
}

/// Named `Keyword {}` blocks directly inside `parent`. `Properties` only
/// ever takes the first match.
fn blocks(
    source: &Source<'_>,
    parent: Block,
    pattern: &Regex,
    name: &str,
    tree: &mut SymbolTree,
) -> Vec<Block> {
    let text = parent.body.slice(source.masked);
    let mut found = Vec::new();
    for captures in pattern.captures_iter(text) {
        let (Some(whole), Some(keyword)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let open = parent.body.start + whole.end() - 1;
        let Some((region, body)) = source.brace_at(open) else {
            continue;
        };
        let start = parent.body.start + whole.start();
        if tree.children(parent.id).iter().any(|id| tree.get(*id).range.contains(start)) {
            continue;
        }
        let id = tree.push(
            Some(parent.id),
            Symbol::new(
                name,
                "",
                SymbolKind::Package,
                TextRange::new(start, region.end),
                TextRange::new(keyword.start(), keyword.end()).shifted(parent.body.start),
            ),
        );
        found.push(Block {
            id,
            body,
        });
        if name == "Properties" {
            break;
        }
    }
    found
}

/// `CGPROGRAM ... ENDCG` style regions at one level. A start marker without
/// its end marker, or one that falls inside an already recorded child, is
/// skipped.
fn code_regions(
    source: &Source<'_>,
    level: Block,
    tree: &mut SymbolTree,
) -> Vec<Block> {
    let text = level.body.slice(source.masked);
    let base = level.body.start;
    let mut found = Vec::new();
    for start in REGION_START.find_iter(text) {
        let absolute = base + start.start();
        if tree.children(level.id).iter().any(|id| tree.get(*id).range.contains(absolute)) {
            continue;
        }
        let marker = start.as_str().to_ascii_uppercase();
        let end_pattern: &Regex = if marker.starts_with("CG") {
            &END_CG
        } else {
            &END_HLSL
        };
        let Some(end) = end_pattern.find_at(text, start.end()) else {
            continue;
        };
        let id = tree.push(
            Some(level.id),
            Symbol::new(
                marker,
                "",
                SymbolKind::Package,
                TextRange::new(start.start(), end.end()).shifted(base),
                TextRange::new(start.start(), start.end()).shifted(base),
            ),
        );
        found.push(Block {
            id,
            body: TextRange::new(start.end(), end.start()).shifted(base),
        });
    }
    found
}

fn region_structs(
    source: &Source<'_>,
    region: Block,
    tree: &mut SymbolTree,
) -> Vec<Block> {
    let text = region.body.slice(source.masked);
    let base = region.body.start;
    let mut found = Vec::new();
    for captures in STRUCT.captures_iter(text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let Some((range, body)) = source.brace_at(base + whole.end() - 1) else {
            continue;
        };
        let id = tree.push(
            Some(region.id),
            Symbol::new(
                name.as_str(),
                "",
                SymbolKind::Struct,
                TextRange::new(base + whole.start(), range.end),
                TextRange::new(name.start(), name.end()).shifted(base),
            ),
        );
        found.push(Block {
            id,
            body,
        });
    }
    found
}

fn region_functions(
    source: &Source<'_>,
    region: Block,
    tree: &mut SymbolTree,
) -> Vec<Block> {
    let text = region.body.slice(source.masked);
    let base = region.body.start;
    let mut found = Vec::new();
    for captures in FUNCTION.captures_iter(text) {
        let (Some(whole), Some(ret), Some(name), Some(params)) =
            (captures.get(0), captures.get(1), captures.get(2), captures.get(3))
        else {
            continue;
        };
        if hlsl::is_declaration_guard(ret.as_str()) || hlsl::is_declaration_guard(name.as_str()) {
            continue;
        }
        let start = base + whole.start();
        if tree.children(region.id).iter().any(|id| tree.get(*id).range.contains(start)) {
            continue;
        }
        let Some((range, body)) = source.brace_at(base + whole.end() - 1) else {
            continue;
        };
        let id = tree.push(
            Some(region.id),
            Symbol::new(
                name.as_str(),
                ret.as_str(),
                SymbolKind::Method,
                TextRange::new(start, range.end),
                TextRange::new(name.start(), name.end()).shifted(base),
            ),
        );
        common::push_params(tree, id, source.masked, TextRange::new(params.start(), params.end()).shifted(base));
        found.push(Block {
            id,
            body,
        });
    }
    found
}

/// `Type name[n];` and `Type name = ...;` declarations in `block` that are
/// not part of an already recorded child and whose type is known at that
/// point.
fn variables(
    source: &Source<'_>,
    block: Block,
    tree: &mut SymbolTree,
) {
    let text = block.body.slice(source.masked);
    let base = block.body.start;
    for captures in VARIABLE.captures_iter(text) {
        let (Some(ty), Some(name)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let start = base + ty.start();
        if tree.children(block.id).iter().any(|id| tree.get(*id).range.contains(start)) {
            continue;
        }
        if hlsl::is_declaration_guard(ty.as_str()) || !is_type(tree, start, ty.as_str()) {
            continue;
        }
        let mut detail = ty.as_str().to_string();
        let mut end = name.end();
        if let Some(size) = captures.get(3) {
            end = size.end() + 1;
            if !size.as_str().is_empty() {
                detail.push_str(&format!("[{}]", size.as_str()));
            }
        }
        tree.push(
            Some(block.id),
            Symbol::new(
                name.as_str(),
                detail,
                SymbolKind::Variable,
                TextRange::new(start, base + end),
                TextRange::new(name.start(), name.end()).shifted(base),
            ),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/shaderlab_tests.rs"]
mod tests;
