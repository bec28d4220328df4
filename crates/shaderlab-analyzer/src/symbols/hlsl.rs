//! Regex passes that recover the outline of an HLSL document.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::hlsl;
use crate::syntax::TextRange;

use super::common::{self, FUNCTION, STRUCT, Source, array_suffix, group_range};
use super::types::{Symbol, SymbolKind, SymbolTree};

static CBUFFER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(cbuffer|tbuffer)\s+(\w+)(?:\s*:\s*register\s*\([^)]+\))?\s*\{").unwrap()
});

static CBUFFER_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s+(\w+)(?:\s*\[\s*(\w+)\s*\])?\s*(?::\s*packoffset\s*\([^)]*\))?\s*;").unwrap());

static KERNEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*numthreads\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)\s*\]\s*void\s+(\w+)\s*\(").unwrap()
});

static DEFINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+(\w+)(?:\(([^)\n]*)\))?[ \t]*(.*)$").unwrap());

static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*["<]([^">\n]+)[">]"#).unwrap());

static GLOBAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*((?:(?:uniform|static|extern|const|volatile|shared|precise)[ \t]+)*)(\w+)[ \t]+(\w+)[ \t]*(?:\[[ \t]*(\w+)[ \t]*\])?[ \t]*(?::[ \t]*register[ \t]*\([^)\n]*\))?[ \t]*;",
    )
    .unwrap()
});

static TEXTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(Texture1D|Texture2D|Texture3D|TextureCube|Texture1DArray|Texture2DArray|TextureCubeArray|Texture2DMS|SamplerState|SamplerComparisonState)\s*(?:<\s*\w+\s*>)?\s+(\w+)\s*(?::\s*register\s*\([^)]+\))?\s*;",
    )
    .unwrap()
});

static TYPED_BUFFER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(StructuredBuffer|RWStructuredBuffer|Buffer|RWBuffer|ByteAddressBuffer|RWByteAddressBuffer|AppendStructuredBuffer|ConsumeStructuredBuffer)\s*(?:<\s*(\w+)\s*>)?\s+(\w+)\s*(?::\s*register\s*\([^)]+\))?\s*;",
    )
    .unwrap()
});

static GROUPSHARED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bgroupshared\s+(\w+)\s+(\w+)(?:\s*\[\s*(\w+)\s*\])?(?:\s*\[\s*(\w+)\s*\])?\s*;").unwrap()
});

static RW_TEXTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(RWTexture1D|RWTexture2D|RWTexture3D|RWTexture1DArray|RWTexture2DArray)\s*<\s*(\w+)\s*>\s+(\w+)\s*(?::\s*register\s*\([^)]+\))?\s*;",
    )
    .unwrap()
});

/// Longest `#define` value shown verbatim in the detail.
const MACRO_VALUE_PREVIEW: usize = 30;

/// Run every HLSL pass over `span` of the masked text, pushing top-level
/// symbols into `tree`. Passes run in a fixed order and each one is isolated.
pub(crate) fn extract(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let declared = source.declared_types(span);

    common::run_pass("struct", tree, |tree| structs(source, span, tree));
    common::run_pass("cbuffer", tree, |tree| cbuffers(source, span, tree));
    common::run_pass("function", tree, |tree| functions(source, span, &declared, tree));
    common::run_pass("kernel", tree, |tree| kernels(source, span, tree));
    common::run_pass("define", tree, |tree| defines(source, span, tree));
    common::run_pass("include", tree, |tree| includes(source, span, tree));
    common::run_pass("global", tree, |tree| globals(source, span, &declared, tree));
    common::run_pass("texture", tree, |tree| textures(source, span, tree));
    common::run_pass("typed-buffer", tree, |tree| typed_buffers(source, span, tree));
    common::run_pass("groupshared", tree, |tree| groupshared(source, span, tree));
    common::run_pass("rw-texture", tree, |tree| rw_textures(source, span, tree));
}

fn structs(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in STRUCT.captures_iter(text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let open = span.start + whole.end() - 1;
        let Some((region, body)) = source.brace_at(open) else {
            continue;
        };
        let selection = TextRange::new(name.start(), name.end()).shifted(span.start);
        if common::is_duplicate(tree, None, name.as_str(), SymbolKind::Struct, selection) {
            continue;
        }
        let id = tree.push(
            None,
            Symbol::new(
                name.as_str(),
                "struct",
                SymbolKind::Struct,
                TextRange::new(span.start + whole.start(), region.end),
                selection,
            ),
        );
        common::push_fields(tree, id, source.masked, body, true);
    }
}

fn cbuffers(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in CBUFFER.captures_iter(text) {
        let (Some(whole), Some(keyword), Some(name)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        let open = span.start + whole.end() - 1;
        let Some((region, body)) = source.brace_at(open) else {
            continue;
        };
        let id = tree.push(
            None,
            Symbol::new(
                name.as_str(),
                keyword.as_str(),
                SymbolKind::Struct,
                TextRange::new(span.start + whole.start(), region.end),
                TextRange::new(name.start(), name.end()).shifted(span.start),
            ),
        );
        for member in CBUFFER_MEMBER.captures_iter(body.slice(source.masked)) {
            let (Some(decl), Some(ty), Some(field)) = (member.get(0), member.get(1), member.get(2)) else {
                continue;
            };
            if hlsl::is_declaration_guard(ty.as_str()) {
                continue;
            }
            let detail = format!("{}{}", ty.as_str(), array_suffix(member.get(3).map(|m| m.as_str())));
            tree.push(
                Some(id),
                Symbol::new(
                    field.as_str(),
                    detail,
                    SymbolKind::Field,
                    TextRange::new(ty.start(), decl.end()).shifted(body.start),
                    TextRange::new(field.start(), field.end()).shifted(body.start),
                ),
            );
        }
    }
}

fn functions(
    source: &Source<'_>,
    span: TextRange,
    declared: &HashSet<String>,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in FUNCTION.captures_iter(text) {
        let (Some(whole), Some(ret), Some(name), Some(params)) =
            (captures.get(0), captures.get(1), captures.get(2), captures.get(3))
        else {
            continue;
        };
        if hlsl::is_declaration_guard(ret.as_str()) || hlsl::is_declaration_guard(name.as_str()) {
            continue;
        }
        if ret.as_str() != "void" && !hlsl::is_declaration_type(ret.as_str(), declared) {
            continue;
        }
        let open = span.start + whole.end() - 1;
        let Some((region, body)) = source.brace_at(open) else {
            continue;
        };
        let selection = TextRange::new(name.start(), name.end()).shifted(span.start);
        if common::is_duplicate(tree, None, name.as_str(), SymbolKind::Function, selection) {
            continue;
        }
        let mut detail = ret.as_str().to_string();
        if let Some(semantic) = captures.get(4) {
            detail.push_str(" : ");
            detail.push_str(semantic.as_str());
        }
        let id = tree.push(
            None,
            Symbol::new(
                name.as_str(),
                detail,
                SymbolKind::Function,
                TextRange::new(span.start + ret.start(), region.end),
                selection,
            ),
        );
        let list = TextRange::new(params.start(), params.end()).shifted(span.start);
        common::push_params(tree, id, source.masked, list);
        let accepts = |ty: &str| hlsl::is_declaration_type(ty, declared);
        common::push_locals(tree, id, source.masked, body, &accepts);
    }
}

/// Mark `[numthreads(x, y, z)]` entry points. A kernel already captured by
/// the function pass only has its detail amended.
fn kernels(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in KERNEL.captures_iter(text) {
        let (Some(whole), Some(x), Some(y), Some(z), Some(name)) =
            (captures.get(0), captures.get(1), captures.get(2), captures.get(3), captures.get(4))
        else {
            continue;
        };
        let detail = format!("kernel [{}, {}, {}]", x.as_str(), y.as_str(), z.as_str());
        let selection = TextRange::new(name.start(), name.end()).shifted(span.start);
        let existing = tree.roots().iter().copied().find(|id| {
            let symbol = tree.get(*id);
            symbol.kind == SymbolKind::Function && symbol.name == name.as_str()
        });
        match existing {
            Some(id) => tree.set_detail(id, detail),
            None => {
                tree.push(
                    None,
                    Symbol::new(
                        name.as_str(),
                        detail,
                        SymbolKind::Function,
                        TextRange::new(whole.start(), whole.end()).shifted(span.start),
                        selection,
                    ),
                );
            },
        }
    }
}

fn defines(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in DEFINE.captures_iter(text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let mut detail = String::new();
        if let Some(params) = captures.get(2) {
            detail.push('(');
            detail.push_str(params.as_str().trim());
            detail.push(')');
        }
        let value = captures.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
        if !value.is_empty() {
            detail.push_str(" = ");
            detail.push_str(&preview(value));
        }
        tree.push(
            None,
            Symbol::new(
                name.as_str(),
                detail.trim(),
                SymbolKind::Constant,
                TextRange::new(whole.start(), whole.end()).shifted(span.start),
                TextRange::new(name.start(), name.end()).shifted(span.start),
            ),
        );
    }
}

fn preview(value: &str) -> String {
    if value.chars().count() <= MACRO_VALUE_PREVIEW {
        return value.to_string();
    }
    let cut: String = value.chars().take(MACRO_VALUE_PREVIEW).collect();
    format!("{cut}...")
}

fn includes(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in INCLUDE.captures_iter(text) {
        let (Some(whole), Some(path)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        tree.push(
            None,
            Symbol::new(
                path.as_str(),
                "#include",
                SymbolKind::Module,
                TextRange::new(whole.start(), whole.end()).shifted(span.start),
                TextRange::new(path.start(), path.end()).shifted(span.start),
            ),
        );
    }
}

fn globals(
    source: &Source<'_>,
    span: TextRange,
    declared: &HashSet<String>,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in GLOBAL.captures_iter(text) {
        let (Some(whole), Some(ty), Some(_)) = (captures.get(0), captures.get(2), captures.get(3)) else {
            continue;
        };
        let ty_str = ty.as_str();
        if matches!(ty_str, "struct" | "cbuffer" | "tbuffer" | "typedef") || hlsl::is_declaration_guard(ty_str) {
            continue;
        }
        if !hlsl::is_declaration_type(ty_str, declared) {
            continue;
        }
        if !source.is_top_level(span.start + ty.start()) {
            continue;
        }
        let modifiers = captures.get(1).map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "));
        let mut detail = String::new();
        if let Some(modifiers) = modifiers.filter(|m| !m.is_empty()) {
            detail.push_str(&modifiers);
            detail.push(' ');
        }
        detail.push_str(ty_str);
        detail.push_str(&array_suffix(captures.get(4).map(|m| m.as_str())));
        push_variable(tree, TextRange::new(ty.start(), whole.end()).shifted(span.start), &captures, 3, span.start, detail);
    }
}

fn textures(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in TEXTURE.captures_iter(text) {
        let (Some(whole), Some(ty)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if !source.is_top_level(span.start + whole.start()) {
            continue;
        }
        let range = TextRange::new(whole.start(), whole.end()).shifted(span.start);
        push_variable(tree, range, &captures, 2, span.start, ty.as_str().to_string());
    }
}

fn typed_buffers(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in TYPED_BUFFER.captures_iter(text) {
        let (Some(whole), Some(ty)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if !source.is_top_level(span.start + whole.start()) {
            continue;
        }
        let detail = match captures.get(2) {
            Some(element) => format!("{}<{}>", ty.as_str(), element.as_str()),
            None => ty.as_str().to_string(),
        };
        let range = TextRange::new(whole.start(), whole.end()).shifted(span.start);
        push_variable(tree, range, &captures, 3, span.start, detail);
    }
}

fn groupshared(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in GROUPSHARED.captures_iter(text) {
        let (Some(whole), Some(ty)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let detail = format!(
            "groupshared {}{}{}",
            ty.as_str(),
            array_suffix(captures.get(3).map(|m| m.as_str())),
            array_suffix(captures.get(4).map(|m| m.as_str())),
        );
        let range = TextRange::new(whole.start(), whole.end()).shifted(span.start);
        push_variable(tree, range, &captures, 2, span.start, detail);
    }
}

fn rw_textures(
    source: &Source<'_>,
    span: TextRange,
    tree: &mut SymbolTree,
) {
    let text = span.slice(source.masked);
    for captures in RW_TEXTURE.captures_iter(text) {
        let (Some(whole), Some(ty), Some(element)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        if !source.is_top_level(span.start + whole.start()) {
            continue;
        }
        let detail = format!("{}<{}>", ty.as_str(), element.as_str());
        let range = TextRange::new(whole.start(), whole.end()).shifted(span.start);
        push_variable(tree, range, &captures, 3, span.start, detail);
    }
}

/// Push a top-level Variable whose name is capture group `name_group`,
/// skipping a declaration an earlier pass already recorded.
fn push_variable(
    tree: &mut SymbolTree,
    range: TextRange,
    captures: &regex::Captures<'_>,
    name_group: usize,
    base: usize,
    detail: String,
) {
    let (Some(name), Some(selection)) = (captures.get(name_group), group_range(captures, name_group, base)) else {
        return;
    };
    if common::is_duplicate(tree, None, name.as_str(), SymbolKind::Variable, selection) {
        return;
    }
    tree.push(None, Symbol::new(name.as_str(), detail, SymbolKind::Variable, range, selection));
}

#[cfg(test)]
#[path = "../../tests/src/symbols/hlsl_tests.rs"]
mod tests;
