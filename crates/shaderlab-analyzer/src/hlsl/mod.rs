//! Language facts about HLSL shared by the extractors and the providers.

pub mod builtins;

use std::collections::HashSet;
use std::sync::OnceLock;

use once_cell::sync::Lazy;
use regex::Regex;

use self::builtins::keywords;

/// Words that can never be the type of a declaration. A `word word;` match
/// whose first word is one of these is a statement, not a declaration.
pub const DECLARATION_GUARD: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue", "return", "discard", "goto",
];

static VECTOR_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(float|half|int|uint|bool|double|min16float|min16int|min16uint)([2-4])$").unwrap());

static SCALAR_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(bool|int|uint|half|float|double|dword|fixed|min16float|min10float|min16int|min12int|min16uint)([1-4](x[1-4])?)?$")
        .unwrap()
});

static SHADERLAB_BASE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:float|fixed|int|half)(?:[2-4](?:x[2-4])?)?|sampler2D)$").unwrap());

fn all_types() -> &'static HashSet<&'static str> {
    static TYPES: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TYPES.get_or_init(|| {
        [
            keywords::SCALAR_TYPES,
            keywords::VECTOR_TYPES,
            keywords::MATRIX_TYPES,
            keywords::SAMPLER_TYPES,
            keywords::TEXTURE_TYPES,
            keywords::RW_TEXTURE_TYPES,
            keywords::BUFFER_TYPES,
        ]
        .into_iter()
        .flatten()
        .copied()
        .collect()
    })
}

fn lowercase_types() -> &'static HashSet<String> {
    static TYPES: OnceLock<HashSet<String>> = OnceLock::new();
    TYPES.get_or_init(|| all_types().iter().map(|name| name.to_ascii_lowercase()).collect())
}

/// Exact builtin type spelling (`float4`, `Texture2D`, `RWStructuredBuffer`).
pub fn is_hlsl_type(name: &str) -> bool {
    all_types().contains(name)
}

pub fn is_declaration_guard(word: &str) -> bool {
    DECLARATION_GUARD.contains(&word)
}

/// Whether `type_name` is plausible as the type of a declaration: a builtin
/// type, a name starting with an uppercase letter, `void`, or one of the
/// user-declared type names in `declared`.
pub fn is_declaration_type(
    type_name: &str,
    declared: &HashSet<String>,
) -> bool {
    if is_declaration_guard(type_name) {
        return false;
    }
    is_hlsl_type(type_name)
        || SCALAR_SHAPE.is_match(type_name)
        || type_name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        || declared.contains(type_name)
}

/// Keywords and builtin type spellings, compared case-insensitively. Hover
/// stays silent on these.
pub fn is_hlsl_keyword(word: &str) -> bool {
    if keywords::all_keywords().any(|keyword| keyword.eq_ignore_ascii_case(word)) {
        return true;
    }
    let lower = word.to_ascii_lowercase();
    lowercase_types().contains(&lower) || SCALAR_SHAPE.is_match(&lower)
}

/// Component count of a vector type spelling, e.g. `float3` -> 3.
pub fn vector_width(type_name: &str) -> Option<usize> {
    let captures = VECTOR_TYPE.captures(type_name)?;
    captures.get(2)?.as_str().parse().ok()
}

/// Base types accepted by ShaderLab code regions without a struct lookup.
pub fn is_shaderlab_base_type(type_name: &str) -> bool {
    SHADERLAB_BASE_TYPE.is_match(type_name) || is_hlsl_type(type_name)
}

#[cfg(test)]
#[path = "../../tests/src/hlsl/mod_tests.rs"]
mod tests;
