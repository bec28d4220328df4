use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::SemanticTokenType;

use crate::semantic_tokens::LEGEND_TYPES;

static SCALAR_OR_VECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(fixed|float|int|half)([1-4](x[1-4])?)?$").unwrap());

/// Token type of the type word in a variable or field declaration.
pub(crate) fn declared_type_token(type_name: &str) -> SemanticTokenType {
    if SCALAR_OR_VECTOR.is_match(type_name) {
        SemanticTokenType::MACRO
    } else if type_name == "sampler2D" {
        SemanticTokenType::TYPE
    } else {
        SemanticTokenType::STRUCT
    }
}

pub(crate) fn get_token_type_index(token_type: SemanticTokenType) -> u32 {
    LEGEND_TYPES.iter().position(|t| *t == token_type).unwrap_or(0) as u32
}
