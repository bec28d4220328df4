//! Semantic tokens for the declarations inside ShaderLab embedded code.

pub(crate) mod mapping;
pub(crate) mod provider;

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

pub use self::provider::SemanticTokenProvider;

pub const LEGEND_TYPES: &[SemanticTokenType] = &[
    SemanticTokenType::TYPE,
    SemanticTokenType::CLASS,
    SemanticTokenType::STRUCT,
    SemanticTokenType::PARAMETER,
    SemanticTokenType::VARIABLE,
    SemanticTokenType::PROPERTY,
    SemanticTokenType::METHOD,
    SemanticTokenType::MACRO,
    SemanticTokenType::MODIFIER,
];

pub fn get_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: LEGEND_TYPES.into(),
        token_modifiers: vec![],
    }
}

/// A raw token before delta encoding.
#[derive(Debug, Clone)]
pub(crate) struct RawToken {
    pub(crate) line: u32,
    pub(crate) col: u32,
    pub(crate) length: u32,
    pub(crate) token_type: SemanticTokenType,
}

/// Sort tokens and encode as LSP delta format.
pub(crate) fn encode_delta(mut tokens: Vec<RawToken>) -> Vec<SemanticToken> {
    tokens.sort_by(|a, b| a.line.cmp(&b.line).then(a.col.cmp(&b.col)));

    // The first token pushed at a position wins.
    tokens.dedup_by(|later, first| later.line == first.line && later.col == first.col);

    let mut result = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_col = 0u32;

    for tok in tokens {
        let delta_line = tok.line - prev_line;
        let delta_col = if delta_line == 0 {
            tok.col - prev_col
        } else {
            tok.col
        };

        result.push(SemanticToken {
            delta_line,
            delta_start: delta_col,
            length: tok.length,
            token_type: mapping::get_token_type_index(tok.token_type),
            token_modifiers_bitset: 0,
        });

        prev_line = tok.line;
        prev_col = tok.col;
    }

    result
}
