mod cache;
mod common;
mod hlsl;
mod provider;
mod shaderlab;
mod types;

pub use cache::{CacheEntry, SymbolCache};
pub use provider::{SymbolProvider, document_symbols, lsp_symbol_kind};
pub use shaderlab::{is_code_region, is_include_region};
pub use types::{Symbol, SymbolId, SymbolKind, SymbolTree};

use tracing::debug;

use crate::syntax::{BracketTree, Cancelled, ShaderLanguage, TextRange, mask_comments};

/// Recover the symbol tree of `text`.
///
/// Comments are blanked out and the bracket tree is built once; every pass
/// then works on that shared view. Only cancellation is reported as an
/// error, a document without recognisable constructs yields an empty tree.
pub fn extract(
    language: ShaderLanguage,
    text: &str,
    is_cancelled: &dyn Fn() -> bool,
) -> Result<SymbolTree, Cancelled> {
    let masked = mask_comments(text, is_cancelled)?;
    let brackets = BracketTree::build(&masked, is_cancelled)?;
    let source = common::Source {
        masked: &masked,
        brackets: &brackets,
    };

    let mut tree = SymbolTree::new();
    match language {
        ShaderLanguage::Hlsl => hlsl::extract(&source, TextRange::new(0, masked.len()), &mut tree),
        ShaderLanguage::ShaderLab => shaderlab::extract(&source, &mut tree),
    }
    debug!("[symbols] extracted {} {} symbol(s)", tree.len(), language.as_str());
    Ok(tree)
}

#[cfg(test)]
#[path = "../../tests/src/symbols/mod_tests.rs"]
mod tests;
