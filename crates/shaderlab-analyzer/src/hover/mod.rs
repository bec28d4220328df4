//! `textDocument/hover` for HLSL and ShaderLab.

mod builtins;
mod provider;
mod user_symbol;

pub use provider::HoverProvider;
pub use user_symbol::{declaration_text, doc_comment, shaderlab_declaration};
