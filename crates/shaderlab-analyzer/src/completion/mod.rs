//! `textDocument/completion` for HLSL and ShaderLab.

mod builtins;
mod context;
mod provider;

pub use provider::{CompletionProvider, TRIGGER_PARAMETER_HINTS, is_compute_shader, swizzle_items};
