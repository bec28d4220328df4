//! Parameter hints for calls in HLSL code.

mod call;
mod provider;

pub use call::{CallSite, call_at};
pub use provider::SignatureHelpProvider;

/// Characters that open or advance signature help.
pub const TRIGGER_CHARACTERS: &[&str] = &["(", ","];
