pub(crate) mod formatting;
pub(crate) mod handler;
pub mod settings;
pub(crate) mod shaderlabfmt;
pub(crate) mod state;

pub use state::ShaderLabLanguageServer;

/// `workspace/executeCommand` name of the ShaderLab-only formatter.
pub const FORMAT_SHADERLAB_COMMAND: &str = "shaderlab-analyzer.formatShaderLab";
