pub mod completion;
pub mod definition;
pub mod document;
pub mod format;
pub mod hlsl;
pub mod hover;
pub mod includes;
pub mod links;
pub mod progress;
pub mod semantic_tokens;
pub mod server;
pub mod signature_help;
pub mod symbols;
pub mod syntax;
pub mod vfs;

pub use completion::CompletionProvider;
pub use definition::{DefinitionProvider, IncludeGraph};
pub use document::{Document, DocumentStore};
pub use format::format_code;
pub use hover::HoverProvider;
pub use includes::{IncludeConfig, IncludeResolver};
pub use links::DocumentLinkProvider;
pub use semantic_tokens::SemanticTokenProvider;
pub use server::ShaderLabLanguageServer;
pub use signature_help::SignatureHelpProvider;
pub use symbols::{SymbolCache, SymbolProvider};
pub use syntax::ShaderLanguage;

#[cfg(test)]
#[path = "../tests/src/support.rs"]
pub(crate) mod test_support;
