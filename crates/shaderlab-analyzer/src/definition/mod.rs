//! Go-to-definition: include-chain traversal, scope-aware local lookup and
//! the per-language lookup order.

mod chain;
mod provider;
pub mod scope;

pub use chain::{IncludeGraph, SymbolMatch, WorkspaceScan};
pub use provider::{DefinitionProvider, Resolved, UNITY_CG_INCLUDE, is_in_comment, is_navigable_word};
pub use scope::{LocalOrigin, ScopeLocal, locals_in_scope, variable_type};
