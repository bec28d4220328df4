pub(crate) mod database;
pub(crate) mod functions;
pub mod keywords;
pub(crate) mod semantics;
pub(crate) mod shaderlab;
pub(crate) mod types;

#[cfg(test)]
#[path = "../../../tests/src/hlsl/builtins_tests.rs"]
mod tests;

pub use self::{
    database::{all, function, of_kind, semantic},
    shaderlab::{ShaderLabFunction, shaderlab_function},
    types::{BuiltinEntry, BuiltinKind, FunctionCategory, ShaderStage, TypeCategory, signature_parameters},
};
