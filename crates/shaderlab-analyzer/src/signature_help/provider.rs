use std::collections::HashSet;
use std::sync::Arc;

use tower_lsp::lsp_types::{
    Documentation, MarkupContent, MarkupKind, ParameterInformation, ParameterLabel, Position, SignatureHelp,
    SignatureInformation, Url,
};
use tracing::debug;

use crate::definition::IncludeGraph;
use crate::hlsl::builtins;
use crate::syntax::ShaderLanguage;

use super::call::call_at;

fn markdown(value: String) -> Option<Documentation> {
    Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    }))
}

fn parameter(
    label: String,
    documentation: Option<Documentation>,
) -> ParameterInformation {
    ParameterInformation {
        label: ParameterLabel::Simple(label),
        documentation,
    }
}

/// `textDocument/signatureHelp` for HLSL calls: builtin signatures first,
/// then every user overload reachable through the include chain.
pub struct SignatureHelpProvider {
    graph: IncludeGraph,
}

impl SignatureHelpProvider {
    pub fn new(graph: IncludeGraph) -> Self {
        Self {
            graph,
        }
    }

    pub fn provide(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<SignatureHelp> {
        let entry = self.graph.entry(uri)?;
        if entry.language != ShaderLanguage::Hlsl {
            return None;
        }
        let offset = entry.document.offset_of(position)?;
        let call = call_at(&entry.document.text, offset)?;
        debug!("[signature-help] {}(..) argument {}", call.name, call.active_parameter);

        let mut signatures = Vec::new();
        if let Some(builtin) = builtins::function(&call.name) {
            signatures.push(SignatureInformation {
                label: builtin.detail.clone(),
                documentation: if builtin.documentation.is_empty() {
                    None
                } else {
                    markdown(builtin.documentation.clone())
                },
                parameters: Some(builtin.parameters().into_iter().map(|param| parameter(param, None)).collect()),
                active_parameter: None,
            });
        }

        let overloads = self.graph.find_all(Arc::clone(&entry), &call.name, |symbol| symbol.kind.is_callable());
        for found in &overloads {
            let defined = &found.entry;
            let label = defined.signature_label(found.id);
            let parameters = defined
                .parameters(found.id)
                .into_iter()
                .map(|id| {
                    let param = defined.tree.get(id);
                    let documentation = (!param.detail.is_empty()).then(|| Documentation::String(param.detail.clone()));
                    parameter(param.name.clone(), documentation)
                })
                .collect();
            let documentation =
                format!("```hlsl\n{label}\n```\n\n*Defined in: {}*", defined.document.file_name());
            signatures.push(SignatureInformation {
                label,
                documentation: markdown(documentation),
                parameters: Some(parameters),
                active_parameter: None,
            });
        }

        let mut seen = HashSet::new();
        signatures.retain(|signature| seen.insert(signature.label.clone()));
        if signatures.is_empty() {
            return None;
        }

        let active_signature = signatures
            .iter()
            .position(|signature| {
                signature.parameters.as_ref().map_or(0, Vec::len) > call.active_parameter as usize
            })
            .unwrap_or(0);
        Some(SignatureHelp {
            signatures,
            active_signature: Some(active_signature as u32),
            active_parameter: Some(call.active_parameter),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/signature_help/provider_tests.rs"]
mod tests;
