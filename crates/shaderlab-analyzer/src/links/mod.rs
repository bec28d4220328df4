//! Clickable `#include` paths.

use tower_lsp::lsp_types::{DocumentLink, Url};
use tracing::debug;

use crate::definition::IncludeGraph;
use crate::includes::{IncludeDirective, parse_includes};

pub struct DocumentLinkProvider {
    graph: IncludeGraph,
}

impl DocumentLinkProvider {
    pub fn new(graph: IncludeGraph) -> Self {
        Self {
            graph,
        }
    }

    /// `textDocument/documentLink`: one link per include directive, spanning
    /// the literal path. Unresolved paths keep a tooltip instead of a target.
    pub fn provide(
        &self,
        uri: &Url,
    ) -> Vec<DocumentLink> {
        let Some(entry) = self.graph.entry(uri) else {
            return Vec::new();
        };
        let source = uri.to_file_path().ok();
        parse_includes(&entry.document.text)
            .iter()
            .map(|directive| {
                let target = source
                    .as_deref()
                    .and_then(|source| self.graph.resolver().resolve(source, &directive.path))
                    .and_then(|path| Url::from_file_path(path).ok());
                if target.is_none() {
                    debug!("[links] unresolved include: {}", directive.path);
                }
                let tooltip = target.is_none().then(|| unresolved_tooltip(directive));
                DocumentLink {
                    range: entry.document.range_of(directive.path_range),
                    target,
                    tooltip,
                    data: None,
                }
            })
            .collect()
    }
}

fn unresolved_tooltip(directive: &IncludeDirective) -> String {
    if directive.is_package_path() {
        format!(
            "Cannot find package file: {}\nConfigure shaderlab-analyzer.packageMappings or unityProjectPath",
            directive.path
        )
    } else {
        format!("Cannot find file: {}", directive.path)
    }
}

#[cfg(test)]
#[path = "../../tests/src/links/mod_tests.rs"]
mod tests;
