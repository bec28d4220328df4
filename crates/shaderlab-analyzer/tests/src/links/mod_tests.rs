use std::sync::Arc;

use tower_lsp::lsp_types::Position;

use super::*;
use crate::document::DocumentStore;
use crate::includes::{IncludeConfig, IncludeResolver};
use crate::symbols::SymbolCache;
use crate::test_support::TempWorkspace;
use crate::vfs::Vfs;

fn provider_for(workspace: &TempWorkspace) -> DocumentLinkProvider {
    DocumentLinkProvider::new(IncludeGraph::new(
        Vfs::new(Arc::new(DocumentStore::new())),
        Arc::new(SymbolCache::new()),
        Arc::new(IncludeResolver::new(IncludeConfig {
            workspace_roots: vec![workspace.root().to_path_buf()],
            ..IncludeConfig::default()
        })),
    ))
}

#[test]
fn resolved_and_unresolved_links() {
    let workspace = TempWorkspace::new("links");
    workspace.write("Lib/Common.hlsl", "float Common() { return 0; }\n");
    workspace.write(
        "Main.hlsl",
        "#include \"Lib/Common.hlsl\"\n#include \"Missing.hlsl\"\n#include \"Packages/com.acme.core/Foo.hlsl\"\n",
    );

    let links = provider_for(&workspace).provide(&workspace.url("Main.hlsl"));
    assert_eq!(links.len(), 3);

    assert_eq!(links[0].target, Some(workspace.url("Lib/Common.hlsl")));
    assert!(links[0].tooltip.is_none());
    assert_eq!(links[0].range.start, Position::new(0, 10));
    assert_eq!(links[0].range.end, Position::new(0, 25));

    assert!(links[1].target.is_none());
    assert_eq!(links[1].tooltip.as_deref(), Some("Cannot find file: Missing.hlsl"));

    let package = links[2].tooltip.as_deref().unwrap();
    assert!(package.contains("Packages/com.acme.core/Foo.hlsl"));
    assert!(package.contains("packageMappings"));
    assert!(package.contains("unityProjectPath"));
}

#[test]
fn commented_includes_and_unknown_documents_have_no_links() {
    let workspace = TempWorkspace::new("links-none");
    workspace.write("Main.hlsl", "// #include \"Lib.hlsl\"\nfloat x;\n");

    let provider = provider_for(&workspace);
    assert!(provider.provide(&workspace.url("Main.hlsl")).is_empty());
    assert!(provider.provide(&workspace.url("Absent.hlsl")).is_empty());
}
