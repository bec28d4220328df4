use super::*;
use crate::document::DocumentStore;
use crate::test_support::TempWorkspace;

fn provider() -> (SymbolProvider, Arc<DocumentStore>) {
    let documents = Arc::new(DocumentStore::new());
    let provider = SymbolProvider::new(Arc::new(SymbolCache::new()), Vfs::new(Arc::clone(&documents)));
    (provider, documents)
}

fn never() -> bool {
    false
}

#[test]
fn outline_nests_children() {
    let (provider, documents) = provider();
    let uri = Url::parse("file:///proj/Light.hlsl").unwrap();
    documents.open(uri.clone(), "struct Light\n{\n    float3 color;\n};\n".to_string(), 1, "hlsl");

    let symbols = provider.document_symbols(&uri).unwrap();
    assert_eq!(symbols.len(), 1);
    let light = &symbols[0];
    assert_eq!(light.kind, lsp_types::SymbolKind::STRUCT);
    assert_eq!(light.detail.as_deref(), Some("struct"));
    let children = light.children.as_ref().unwrap();
    assert_eq!(children[0].name, "color");
    assert_eq!(children[0].detail.as_deref(), Some("float3"));
    assert_eq!(children[0].selection_range.start, lsp_types::Position::new(2, 11));
}

#[test]
fn deeply_nested_outline_is_built() {
    let (provider, documents) = provider();
    let uri = Url::parse("file:///proj/Deep.shader").unwrap();
    let text = "Shader \"Deep\" { SubShader { Pass { CGPROGRAM\nstruct v2f { float4 pos : SV_POSITION; };\nv2f vert(float4 p : POSITION) { v2f o; return o; }\nENDCG } } }";
    documents.open(uri.clone(), text.to_string(), 1, "shaderlab");

    let symbols = provider.document_symbols(&uri).unwrap();
    let mut depth = 0;
    let mut level = &symbols;
    while let Some(first) = level.first() {
        depth += 1;
        match &first.children {
            Some(children) => level = children,
            None => break,
        }
    }
    // Shader > SubShader > Pass > CGPROGRAM > v2f > pos
    assert_eq!(depth, 6);
}

#[test]
fn workspace_search_matches_case_insensitively() {
    let workspace = TempWorkspace::new("workspace-symbols");
    workspace.write("Shaders/Lighting.hlsl", "float3 ComputeLighting(float3 n) { return n; }\n");
    workspace.write("Shaders/Fog.cginc", "float ComputeFog(float d) { return d; }\n");
    let (provider, _documents) = provider();
    let roots = vec![workspace.root().to_path_buf()];

    let results = provider.workspace_symbols("compute", &roots, 100, &[], &never);
    let mut names: Vec<&str> = results.iter().map(|info| info.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["ComputeFog", "ComputeLighting"]);

    let params = provider.workspace_symbols("n", &roots, 100, &[], &never);
    assert!(params.is_empty());
}

#[test]
fn workspace_results_carry_container_names() {
    let workspace = TempWorkspace::new("workspace-container");
    workspace.write("Surface.hlsl", "struct SurfaceData { float3 albedo; };\n");
    let (provider, _documents) = provider();
    let roots = vec![workspace.root().to_path_buf()];
    let results = provider.workspace_symbols("albedo", &roots, 100, &[], &never);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].container_name.as_deref(), Some("SurfaceData"));
    assert_eq!(results[0].kind, lsp_types::SymbolKind::FIELD);
}

#[test]
fn cancelled_search_returns_partial_results() {
    let workspace = TempWorkspace::new("workspace-cancel");
    workspace.write("a.hlsl", "float Alpha;\n");
    let (provider, _documents) = provider();
    let roots = vec![workspace.root().to_path_buf()];
    let results = provider.workspace_symbols("alpha", &roots, 100, &[], &|| true);
    assert!(results.is_empty());
}
