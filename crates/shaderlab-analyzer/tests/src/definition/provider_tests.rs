use super::*;
use crate::document::DocumentStore;
use crate::includes::{IncludeConfig, IncludeResolver};
use crate::symbols::SymbolCache;
use crate::test_support::TempWorkspace;
use crate::vfs::Vfs;

fn provider_with(config: IncludeConfig) -> DefinitionProvider {
    let graph = IncludeGraph::new(
        Vfs::new(Arc::new(DocumentStore::new())),
        Arc::new(SymbolCache::new()),
        Arc::new(IncludeResolver::new(config)),
    );
    DefinitionProvider::new(graph)
}

fn provider_for(workspace: &TempWorkspace) -> DefinitionProvider {
    provider_with(IncludeConfig {
        workspace_roots: vec![workspace.root().to_path_buf()],
        ..IncludeConfig::default()
    })
}

/// Position of byte `offset` in ASCII `text`.
fn position(
    text: &str,
    offset: usize,
) -> Position {
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let column = before.rfind('\n').map_or(offset, |newline| offset - newline - 1) as u32;
    Position::new(line, column)
}

fn never() -> bool {
    false
}

#[test]
fn parameter_of_enclosing_function_wins() {
    let workspace = TempWorkspace::new("def-param");
    let text = "float A(float2 uv) { return uv.x; }\nfloat B(float3 uv) { return uv.y; }\n";
    workspace.write("Main.hlsl", text);

    let provider = provider_for(&workspace);
    let cursor = text.rfind("uv.y").unwrap();
    let links = provider.provide(&workspace.url("Main.hlsl"), position(text, cursor), None).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target_selection_range.start, position(text, text.rfind("uv)").unwrap()));
    assert_eq!(links[0].origin_selection_range.map(|range| range.start), Some(position(text, cursor)));
}

#[test]
fn include_chain_definition() {
    let workspace = TempWorkspace::new("def-include");
    let text = "#include \"Lib/Noise.hlsl\"\nfloat Main(float2 p) { return Noise(p); }\n";
    workspace.write("Main.hlsl", text);
    workspace.write("Lib/Noise.hlsl", "float Noise(float2 p) { return frac(p.x); }\n");

    let provider = provider_for(&workspace);
    let cursor = text.find("Noise(p)").unwrap();
    let links = provider.provide(&workspace.url("Main.hlsl"), position(text, cursor), None).unwrap();
    assert_eq!(links[0].target_uri, workspace.url("Lib/Noise.hlsl"));
    assert_eq!(links[0].target_selection_range.start, Position::new(0, 6));
}

#[test]
fn rejected_positions() {
    let workspace = TempWorkspace::new("def-reject");
    let text = "#include \"Lib.hlsl\"\n// Helper is documented here\nfloat Helper() { return 42; }\n";
    workspace.write("Main.hlsl", text);
    workspace.write("Lib.hlsl", "float hlsl;\n");

    let provider = provider_for(&workspace);
    let uri = workspace.url("Main.hlsl");
    let in_path = text.find("Lib").unwrap();
    assert!(provider.provide(&uri, position(text, in_path), None).is_none());
    let commented = text.find("Helper is").unwrap();
    assert!(provider.provide(&uri, position(text, commented), None).is_none());
    let numeric = text.find("42").unwrap();
    assert!(provider.provide(&uri, position(text, numeric), None).is_none());

    let declared = text.find("Helper()").unwrap();
    assert!(provider.provide(&uri, position(text, declared), None).is_some());
}

#[test]
fn workspace_fallback_is_opt_in() {
    let workspace = TempWorkspace::new("def-workspace");
    let text = "float Main() { return Remote(); }\n";
    workspace.write("Main.hlsl", text);
    workspace.write("Other/Remote.hlsl", "float Remote() { return 1; }\n");

    let provider = provider_for(&workspace);
    let uri = workspace.url("Main.hlsl");
    let cursor = position(text, text.find("Remote").unwrap());
    assert!(provider.provide(&uri, cursor, None).is_none());

    let roots = vec![workspace.root().to_path_buf()];
    let scan = WorkspaceScan {
        roots: &roots,
        max_files: 10,
        excludes: &[],
        is_cancelled: &never,
    };
    let links = provider.provide(&uri, cursor, Some(scan)).unwrap();
    assert_eq!(links[0].target_uri, workspace.url("Other/Remote.hlsl"));
}

const SHARED_STRUCT_SHADER: &str = "Shader \"Test\"\n{\n    SubShader\n    {\n        CGINCLUDE\n        struct Shared { float4 pos : SV_POSITION; };\n        ENDCG\n        Pass\n        {\n            CGPROGRAM\n            Shared vert(float4 p : POSITION) { Shared o; o.pos = p; return o; }\n            ENDCG\n        }\n    }\n}\n";

#[test]
fn shaderlab_finds_struct_in_shared_region() {
    let workspace = TempWorkspace::new("def-shaderlab-shared");
    let text = SHARED_STRUCT_SHADER;
    workspace.write("Test.shader", text);

    let provider = provider_for(&workspace);
    let cursor = text.find("Shared vert").unwrap();
    let links = provider.provide(&workspace.url("Test.shader"), position(text, cursor), None).unwrap();
    assert_eq!(links[0].target_selection_range.start, position(text, text.find("Shared {").unwrap()));
}

#[test]
fn shaderlab_local_resolves_in_method() {
    let workspace = TempWorkspace::new("def-shaderlab-local");
    let text = SHARED_STRUCT_SHADER;
    workspace.write("Test.shader", text);

    let provider = provider_for(&workspace);
    let cursor = text.find("p; return").unwrap();
    let links = provider.provide(&workspace.url("Test.shader"), position(text, cursor), None).unwrap();
    assert_eq!(links[0].target_selection_range.start, position(text, text.find("p : POSITION").unwrap()));
}

#[test]
fn shaderlab_region_include_then_library() {
    let workspace = TempWorkspace::new("def-shaderlab-include");
    let library = TempWorkspace::new("def-shaderlab-library");
    library.write(UNITY_CG_INCLUDE, "float4 UnityObjectToClipPos(float3 pos) { return float4(pos, 1); }\n");
    workspace.write("Lib.hlsl", "float Helper(float x) { return x; }\n");
    let text = "Shader \"Inc\"\n{\n    SubShader\n    {\n        Pass\n        {\n            CGPROGRAM\n            #include \"Lib.hlsl\"\n            float4 vert(float3 v : POSITION) : SV_POSITION { return UnityObjectToClipPos(v) * Helper(1); }\n            ENDCG\n        }\n    }\n}\n";
    workspace.write("Inc.shader", text);

    let provider = provider_with(IncludeConfig {
        workspace_roots: vec![workspace.root().to_path_buf()],
        cg_includes_path: Some(library.root().to_path_buf()),
        ..IncludeConfig::default()
    });
    let uri = workspace.url("Inc.shader");

    let helper = position(text, text.find("Helper(1)").unwrap());
    let links = provider.provide(&uri, helper, None).unwrap();
    assert_eq!(links[0].target_uri, workspace.url("Lib.hlsl"));

    let unity = position(text, text.find("UnityObjectToClipPos").unwrap());
    let links = provider.provide(&uri, unity, None).unwrap();
    assert_eq!(links[0].target_uri, library.url(UNITY_CG_INCLUDE));

    let missing = position(text, text.find("vert").unwrap() + 20);
    assert!(provider.provide(&uri, missing, None).is_none());
}

#[test]
fn navigable_words() {
    assert!(is_navigable_word("Sample"));
    assert!(is_navigable_word("_MainTex"));
    assert!(!is_navigable_word("123"));
    assert!(!is_navigable_word("HLSL"));
    assert!(!is_navigable_word(""));
}
