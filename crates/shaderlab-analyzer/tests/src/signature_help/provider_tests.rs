use super::*;
use crate::document::DocumentStore;
use crate::includes::{IncludeConfig, IncludeResolver};
use crate::symbols::SymbolCache;
use crate::test_support::TempWorkspace;
use crate::vfs::Vfs;

fn provider_for(workspace: &TempWorkspace) -> SignatureHelpProvider {
    SignatureHelpProvider::new(IncludeGraph::new(
        Vfs::new(Arc::new(DocumentStore::new())),
        Arc::new(SymbolCache::new()),
        Arc::new(IncludeResolver::new(IncludeConfig {
            workspace_roots: vec![workspace.root().to_path_buf()],
            ..IncludeConfig::default()
        })),
    ))
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

fn labels(help: &SignatureHelp) -> Vec<&str> {
    help.signatures.iter().map(|signature| signature.label.as_str()).collect()
}

#[test]
fn builtin_signature_with_active_parameter() {
    let workspace = TempWorkspace::new("signature-builtin");
    let text = "float Main(float a)\n{\n    return lerp(a, \n}\n";
    workspace.write("Main.hlsl", text);

    let provider = provider_for(&workspace);
    let cursor = text.find("a, ").unwrap() + 3;
    let help = provider.provide(&workspace.url("Main.hlsl"), position(text, cursor)).unwrap();
    assert_eq!(labels(&help), vec!["T lerp(T a, T b, T t)"]);
    assert_eq!(help.signatures[0].parameters.as_ref().map(Vec::len), Some(3));
    assert_eq!(help.active_parameter, Some(1));
    assert_eq!(help.active_signature, Some(0));
}

#[test]
fn user_overloads_across_includes() {
    let workspace = TempWorkspace::new("signature-overloads");
    workspace.write("Lib.hlsl", "float Mix(float a) { return a; }\nfloat Mix(float a, float b, float t) { return a; }\n");
    let text = "#include \"Lib.hlsl\"\nfloat Mix(float a) { return a; }\nfloat Main() { return Mix(1, 2, \n}\n";
    workspace.write("Main.hlsl", text);

    let provider = provider_for(&workspace);
    let cursor = text.find("2, ").unwrap() + 3;
    let help = provider.provide(&workspace.url("Main.hlsl"), position(text, cursor)).unwrap();
    assert_eq!(labels(&help), vec!["Mix(float a)", "Mix(float a, float b, float t)"]);
    assert_eq!(help.active_parameter, Some(2));
    assert_eq!(help.active_signature, Some(1));

    let wide = &help.signatures[1];
    let first = &wide.parameters.as_ref().unwrap()[0];
    assert_eq!(first.label, ParameterLabel::Simple("a".to_string()));
    match &wide.documentation {
        Some(Documentation::MarkupContent(markup)) => assert!(markup.value.ends_with("*Defined in: Lib.hlsl*")),
        other => panic!("unexpected documentation: {other:?}"),
    }
}

#[test]
fn no_help_outside_calls_or_for_unknown_names() {
    let workspace = TempWorkspace::new("signature-none");
    let text = "float Main(float a)\n{\n    if (a > \n    float b = Unknown(\n}\n";
    workspace.write("Main.hlsl", text);

    let provider = provider_for(&workspace);
    let uri = workspace.url("Main.hlsl");
    let in_if = text.find("a > ").unwrap() + 4;
    assert!(provider.provide(&uri, position(text, in_if)).is_none());
    let unknown = text.find("Unknown(").unwrap() + 8;
    assert!(provider.provide(&uri, position(text, unknown)).is_none());
}

#[test]
fn shaderlab_documents_have_no_signature_help() {
    let workspace = TempWorkspace::new("signature-shaderlab");
    let text = "Shader \"S\" { SubShader { Pass { CGPROGRAM\nfloat4 f() { return lerp( }\nENDCG } } }\n";
    workspace.write("S.shader", text);

    let provider = provider_for(&workspace);
    let cursor = text.find("lerp(").unwrap() + 5;
    assert!(provider.provide(&workspace.url("S.shader"), position(text, cursor)).is_none());
}
