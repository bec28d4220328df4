use super::*;
use crate::syntax::never_cancelled;

#[test]
fn dispatches_on_language() {
    let text = "Shader \"X\" { SubShader { Pass { CGPROGRAM\nfloat4 _Tint;\nENDCG } } }";
    let shaderlab = extract(ShaderLanguage::ShaderLab, text, &never_cancelled).unwrap();
    assert_eq!(shaderlab.get(shaderlab.roots()[0]).kind, SymbolKind::File);

    let hlsl = extract(ShaderLanguage::Hlsl, "float4 _Tint;", &never_cancelled).unwrap();
    assert_eq!(hlsl.get(hlsl.roots()[0]).name, "_Tint");
}

#[test]
fn cancellation_is_reported() {
    let big = "float4 a;\n".repeat(4096);
    let result = extract(ShaderLanguage::Hlsl, &big, &|| true);
    assert_eq!(result.err(), Some(Cancelled));
}

#[test]
fn empty_text_yields_empty_tree() {
    let tree = extract(ShaderLanguage::Hlsl, "", &never_cancelled).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn multibyte_text_does_not_break_offsets() {
    let text = "// température\nfloat4 _Couleur; // 颜色\n";
    let tree = extract(ShaderLanguage::Hlsl, text, &never_cancelled).unwrap();
    let id = tree.find_by_name("_Couleur").unwrap();
    assert_eq!(tree.get(id).selection_range.slice(text), "_Couleur");
}
