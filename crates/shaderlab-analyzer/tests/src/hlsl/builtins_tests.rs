use super::*;

#[test]
fn function_lookup_prefers_function_entries() {
    let clip = function("clip").unwrap();
    assert_eq!(clip.kind, BuiltinKind::Function);
    assert_eq!(clip.detail, "void clip(T v)");
}

#[test]
fn function_snippet_uses_parameter_names() {
    let lerp = function("lerp").unwrap();
    assert_eq!(lerp.insert_text.as_deref(), Some("lerp(${1:a}, ${2:b}, ${3:t})"));
    let barrier = function("GroupMemoryBarrierWithGroupSync").unwrap();
    assert_eq!(barrier.insert_text.as_deref(), Some("GroupMemoryBarrierWithGroupSync()"));
}

#[test]
fn signature_parameters_split_on_top_level_commas() {
    assert_eq!(
        signature_parameters("void InterlockedAdd(inout T dest, T value, out T original)"),
        vec!["inout T dest", "T value", "out T original"]
    );
    assert!(signature_parameters("void AllMemoryBarrier()").is_empty());
}

#[test]
fn semantics_are_found_case_insensitively() {
    let position = semantic("SV_POSITION").unwrap();
    assert_eq!(position.label, "SV_Position");
    assert_eq!(semantic("SV_DispatchThreadID").unwrap().stage, Some(ShaderStage::Compute));
}

#[test]
fn type_entries_carry_categories() {
    let rw = of_kind(BuiltinKind::Type).find(|entry| entry.label == "RWTexture2D").unwrap();
    assert_eq!(rw.type_category, Some(TypeCategory::RwTexture));
}

#[test]
fn shaderlab_cards() {
    let card = shaderlab_function("UnityObjectToClipPos").unwrap();
    assert_eq!(card.signature, "float4 UnityObjectToClipPos(float4 pos)");
    assert!(shaderlab_function("ddx").is_none());
}
