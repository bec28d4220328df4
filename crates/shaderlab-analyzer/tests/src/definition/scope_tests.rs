use super::*;

fn cursor(text: &str) -> (String, usize) {
    let offset = text.find('|').unwrap();
    (text.replacen('|', "", 1), offset)
}

#[test]
fn block_locals_then_parameters() {
    let (text, offset) = cursor(
        "float4 Frag(v2f i, float3 n : NORMAL) : SV_Target\n{\n    float4 c = tex2D(_MainTex, i.uv);\n    half k;\n    |\n}",
    );
    let locals = locals_in_scope(&text, offset);
    let names: Vec<_> = locals.iter().map(|local| (local.name.as_str(), local.origin)).collect();
    assert_eq!(
        names,
        vec![
            ("c", LocalOrigin::Block),
            ("k", LocalOrigin::Block),
            ("i", LocalOrigin::Parameter),
            ("n", LocalOrigin::Parameter),
        ]
    );
    assert_eq!(locals[2].type_name, "v2f");
}

#[test]
fn block_local_shadows_parameter() {
    let (text, offset) = cursor("void F(float2 uv)\n{\n    float3 uv = 0;\n    |\n}");
    let locals = locals_in_scope(&text, offset);
    assert_eq!(locals.len(), 1);
    assert_eq!(locals[0].type_name, "float3");
    assert_eq!(variable_type(&text, offset, "uv").as_deref(), Some("float3"));
}

#[test]
fn statements_are_not_declarations() {
    let (text, offset) = cursor("void F()\n{\n    float4 c = 1;\n    return c;\n    else x;\n    |\n}");
    let names: Vec<_> = locals_in_scope(&text, offset).into_iter().map(|local| local.name).collect();
    assert_eq!(names, vec!["c"]);
}

#[test]
fn closed_blocks_are_out_of_scope() {
    let (text, offset) = cursor("void F()\n{\n    if (true)\n    {\n        float hidden = 1;\n    }\n    float shown;\n    |\n}");
    let names: Vec<_> = locals_in_scope(&text, offset).into_iter().map(|local| local.name).collect();
    assert!(names.contains(&"shown".to_string()));
    assert!(!names.contains(&"hidden".to_string()));
}

#[test]
fn for_header_declares_loop_variable() {
    let (text, offset) = cursor("void F()\n{\n    for (int i = 0; i < 4; i++)\n    {\n        |\n    }\n}");
    let locals = locals_in_scope(&text, offset);
    assert_eq!(locals.len(), 1);
    assert_eq!(locals[0].name, "i");
    assert_eq!(locals[0].type_name, "int");
}

#[test]
fn if_condition_is_not_a_parameter_list() {
    let (text, offset) = cursor("void F(float a)\n{\n    if (uint b = 0)\n    {\n        |\n    }\n}");
    assert!(locals_in_scope(&text, offset).is_empty());
}

#[test]
fn outer_declarations_are_found_by_the_window_scan() {
    let (text, offset) = cursor("void F()\n{\n    float3 dir = 0;\n    if (true)\n    {\n        dir.|\n    }\n}");
    assert_eq!(variable_type(&text, offset, "dir").as_deref(), Some("float3"));
    assert_eq!(variable_type(&text, offset, "missing"), None);
}

#[test]
fn commented_declarations_are_ignored() {
    let (text, offset) = cursor("void F()\n{\n    // float2 v;\n    |\n}");
    assert!(locals_in_scope(&text, offset).is_empty());
    assert_eq!(variable_type(&text, offset, "v"), None);
}

#[test]
fn template_types_are_normalised() {
    let (text, offset) = cursor("void F()\n{\n    StructuredBuffer< Light > lights;\n    |\n}");
    let locals = locals_in_scope(&text, offset);
    assert_eq!(locals[0].type_name, "StructuredBuffer<Light>");
}
