use super::*;
use crate::syntax::{BracketTree, mask_comments, never_cancelled};

const UNLIT: &str = r#"Shader "Custom/Unlit"
{
    Properties
    {
        _MainTex ("Texture", 2D) = "white" {}
        _Radius ("Radius", Range(0,10)) = 1.0
    }
    CGINCLUDE
    struct Shared { float4 color; };
    ENDCG
    SubShader
    {
        Pass
        {
            CGPROGRAM
            #pragma vertex vert
            struct appdata
            {
                float4 vertex : POSITION;
                float2 uv : TEXCOORD0;
            };
            struct v2f
            {
                float2 uv : TEXCOORD0;
                float4 vertex : SV_POSITION;
            };
            sampler2D _MainTex;
            float4 _Colors[4];
            v2f vert (appdata v)
            {
                v2f o;
                o.vertex = UnityObjectToClipPos(v.vertex);
                Shared s;
                Unknown u;
                return o;
            }
            ENDCG
        }
    }
}
"#;

fn extract_text(text: &str) -> SymbolTree {
    let masked = mask_comments(text, &never_cancelled).unwrap();
    let brackets = BracketTree::build(&masked, &never_cancelled).unwrap();
    let source = Source {
        masked: &masked,
        brackets: &brackets,
    };
    let mut tree = SymbolTree::new();
    extract(&source, &mut tree);
    tree
}

fn names(
    tree: &SymbolTree,
    id: SymbolId,
) -> Vec<String> {
    tree.children(id).iter().map(|child| tree.get(*child).name.clone()).collect()
}

fn only_child(
    tree: &SymbolTree,
    parent: SymbolId,
    name: &str,
) -> SymbolId {
    tree.find_child(Some(parent), name).unwrap()
}

#[test]
fn shader_blocks_form_the_outline() {
    let tree = extract_text(UNLIT);
    assert_eq!(tree.roots().len(), 1);
    let shader = tree.roots()[0];
    assert_eq!(tree.get(shader).kind, SymbolKind::File);
    assert_eq!(tree.get(shader).name, "Shader");
    assert_eq!(tree.get(shader).detail, "\"Custom/Unlit\"");
    assert_eq!(names(&tree, shader), vec!["Properties", "SubShader", "CGINCLUDE"]);

    let properties = only_child(&tree, shader, "Properties");
    assert_eq!(names(&tree, properties), vec!["_MainTex", "_Radius"]);
    let radius = only_child(&tree, properties, "_Radius");
    assert_eq!(tree.get(radius).kind, SymbolKind::Property);
    assert_eq!(tree.get(radius).detail, "Range(0,10)");

    let subshader = only_child(&tree, shader, "SubShader");
    let pass = only_child(&tree, subshader, "Pass");
    assert_eq!(names(&tree, pass), vec!["CGPROGRAM"]);
}

#[test]
fn code_region_contents() {
    let tree = extract_text(UNLIT);
    let region = tree.find_by_name("CGPROGRAM").unwrap();
    assert_eq!(tree.get(region).kind, SymbolKind::Package);
    assert_eq!(names(&tree, region), vec!["appdata", "v2f", "vert", "_MainTex", "_Colors"]);

    let v2f = only_child(&tree, region, "v2f");
    assert_eq!(names(&tree, v2f), vec!["uv", "vertex"]);
    let vertex = only_child(&tree, v2f, "vertex");
    assert_eq!(tree.get(vertex).detail, "float4 : SV_POSITION");

    let colors = only_child(&tree, region, "_Colors");
    assert_eq!(tree.get(colors).detail, "float4[4]");

    let vert = only_child(&tree, region, "vert");
    assert_eq!(tree.get(vert).kind, SymbolKind::Method);
    assert_eq!(tree.get(vert).detail, "v2f");
    assert_eq!(names(&tree, vert), vec!["v", "o", "s"]);
}

#[test]
fn region_range_spans_both_markers() {
    let tree = extract_text(UNLIT);
    let region = tree.find_by_name("CGPROGRAM").unwrap();
    let text = tree.get(region).range.slice(UNLIT);
    assert!(text.starts_with("CGPROGRAM"));
    assert!(text.ends_with("ENDCG"));
}

#[test]
fn type_lookup_walks_enclosing_levels() {
    let tree = extract_text(UNLIT);
    let inside_vert = UNLIT.find("v2f o;").unwrap();
    assert!(is_type(&tree, inside_vert, "v2f"));
    assert!(is_type(&tree, inside_vert, "Shared"));
    assert!(is_type(&tree, inside_vert, "half3"));
    assert!(is_type(&tree, inside_vert, "sampler2D"));
    assert!(!is_type(&tree, inside_vert, "Unknown"));
    assert!(!is_type(&tree, 0, "v2f"));
}

#[test]
fn hlsl_region_markers() {
    let text = "Shader \"X\" { SubShader { Pass { HLSLPROGRAM\nhalf4 _Tint;\nENDHLSL } } }";
    let tree = extract_text(text);
    let region = tree.find_by_name("HLSLPROGRAM").unwrap();
    let tint = only_child(&tree, region, "_Tint");
    assert_eq!(tree.get(tint).detail, "half4");
}

#[test]
fn unterminated_region_is_skipped() {
    let text = "Shader \"X\" { SubShader { Pass { CGPROGRAM\nfloat4 _Tint;\n } } }";
    let tree = extract_text(text);
    assert!(tree.find_by_name("CGPROGRAM").is_none());
    assert!(tree.find_by_name("Pass").is_some());
}

#[test]
fn document_without_shader_block_is_empty() {
    let tree = extract_text("// just a comment\nfloat4 x;");
    assert!(tree.is_empty());
}
