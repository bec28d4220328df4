use super::*;

const HLSL: &str = "#include   \"UnityCG.cginc\"\nstruct V2F{float4 pos:SV_POSITION;float2 uv:TEXCOORD0;};\nfloat4 frag(V2F i):SV_Target{\nfloat4 c=tex2D(_MainTex,i.uv)*_Color; // tint\nif(c.a < 0.5)\ndiscard;\n#if defined(FOG)\nc.rgb*=0.5;\n#endif\nreturn c;}\n";

const HLSL_FORMATTED: &str = "#include \"UnityCG.cginc\"
struct V2F
{
    float4 pos : SV_POSITION;
    float2 uv : TEXCOORD0;
};
float4 frag(V2F i) : SV_Target
{
    float4 c = tex2D(_MainTex, i.uv) * _Color;  // tint
    if (c.a < 0.5)
        discard;
    #if defined(FOG)
        c.rgb *= 0.5;
    #endif
    return c;
}
";

const SHADERLAB: &str = "Shader \"Unlit/Tint\"{\nProperties{\n_Color(\"Color\",Color)=(1,1,1,1)\n_MainTex (\"Texture\", 2D) = \"white\" {}\n}\nSubShader{\nTags{\"Queue\"=\"Transparent\"}\nPass{\nCGPROGRAM\n#pragma vertex vert\nfixed4 _Color;\nENDCG\n}\n}\n}\n";

const SHADERLAB_FORMATTED: &str = "Shader \"Unlit/Tint\"
{
    Properties
    {
        _Color(\"Color\", Color) = (1, 1, 1, 1)
        _MainTex (\"Texture\", 2D) = \"white\" {}
    }
    SubShader
    {
        Tags
        {
            \"Queue\" = \"Transparent\"
        }
        Pass
        {
            CGPROGRAM
            #pragma vertex vert
            fixed4 _Color;
            ENDCG
        }
    }
}
";

#[test]
fn formats_hlsl() {
    assert_eq!(format_code(HLSL, 4), HLSL_FORMATTED);
}

#[test]
fn formats_shaderlab() {
    assert_eq!(format_code(SHADERLAB, 4), SHADERLAB_FORMATTED);
}

#[test]
fn formatted_text_is_stable() {
    assert_eq!(format_code(HLSL_FORMATTED, 4), HLSL_FORMATTED);
    assert_eq!(format_code(SHADERLAB_FORMATTED, 4), SHADERLAB_FORMATTED);
}

#[test]
fn line_endings_and_trailing_blank_lines() {
    assert_eq!(format_code("float a;\r\nfloat b;\r\n\r\n\r\n", 4), "float a;\nfloat b;\n");
    assert_eq!(format_code("", 4), "\n");
}

#[test]
fn tab_size_controls_indentation() {
    assert_eq!(format_code("void f(){return;}", 2), "void f()\n{\n  return;\n}\n");
    assert_eq!(format_code("void f(){return;}", 0), "void f()\n{\n return;\n}\n");
}

#[test]
fn oversized_tab_size_is_capped() {
    let expected = format!("void f()\n{{\n{}return;\n}}\n", " ".repeat(16));
    assert_eq!(format_code("void f(){return;}", 10_000), expected);
    assert_eq!(format_code("void f(){return;}", u32::MAX), expected);
}

#[test]
fn template_arguments_and_comparisons_keep_their_spacing() {
    let text = "Texture2D<float4> _MainTex;\nbool Less(float a, float b){return a < b;}\n";
    let expected = "Texture2D<float4> _MainTex;\nbool Less(float a, float b)\n{\n    return a < b;\n}\n";
    assert_eq!(format_code(text, 4), expected);
}
