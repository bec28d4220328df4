//! Short reference cards shown when hovering builtin calls inside ShaderLab
//! code regions.

pub struct ShaderLabFunction {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

const fn card(
    name: &'static str,
    signature: &'static str,
    description: &'static str,
) -> ShaderLabFunction {
    ShaderLabFunction {
        name,
        signature,
        description,
    }
}

static FUNCTIONS: &[ShaderLabFunction] = &[
    card("clip", "void clip(float v)", "Discards the current pixel when the argument is below 0"),
    card("floor", "T floor(T v)", "Rounds down (per channel)"),
    card("abs", "T abs(T v)", "Absolute value (per channel)"),
    card("min", "T min(T v1,T v2)", "Minimum of the arguments (per channel)"),
    card("ceil", "T ceil(T v)", "Rounds up (per channel)"),
    card("round", "T round(T v)", "Rounds to the nearest integer (per channel)"),
    card("clamp", "T clamp(T v,T min,T max)", "Limits the argument to the given range (per channel)"),
    card("saturate", "T saturate(T v)", "Limits the argument to [0, 1] (per channel)"),
    card("frac", "T frac(T v)", "Fractional part of the argument (per channel)"),
    card("lerp", "T lerp(T v1,T v2,float t)", "Interpolates between v1 and v2 by t (per channel)"),
    card("smoothstep", "T smoothstep(T edge1,T edge2,T v)", "Smooth interpolation between edge1 and edge2 (per channel)"),
    card("sqrt", "T sqrt(T v)", "Square root (per channel)"),
    card("sin", "T sin(T v)", "Sine (per channel)"),
    card("cos", "T cos(T v)", "Cosine (per channel)"),
    card("tan", "T tan(T v)", "Tangent (per channel)"),
    card("length", "float length(T v)", "Length of a vector (vector arguments only)"),
    card("step", "T step(T edge,T v)", "1.0 when v >= edge, otherwise 0.0 (per channel)"),
    card("max", "T max(T v1,T v2)", "Maximum of the arguments (per channel)"),
    card("normalize", "T normalize(T v)", "Normalizes the argument (vector arguments only)"),
    card("pow", "float pow(float v,float exp)", "Raises v to the power exp"),
    card("dot", "float dot(T v1,T v2)", "Dot product"),
    card("mul", "float4 mul(float4x4 matrix, float4 pos)", "Matrix and vector multiplication"),
    card("tex2D", "float4 tex2D(sampler2D tex, float2 uv)", "Texture sample"),
    card(
        "UnityObjectToClipPos",
        "float4 UnityObjectToClipPos(float4 pos)",
        "Transforms a `position` from object space to clip space",
    ),
    card(
        "UnityObjectToWorldNormal",
        "float3 UnityObjectToWorldNormal(float3 normal)",
        "Transforms a `normal` from object space to world space",
    ),
    card(
        "UnityWorldSpaceLightDir",
        "float3 UnityWorldSpaceLightDir(float3 pos)",
        "World-space direction from the point towards the main light",
    ),
    card(
        "UnityWorldSpaceViewDir",
        "float3 UnityWorldSpaceViewDir(float3 pos)",
        "World-space direction from the point towards the main camera",
    ),
    card("TRANSFORM_TEX", "float2 TRANSFORM_TEX(float2 uv, sampler2D tex)", "Applies scale and offset to UV coordinates"),
];

pub fn shaderlab_function(name: &str) -> Option<&'static ShaderLabFunction> {
    FUNCTIONS.iter().find(|function| function.name == name)
}
