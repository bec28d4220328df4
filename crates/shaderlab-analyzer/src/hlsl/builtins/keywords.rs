pub const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue", "return", "discard", "clip",
];

pub const STORAGE_KEYWORDS: &[&str] =
    &["struct", "cbuffer", "tbuffer", "ConstantBuffer", "class", "interface", "namespace"];

pub const MODIFIER_KEYWORDS: &[&str] = &[
    "const",
    "static",
    "extern",
    "volatile",
    "inline",
    "uniform",
    "shared",
    "groupshared",
    "precise",
    "nointerpolation",
    "noperspective",
    "centroid",
    "sample",
    "linear",
    "point",
    "lineadj",
    "triangleadj",
    "triangle",
    "in",
    "out",
    "inout",
    "row_major",
    "column_major",
    "register",
    "packoffset",
];

pub const OTHER_KEYWORDS: &[&str] = &["true", "false", "NULL"];

pub const SCALAR_TYPES: &[&str] = &[
    "bool", "int", "uint", "half", "float", "double", "dword", "min16float", "min10float", "min16int", "min12int",
    "min16uint", "void", "string",
];

pub const VECTOR_TYPES: &[&str] = &[
    "float2",
    "float3",
    "float4",
    "half2",
    "half3",
    "half4",
    "int2",
    "int3",
    "int4",
    "uint2",
    "uint3",
    "uint4",
    "bool2",
    "bool3",
    "bool4",
    "double2",
    "double3",
    "double4",
    "min16float2",
    "min16float3",
    "min16float4",
    "min16int2",
    "min16int3",
    "min16int4",
    "min16uint2",
    "min16uint3",
    "min16uint4",
];

pub const MATRIX_TYPES: &[&str] = &[
    "float2x2",
    "float2x3",
    "float2x4",
    "float3x2",
    "float3x3",
    "float3x4",
    "float4x2",
    "float4x3",
    "float4x4",
    "half2x2",
    "half3x3",
    "half4x4",
    "int2x2",
    "int3x3",
    "int4x4",
    "uint2x2",
    "uint3x3",
    "uint4x4",
    "bool2x2",
    "bool3x3",
    "bool4x4",
    "double2x2",
    "double3x3",
    "double4x4",
    "matrix",
    "row_major",
    "column_major",
];

pub const SAMPLER_TYPES: &[&str] = &[
    "sampler",
    "sampler1D",
    "sampler2D",
    "sampler3D",
    "samplerCUBE",
    "sampler_state",
    "SamplerState",
    "SamplerComparisonState",
];

pub const TEXTURE_TYPES: &[&str] = &[
    "Texture1D",
    "Texture1DArray",
    "Texture2D",
    "Texture2DArray",
    "Texture2DMS",
    "Texture2DMSArray",
    "Texture3D",
    "TextureCube",
    "TextureCubeArray",
];

pub const RW_TEXTURE_TYPES: &[&str] =
    &["RWTexture1D", "RWTexture1DArray", "RWTexture2D", "RWTexture2DArray", "RWTexture3D"];

pub const BUFFER_TYPES: &[&str] = &[
    "Buffer",
    "RWBuffer",
    "StructuredBuffer",
    "RWStructuredBuffer",
    "ByteAddressBuffer",
    "RWByteAddressBuffer",
    "AppendStructuredBuffer",
    "ConsumeStructuredBuffer",
];

/// Lowercase prefixes that mark an identifier as a builtin type spelling
/// (`float3x4`, `texture2d`, ...).
pub const TYPE_PREFIXES: &[&str] = &[
    "bool",
    "int",
    "uint",
    "half",
    "float",
    "double",
    "dword",
    "min16float",
    "min10float",
    "min16int",
    "min12int",
    "min16uint",
    "void",
    "string",
    "sampler",
    "texture",
    "rwtexture",
    "buffer",
    "structuredbuffer",
    "appendstructuredbuffer",
    "consumestructuredbuffer",
];

pub fn all_keywords() -> impl Iterator<Item = &'static str> {
    CONTROL_KEYWORDS
        .iter()
        .chain(STORAGE_KEYWORDS)
        .chain(MODIFIER_KEYWORDS)
        .chain(OTHER_KEYWORDS)
        .copied()
}
