use super::types::{BuiltinEntry, ShaderStage};

pub(crate) fn add_vertex_semantics(entries: &mut Vec<BuiltinEntry>) {
    let semantics = [
        ("POSITION", "Vertex position"),
        ("NORMAL", "Normal vector"),
        ("TANGENT", "Tangent vector"),
        ("BINORMAL", "Binormal vector"),
        ("TEXCOORD0", "Texture coordinate 0"),
        ("TEXCOORD1", "Texture coordinate 1"),
        ("TEXCOORD2", "Texture coordinate 2"),
        ("TEXCOORD3", "Texture coordinate 3"),
        ("TEXCOORD4", "Texture coordinate 4"),
        ("TEXCOORD5", "Texture coordinate 5"),
        ("TEXCOORD6", "Texture coordinate 6"),
        ("TEXCOORD7", "Texture coordinate 7"),
        ("COLOR", "Vertex color"),
        ("COLOR0", "Vertex color 0"),
        ("COLOR1", "Vertex color 1"),
        ("BLENDWEIGHT", "Blend weights"),
        ("BLENDINDICES", "Blend indices"),
    ];
    for (name, doc) in semantics {
        entries.push(BuiltinEntry::semantic(name, doc, ShaderStage::Vertex));
    }
}

pub(crate) fn add_system_semantics(entries: &mut Vec<BuiltinEntry>) {
    let semantics = [
        ("SV_Position", "Clip-space position (vertex output, pixel input)", ShaderStage::All),
        ("SV_Target", "Render target output", ShaderStage::Pixel),
        ("SV_Target0", "Render target 0", ShaderStage::Pixel),
        ("SV_Target1", "Render target 1", ShaderStage::Pixel),
        ("SV_Target2", "Render target 2", ShaderStage::Pixel),
        ("SV_Target3", "Render target 3", ShaderStage::Pixel),
        ("SV_Depth", "Depth output", ShaderStage::Pixel),
        ("SV_VertexID", "Vertex index", ShaderStage::Vertex),
        ("SV_InstanceID", "Instance index", ShaderStage::Vertex),
        ("SV_PrimitiveID", "Primitive index", ShaderStage::All),
        ("SV_IsFrontFace", "Whether the primitive is front facing", ShaderStage::Pixel),
        ("SV_SampleIndex", "Sample index", ShaderStage::Pixel),
        ("SV_Coverage", "Coverage mask", ShaderStage::Pixel),
        ("SV_ClipDistance", "Clip distance", ShaderStage::All),
        ("SV_CullDistance", "Cull distance", ShaderStage::All),
        ("SV_RenderTargetArrayIndex", "Render target array index", ShaderStage::All),
        ("SV_ViewportArrayIndex", "Viewport array index", ShaderStage::All),
    ];
    for (name, doc, stage) in semantics {
        entries.push(BuiltinEntry::semantic(name, doc, stage));
    }
}

pub(crate) fn add_compute_semantics(entries: &mut Vec<BuiltinEntry>) {
    let semantics = [
        ("SV_DispatchThreadID", "Global thread index across the whole dispatch"),
        ("SV_GroupID", "Thread group index"),
        ("SV_GroupThreadID", "Thread index within its group"),
        ("SV_GroupIndex", "Flattened thread index within its group"),
    ];
    for (name, doc) in semantics {
        entries.push(BuiltinEntry::semantic(name, doc, ShaderStage::Compute));
    }
}
