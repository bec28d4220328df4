use std::collections::HashMap;
use std::sync::OnceLock;

use super::types::{BuiltinEntry, BuiltinKind, TypeCategory};
use super::{functions, keywords, semantics};

static ALL_BUILTINS: OnceLock<Vec<BuiltinEntry>> = OnceLock::new();
static BUILTIN_MAP: OnceLock<HashMap<(String, BuiltinKind), usize>> = OnceLock::new();

fn build_builtins() -> Vec<BuiltinEntry> {
    let mut entries = Vec::with_capacity(400);

    let type_groups = [
        (keywords::SCALAR_TYPES, TypeCategory::Scalar),
        (keywords::VECTOR_TYPES, TypeCategory::Vector),
        (keywords::MATRIX_TYPES, TypeCategory::Matrix),
        (keywords::SAMPLER_TYPES, TypeCategory::Sampler),
        (keywords::TEXTURE_TYPES, TypeCategory::Texture),
        (keywords::RW_TEXTURE_TYPES, TypeCategory::RwTexture),
        (keywords::BUFFER_TYPES, TypeCategory::Buffer),
    ];
    for (names, category) in type_groups {
        for name in names {
            entries.push(BuiltinEntry::typ(name, category));
        }
    }

    for keyword in keywords::all_keywords() {
        entries.push(BuiltinEntry::keyword(keyword));
    }
    entries.push(BuiltinEntry::keyword("numthreads"));

    functions::add_math_functions(&mut entries);
    functions::add_texture_functions(&mut entries);
    functions::add_intrinsic_functions(&mut entries);
    functions::add_compute_functions(&mut entries);
    functions::add_unity_functions(&mut entries);
    functions::add_compute_snippets(&mut entries);

    semantics::add_vertex_semantics(&mut entries);
    semantics::add_system_semantics(&mut entries);
    semantics::add_compute_semantics(&mut entries);

    entries
}

pub fn all() -> &'static [BuiltinEntry] {
    ALL_BUILTINS.get_or_init(build_builtins)
}

fn lookup_kind(
    name: &str,
    kind: BuiltinKind,
) -> Option<&'static BuiltinEntry> {
    let map = BUILTIN_MAP.get_or_init(|| {
        let entries = all();
        let mut m = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            m.entry((entry.label.clone(), entry.kind)).or_insert(i);
        }
        m
    });

    map.get(&(name.to_string(), kind)).map(|&i| &all()[i])
}

pub fn function(name: &str) -> Option<&'static BuiltinEntry> {
    lookup_kind(name, BuiltinKind::Function)
}

pub fn semantic(name: &str) -> Option<&'static BuiltinEntry> {
    lookup_kind(name, BuiltinKind::Semantic).or_else(|| {
        all()
            .iter()
            .find(|entry| entry.kind == BuiltinKind::Semantic && entry.label.eq_ignore_ascii_case(name))
    })
}

pub fn of_kind(kind: BuiltinKind) -> impl Iterator<Item = &'static BuiltinEntry> {
    all().iter().filter(move |entry| entry.kind == kind)
}
