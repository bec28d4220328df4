use super::*;
use crate::syntax::never_cancelled;

fn parent_tree(text: &str) -> (SymbolTree, SymbolId) {
    let mut tree = SymbolTree::new();
    let id = tree.push(
        None,
        Symbol::new("f", "", SymbolKind::Function, TextRange::new(0, text.len()), TextRange::new(0, 1)),
    );
    (tree, id)
}

#[test]
fn split_top_level_ignores_nested_commas() {
    let text = "float a, Buffer<float2> b, float c[(1, 2)]";
    let pieces = split_top_level(text, TextRange::new(0, text.len()));
    let parts: Vec<&str> = pieces.iter().map(|range| range.slice(text).trim()).collect();
    assert_eq!(parts, vec!["float a", "Buffer<float2> b", "float c[(1, 2)]"]);
}

#[test]
fn params_skip_modifiers_and_semantics() {
    let text = "inout float3 normal : NORMAL, uint id : SV_VertexID";
    let (mut tree, parent) = parent_tree(text);
    push_params(&mut tree, parent, text, TextRange::new(0, text.len()));
    let children = tree.children(parent);
    assert_eq!(children.len(), 2);
    let normal = tree.get(children[0]);
    assert_eq!(normal.name, "normal");
    assert_eq!(normal.detail, "float3");
    assert_eq!(normal.selection_range.slice(text), "normal");
    assert_eq!(tree.get(children[1]).detail, "uint");
    assert_eq!(tree.get(children[1]).range.slice(text), "uint id : SV_VertexID");
}

#[test]
fn fields_record_array_size_and_semantic() {
    let text = "{ float4 pos : SV_POSITION; float weights[4]; return x; }";
    let (mut tree, parent) = parent_tree(text);
    push_fields(&mut tree, parent, text, TextRange::new(1, text.len() - 1), true);
    let details: Vec<(String, String)> = tree
        .children(parent)
        .iter()
        .map(|id| (tree.get(*id).name.clone(), tree.get(*id).detail.clone()))
        .collect();
    assert_eq!(
        details,
        vec![
            ("pos".to_string(), "float4 : SV_POSITION".to_string()),
            ("weights".to_string(), "float[4]".to_string()),
        ]
    );
}

#[test]
fn locals_skip_statements_and_unknown_types() {
    let text = "{ float4 c = tex(uv); return c; v2f o; foo bar; }";
    let (mut tree, parent) = parent_tree(text);
    let accepts = |ty: &str| ty == "float4" || ty == "v2f";
    push_locals(&mut tree, parent, text, TextRange::new(1, text.len() - 1), &accepts);
    let names: Vec<&str> = tree.children(parent).iter().map(|id| tree.get(*id).name.as_str()).collect();
    assert_eq!(names, vec!["c", "o"]);
}

#[test]
fn run_pass_contains_panics() {
    let mut tree = SymbolTree::new();
    run_pass("boom", &mut tree, |tree| {
        tree.push(None, Symbol::new("kept", "", SymbolKind::Variable, TextRange::new(0, 4), TextRange::new(0, 4)));
        panic!("pass failure");
    });
    assert_eq!(tree.len(), 1);
}

#[test]
fn declared_types_collects_struct_and_class_names() {
    let text = "struct v2f { float4 pos; }; class Light {};";
    let brackets = BracketTree::build(text, &never_cancelled).unwrap();
    let source = Source {
        masked: text,
        brackets: &brackets,
    };
    let names = source.declared_types(TextRange::new(0, text.len()));
    assert!(names.contains("v2f"));
    assert!(names.contains("Light"));
    assert!(source.brace_at(text.find('{').unwrap()).is_some());
    assert!(!source.is_top_level(text.find("pos").unwrap()));
}
