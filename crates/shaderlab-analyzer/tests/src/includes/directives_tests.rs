use super::*;

#[test]
fn quoted_and_angled_paths_are_found() {
    let text = "#include \"UnityCG.cginc\"\n#include <Packages/com.unity.core/Common.hlsl>\n";
    let directives = parse_includes(text);
    assert_eq!(directives.len(), 2);

    assert_eq!(directives[0].path, "UnityCG.cginc");
    assert!(!directives[0].angled);
    assert_eq!(directives[0].path_range.slice(text), "UnityCG.cginc");
    assert_eq!(directives[0].range.slice(text), "#include \"UnityCG.cginc\"");

    assert!(directives[1].angled);
    assert!(directives[1].is_package_path());
}

#[test]
fn commented_includes_are_ignored() {
    let text = "// #include \"Old.hlsl\"\n/* #include \"Older.hlsl\" */\n  #include \"New.hlsl\"\n";
    let directives = parse_includes(text);
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].path, "New.hlsl");
}

#[test]
fn spaced_hash_is_accepted() {
    let directives = parse_includes("#  include \"A.hlsl\"");
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].path, "A.hlsl");
}

#[test]
fn lookup_by_offset_and_line() {
    let text = "float a;\n#include \"Lib/B.hlsl\"\n";
    let directives = parse_includes(text);
    let inside = text.find("B.hlsl").unwrap();
    assert_eq!(include_at(&directives, inside).map(|d| d.path.as_str()), Some("Lib/B.hlsl"));
    assert!(include_at(&directives, 2).is_none());

    let hash = text.find('#').unwrap();
    assert!(include_on_line(&directives, text, hash).is_some());
    assert!(include_on_line(&directives, text, 3).is_none());
}
