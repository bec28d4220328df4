use super::*;

fn contents(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(|line| line.content.as_str()).collect()
}

#[test]
fn comments_start_outside_strings() {
    assert_eq!(split_comment("  float x; // note "), ("float x;", "// note"));
    assert_eq!(split_comment("Name \"A//B\" /* c */"), ("Name \"A//B\"", "/* c */"));
    assert_eq!(split_comment("// only"), ("", "// only"));
}

#[test]
fn statements_split_outside_parentheses() {
    let lines = split_lines("for(int i=0;i<4;i++){x+=i;}");
    assert_eq!(contents(&lines), vec!["for(int i=0;i<4;i++)", "{", "x+=i;", "}"]);
}

#[test]
fn empty_blocks_stay_inline() {
    assert_eq!(contents(&split_lines("_MainTex (\"Texture\", 2D) = \"white\"   { }")), vec![
        "_MainTex (\"Texture\", 2D) = \"white\" {}"
    ]);
    assert_eq!(contents(&split_lines("struct A { } ;")), vec!["struct A {};"]);
}

#[test]
fn comment_attaches_to_last_piece() {
    let lines = split_lines("a = 1; b = 2; // both");
    assert_eq!(contents(&lines), vec!["a = 1;", "b = 2;"]);
    assert_eq!(lines[0].comment, "");
    assert_eq!(lines[1].comment, "// both");
}

#[test]
fn block_comments_are_not_code() {
    let lines = split_lines("/* header\n * {x;y;}\n */\nfloat a;b;");
    assert_eq!(contents(&lines), vec!["", "", "", "float a;", "b;"]);
    let comments: Vec<&str> = lines.iter().map(|line| line.comment.as_str()).collect();
    assert_eq!(comments, vec!["/* header", "* {x;y;}", "*/", "", ""]);
}

#[test]
fn braces_inside_strings_do_not_split() {
    assert_eq!(contents(&split_lines("Name \"A{B}\"")), vec!["Name \"A{B}\""]);
}

#[test]
fn directives_only_collapse_whitespace() {
    assert_eq!(contents(&split_lines("#define  BLOCK { a; b; }")), vec!["#define BLOCK { a; b; }"]);
    assert_eq!(collapse_spaces("  #include   \"A  B.hlsl\" "), "#include \"A  B.hlsl\"");
}
