use super::{prefixed_progress_title, progress_token_name};

#[test]
fn progress_title_adds_prefix_when_missing() {
    assert_eq!(prefixed_progress_title(" Workspace symbols "), "shaderlab-analyzer: Workspace symbols".to_string());
}

#[test]
fn progress_title_preserves_existing_prefix() {
    assert_eq!(
        prefixed_progress_title("shaderlab-analyzer: Workspace symbols"),
        "shaderlab-analyzer: Workspace symbols".to_string()
    );
}

#[test]
fn progress_tokens_are_namespaced() {
    assert_eq!(progress_token_name("Workspace symbols", 7), "shaderlabAnalyzer/Workspace symbols/7");
}
