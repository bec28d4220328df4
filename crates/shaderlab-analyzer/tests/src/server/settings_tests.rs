use std::path::PathBuf;

use serde_json::json;

use super::*;

#[test]
fn defaults_without_payload() {
    let settings = ServerSettings::from_lsp_payload(None);
    assert_eq!(settings.cg_includes_path, None);
    assert!(settings.package_mappings.is_empty());
    assert!(settings.formatting.enabled);
    assert_eq!(settings.formatting.tab_size, None);
    assert!(settings.indexing.workspace_fallback);
    assert_eq!(settings.indexing.max_workspace_files, 500);
    assert_eq!(settings.logging.level, LoggingLevel::Info);
}

#[test]
fn reads_flat_and_scoped_payloads() {
    let flat = json!({
        "cgIncludesPath": "/opt/unity/CGIncludes",
        "formatting": { "tabSize": 2 }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&flat));
    assert_eq!(settings.cg_includes_path.as_deref(), Some("/opt/unity/CGIncludes"));
    assert_eq!(settings.formatting.tab_size, Some(2));

    let scoped = json!({
        "shaderlab-analyzer": {
            "unityProjectPath": "/projects/game",
            "logging": { "level": "debug" }
        }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&scoped));
    assert_eq!(settings.unity_project_path.as_deref(), Some("/projects/game"));
    assert_eq!(settings.logging.level, LoggingLevel::Debug);
}

#[test]
fn accepts_legacy_library_key() {
    let payload = json!({ "Unity CGIncludes Path": "  C:/Unity/CGIncludes  " });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.cg_includes_path.as_deref(), Some("C:/Unity/CGIncludes"));
}

#[test]
fn blank_paths_are_unset() {
    let payload = json!({ "cgIncludesPath": "   ", "unityProjectPath": "" });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.cg_includes_path, None);
    assert_eq!(settings.unity_project_path, None);
}

#[test]
fn package_mappings_are_cleaned_and_ordered() {
    let payload = json!({
        "packageMappings": {
            "com.unity.render-pipelines.core/": " /pkgs/core ",
            "com.unity.render-pipelines.core.runtime": "/pkgs/runtime",
            "": "/pkgs/nothing",
            "com.empty": "  "
        }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(
        settings.package_mappings,
        vec![
            ("com.unity.render-pipelines.core.runtime".to_string(), "/pkgs/runtime".to_string()),
            ("com.unity.render-pipelines.core".to_string(), "/pkgs/core".to_string()),
        ]
    );
}

#[test]
fn clamps_numeric_settings() {
    let payload = json!({
        "formatting": { "tabSize": 64 },
        "indexing": { "maxWorkspaceFiles": 0 }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.formatting.tab_size, Some(16));
    assert_eq!(settings.indexing.max_workspace_files, 1);

    let payload = json!({
        "formatting": { "tabSize": 0 },
        "indexing": { "maxWorkspaceFiles": 1_000_000 }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.formatting.tab_size, Some(1));
    assert_eq!(settings.indexing.max_workspace_files, 20_000);
}

#[test]
fn preserves_existing_values_when_payload_is_partial() {
    let base = ServerSettings {
        cg_includes_path: Some("/lib".to_string()),
        formatting: FormattingSettings {
            enabled: false,
            ..FormattingSettings::default()
        },
        ..ServerSettings::default()
    };
    let payload = json!({ "indexing": { "workspaceFallback": false } });

    let merged = base.merged_with_payload(&payload);
    assert_eq!(merged.cg_includes_path.as_deref(), Some("/lib"));
    assert!(!merged.formatting.enabled);
    assert!(!merged.indexing.workspace_fallback);
}

#[test]
fn unknown_keys_are_ignored() {
    let payload = json!({
        "someOtherTool": { "enabled": false },
        "formatting": { "style": "allman", "enabled": false }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(!settings.formatting.enabled);
}

#[test]
fn indexing_exclude_paths_are_trimmed_and_deduplicated() {
    let payload = json!({
        "indexing": {
            "excludePaths": [
                "",
                "  Library/PackageCache  ",
                "Library/PackageCache",
                "/tmp/generated"
            ]
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(
        settings.indexing.exclude_paths,
        vec!["Library/PackageCache".to_string(), "/tmp/generated".to_string()]
    );
}

#[test]
fn include_config_carries_paths_and_roots() {
    let payload = json!({
        "cgIncludesPath": "/lib",
        "packageMappings": { "com.acme.shaders": "/acme" }
    });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    let config = settings.include_config(vec![PathBuf::from("/ws")]);
    assert_eq!(config.cg_includes_path, Some(PathBuf::from("/lib")));
    assert_eq!(config.unity_project_path, None);
    assert_eq!(config.package_mappings, vec![("com.acme.shaders".to_string(), PathBuf::from("/acme"))]);
    assert_eq!(config.workspace_roots, vec![PathBuf::from("/ws")]);
}

#[test]
fn logging_level_gates_info() {
    assert!(LoggingLevel::Trace.allows_info());
    assert!(LoggingLevel::Info.allows_info());
    assert!(!LoggingLevel::Warn.allows_info());
}
