use super::*;
use tower_lsp::lsp_types::Url;

fn snapshot(
    text: &str,
    fingerprint: Fingerprint,
) -> Snapshot {
    let url = Url::parse("file:///proj/Shaders/Common.hlsl").unwrap();
    Snapshot {
        file: FileId::from_url(&url),
        document: Document::new(url, text.to_string(), 1),
        fingerprint,
    }
}

#[test]
fn same_fingerprint_reuses_the_entry() {
    let cache = SymbolCache::new();
    let first = cache.get(&snapshot("float4 _Color;", Fingerprint::Version(1))).unwrap();
    let second = cache.get(&snapshot("float4 _Color;", Fingerprint::Version(1))).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn version_bump_rebuilds_synchronously() {
    let cache = SymbolCache::new();
    let before = cache.get(&snapshot("float4 _Before;", Fingerprint::Version(1))).unwrap();
    assert!(before.find_by_name("_Before").is_some());

    let after = cache.get(&snapshot("float4 _After;", Fingerprint::Version(2))).unwrap();
    assert!(after.find_by_name("_After").is_some());
    assert!(after.find_by_name("_Before").is_none());
    // the old tree is untouched for readers that still hold it
    assert!(before.find_by_name("_Before").is_some());
}

#[test]
fn invalidate_and_remove_drop_entries() {
    let cache = SymbolCache::new();
    let snap = snapshot("float x;", Fingerprint::Content(7));
    cache.get(&snap).unwrap();
    cache.invalidate(&snap.file);
    assert!(cache.is_empty());

    cache.get(&snap).unwrap();
    assert!(cache.remove(&snap.file));
    assert!(!cache.remove(&snap.file));
    assert!(cache.is_empty());
}

#[test]
fn unsupported_language_has_no_entry() {
    let cache = SymbolCache::new();
    let url = Url::parse("file:///proj/readme.md").unwrap();
    let snap = Snapshot {
        file: FileId::from_url(&url),
        document: Document::new(url, "# title".to_string(), 1),
        fingerprint: Fingerprint::Version(1),
    };
    assert!(cache.get(&snap).is_none());
}

#[test]
fn parameters_stop_at_the_body() {
    let cache = SymbolCache::new();
    let text = "float Blend(float a, float b)\n{\n    float t = a * b;\n    return t;\n}\n";
    let entry = cache.get(&snapshot(text, Fingerprint::Version(1))).unwrap();
    let blend = entry.find_by_name("Blend").unwrap();
    let params: Vec<&str> = entry.parameters(blend).iter().map(|id| entry.tree.get(*id).name.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(entry.signature_label(blend), "Blend(float a, float b)");
}
