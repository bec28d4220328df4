use super::*;
use crate::test_support::TempWorkspace;

fn resolver_for(workspace: &TempWorkspace) -> IncludeResolver {
    IncludeResolver::new(IncludeConfig {
        workspace_roots: vec![workspace.root().to_path_buf()],
        ..IncludeConfig::default()
    })
}

#[test]
fn relative_path_wins() {
    let workspace = TempWorkspace::new("resolve-relative");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let local = workspace.write("Shaders/Common.hlsl", "");
    workspace.write("Common.hlsl", "");

    let resolver = resolver_for(&workspace);
    assert_eq!(resolver.resolve_with_origin(&source, "Common.hlsl"), Some((local, ResolvedBy::Relative)));
}

#[test]
fn workspace_root_then_library_root() {
    let workspace = TempWorkspace::new("resolve-roots");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let rooted = workspace.write("Lib/Noise.hlsl", "");
    let library = TempWorkspace::new("resolve-library");
    let cg = library.write("UnityCG.cginc", "");

    let resolver = IncludeResolver::new(IncludeConfig {
        workspace_roots: vec![workspace.root().to_path_buf()],
        cg_includes_path: Some(library.root().to_path_buf()),
        ..IncludeConfig::default()
    });
    assert_eq!(resolver.resolve_with_origin(&source, "Lib/Noise.hlsl"), Some((rooted, ResolvedBy::WorkspaceRoot)));
    assert_eq!(resolver.resolve_with_origin(&source, "UnityCG.cginc"), Some((cg, ResolvedBy::LibraryRoot)));
    assert_eq!(resolver.resolve(&source, "Missing.hlsl"), None);
}

#[test]
fn package_mapping_resolves_and_falls_through() {
    let workspace = TempWorkspace::new("resolve-mapping");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let real = TempWorkspace::new("resolve-mapping-real");
    let foo = real.write("Foo.hlsl", "");

    let resolver = IncludeResolver::new(IncludeConfig {
        package_mappings: vec![("com.acme.core".to_string(), real.root().to_path_buf())],
        ..IncludeConfig::default()
    });
    assert_eq!(
        resolver.resolve_with_origin(&source, "Packages/com.acme.core/Foo.hlsl"),
        Some((foo, ResolvedBy::PackageMapping))
    );
    assert_eq!(resolver.resolve(&source, "Packages/com.acme.core/Bar.hlsl"), None);
    assert_eq!(resolver.resolve(&source, "Packages/com.acme.core2/Foo.hlsl"), None);
}

#[test]
fn mapping_miss_falls_through_to_workspace_root() {
    let workspace = TempWorkspace::new("resolve-mapping-fallthrough");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let rooted = workspace.write("Packages/com.acme.core/Bar.hlsl", "");
    let real = TempWorkspace::new("resolve-mapping-empty");

    let resolver = IncludeResolver::new(IncludeConfig {
        package_mappings: vec![("com.acme.core".to_string(), real.root().to_path_buf())],
        workspace_roots: vec![workspace.root().to_path_buf()],
        ..IncludeConfig::default()
    });
    assert_eq!(
        resolver.resolve_with_origin(&source, "Packages/com.acme.core/Bar.hlsl"),
        Some((rooted, ResolvedBy::WorkspaceRoot))
    );
}

#[test]
fn package_registry_is_used_for_unity_projects() {
    let project = TempWorkspace::new("resolve-registry");
    project.write("Assets/.keep", "");
    let source = project.write("Assets/Shaders/Lit.shader", "");
    let common = project.write("Library/PackageCache/com.unity.render-pipelines.core@14.0.8/ShaderLibrary/Common.hlsl", "");

    let resolver = resolver_for(&project);
    assert_eq!(
        resolver.resolve_with_origin(&source, "Packages/com.unity.render-pipelines.core/ShaderLibrary/Common.hlsl"),
        Some((common, ResolvedBy::PackageRegistry))
    );
}

#[test]
fn configuration_change_reaches_new_library_root() {
    let workspace = TempWorkspace::new("resolve-config");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let library = TempWorkspace::new("resolve-config-library");
    let target = library.write("Late.hlsl", "");

    let resolver = resolver_for(&workspace);
    assert_eq!(resolver.resolve(&source, "Late.hlsl"), None);

    let changed = resolver.configure(IncludeConfig {
        workspace_roots: vec![workspace.root().to_path_buf()],
        cg_includes_path: Some(library.root().to_path_buf()),
        ..IncludeConfig::default()
    });
    assert!(changed);
    assert_eq!(resolver.resolve(&source, "Late.hlsl"), Some(target));
    assert!(!resolver.configure((*resolver.config()).clone()));
}

#[test]
fn deleted_target_is_resolved_again() {
    let workspace = TempWorkspace::new("resolve-deleted");
    let source = workspace.write("Shaders/Main.hlsl", "");
    let local = workspace.write("Shaders/Common.hlsl", "");
    let rooted = workspace.write("Common.hlsl", "");

    let resolver = resolver_for(&workspace);
    assert_eq!(resolver.resolve(&source, "Common.hlsl"), Some(local.clone()));
    std::fs::remove_file(&local).unwrap();
    assert_eq!(resolver.resolve(&source, "Common.hlsl"), Some(rooted));
}

#[test]
fn header_created_after_a_miss_is_found() {
    let workspace = TempWorkspace::new("resolve-created");
    let source = workspace.write("Shaders/Main.hlsl", "");

    let resolver = resolver_for(&workspace);
    assert_eq!(resolver.resolve(&source, "Effects/Blur.fxh"), None);
    let created = workspace.write("Shaders/Effects/Blur.fxh", "");
    assert_eq!(resolver.resolve(&source, "Effects/Blur.fxh"), Some(created));
}

#[test]
fn parent_relative_includes_are_normalized() {
    let workspace = TempWorkspace::new("resolve-parent");
    let source = workspace.write("sub/Main.hlsl", "");
    let lib = workspace.write("inc/Lib.hlsl", "");

    let resolver = resolver_for(&workspace);
    assert_eq!(resolver.resolve_with_origin(&source, "../inc/Lib.hlsl"), Some((lib, ResolvedBy::Relative)));
    assert_eq!(resolver.resolve(&source, "./../inc/../inc/Lib.hlsl"), Some(workspace.path("inc/Lib.hlsl")));
}
