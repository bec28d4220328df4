use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::vfs;

use super::PACKAGES_PREFIX;
use super::packages::PackageRegistry;

/// Inputs of include resolution that come from settings and the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeConfig {
    /// Fallback library root for built-in headers (`cgIncludesPath`).
    pub cg_includes_path: Option<PathBuf>,
    /// Explicit project root for `Packages/...` paths.
    pub unity_project_path: Option<PathBuf>,
    /// `package-prefix -> directory` overrides, tried in order.
    pub package_mappings: Vec<(String, PathBuf)>,
    pub workspace_roots: Vec<PathBuf>,
}

impl IncludeConfig {
    /// The configured project root, or the first workspace root that looks
    /// like a Unity project (has an `Assets` directory).
    pub fn project_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.unity_project_path {
            return Some(root.clone());
        }
        self.workspace_roots.iter().find(|root| root.join("Assets").is_dir()).cloned()
    }
}

/// Which strategy produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    Relative,
    PackageMapping,
    PackageRegistry,
    WorkspaceRoot,
    LibraryRoot,
}

/// Maps include literals to files. Every lookup checks the file system
/// again; only the package registry is cached, and it is dropped whenever
/// the configuration changes.
#[derive(Debug, Default)]
pub struct IncludeResolver {
    config: RwLock<Arc<IncludeConfig>>,
    packages: PackageRegistry,
}

impl IncludeResolver {
    pub fn new(config: IncludeConfig) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            ..Self::default()
        }
    }

    pub fn config(&self) -> Arc<IncludeConfig> {
        match self.config.read() {
            Ok(config) => Arc::clone(&config),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install a new configuration. Returns `false` when nothing changed.
    pub fn configure(
        &self,
        config: IncludeConfig,
    ) -> bool {
        let mut current = self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if **current == config {
            return false;
        }
        *current = Arc::new(config);
        drop(current);
        self.clear_package_cache();
        true
    }

    pub fn clear_package_cache(&self) {
        self.packages.clear_package_cache();
    }

    /// Resolve `literal` as written in `source`.
    pub fn resolve(
        &self,
        source: &Path,
        literal: &str,
    ) -> Option<PathBuf> {
        self.resolve_with_origin(source, literal).map(|(path, _)| path)
    }

    pub fn resolve_with_origin(
        &self,
        source: &Path,
        literal: &str,
    ) -> Option<(PathBuf, ResolvedBy)> {
        let literal = literal.trim();
        if literal.is_empty() {
            return None;
        }
        let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
        let resolved = self.locate(source_dir, literal);
        match &resolved {
            Some((path, origin)) => debug!("[includes] '{literal}' -> {} ({origin:?})", path.display()),
            None => debug!("[includes] '{literal}' unresolved from {}", source_dir.display()),
        }
        resolved
    }

    /// The four strategies in order. Candidates are normalized lexically so
    /// that `../` includes name the same file as the editor does.
    fn locate(
        &self,
        source_dir: &Path,
        literal: &str,
    ) -> Option<(PathBuf, ResolvedBy)> {
        let config = self.config();

        let relative = vfs::lexically_normalized(&source_dir.join(literal));
        if vfs::is_file(&relative) {
            return Some((relative, ResolvedBy::Relative));
        }

        if let Some(found) = self.resolve_package_path(&config, literal) {
            return Some(found);
        }

        for root in &config.workspace_roots {
            let candidate = vfs::lexically_normalized(&root.join(literal));
            if vfs::is_file(&candidate) {
                return Some((candidate, ResolvedBy::WorkspaceRoot));
            }
        }

        let library = vfs::lexically_normalized(&config.cg_includes_path.as_ref()?.join(literal));
        vfs::is_file(&library).then_some((library, ResolvedBy::LibraryRoot))
    }

    fn resolve_package_path(
        &self,
        config: &IncludeConfig,
        literal: &str,
    ) -> Option<(PathBuf, ResolvedBy)> {
        let after_prefix = literal.strip_prefix(PACKAGES_PREFIX)?;

        for (prefix, dir) in &config.package_mappings {
            let Some(rest) = after_prefix.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if !(rest.is_empty() || rest.starts_with('/')) {
                continue;
            }
            let candidate = vfs::lexically_normalized(&dir.join(rest.trim_start_matches('/')));
            if vfs::is_file(&candidate) {
                return Some((candidate, ResolvedBy::PackageMapping));
            }
        }

        let project_root = config.project_root()?;
        let (package, file) = after_prefix.split_once('/')?;
        if package.is_empty() {
            return None;
        }
        let candidate = vfs::lexically_normalized(&self.packages.resolve_package(&project_root, package)?.join(file));
        vfs::is_file(&candidate).then_some((candidate, ResolvedBy::PackageRegistry))
    }
}

#[cfg(test)]
#[path = "../../tests/src/includes/resolver_tests.rs"]
mod tests;
