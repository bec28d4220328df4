//! Package name -> directory registry of a Unity project.
//!
//! `Library/PackageCache` holds registry packages as `name@version`
//! directories; `Packages/` holds local packages that declare their name in
//! `package.json`. Local packages shadow cached ones of the same name.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Deserialize;
use tracing::debug;

pub type PackageMap = HashMap<String, PathBuf>;

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
}

#[derive(Debug)]
struct Scanned {
    project_root: PathBuf,
    packages: Arc<PackageMap>,
}

/// Scanned packages of the most recently used project root.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    scanned: Mutex<Option<Scanned>>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages of `project_root`, scanning the file system only when the
    /// root differs from the one scanned last.
    pub fn packages(
        &self,
        project_root: &Path,
    ) -> Arc<PackageMap> {
        let mut scanned = self.lock();
        if let Some(current) = scanned.as_ref()
            && current.project_root == project_root
        {
            return Arc::clone(&current.packages);
        }
        let packages = Arc::new(scan_project(project_root));
        debug!("[packages] scanned {} package(s) under {}", packages.len(), project_root.display());
        *scanned = Some(Scanned {
            project_root: project_root.to_path_buf(),
            packages: Arc::clone(&packages),
        });
        packages
    }

    pub fn resolve_package(
        &self,
        project_root: &Path,
        name: &str,
    ) -> Option<PathBuf> {
        self.packages(project_root).get(name).cloned()
    }

    /// Forget the scan so the next lookup rescans.
    pub fn clear_package_cache(&self) {
        if self.lock().take().is_some() {
            debug!("[packages] registry cleared");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Scanned>> {
        self.scanned.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn scan_project(project_root: &Path) -> PackageMap {
    let mut packages = PackageMap::new();
    scan_package_cache(&project_root.join("Library").join("PackageCache"), &mut packages);
    scan_local_packages(&project_root.join("Packages"), &mut packages);
    packages
}

fn scan_package_cache(
    dir: &Path,
    packages: &mut PackageMap,
) {
    let mut versions: HashMap<String, (String, PathBuf)> = HashMap::new();
    for path in subdirectories(dir) {
        let Some(dir_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some((name, version)) = dir_name.split_once('@') else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let newer = versions
            .get(name)
            .is_none_or(|(current, _)| compare_versions(version, current) != Ordering::Less);
        if newer {
            versions.insert(name.to_owned(), (version.to_owned(), path));
        }
    }
    packages.extend(versions.into_iter().map(|(name, (_, path))| (name, path)));
}

fn scan_local_packages(
    dir: &Path,
    packages: &mut PackageMap,
) {
    for path in subdirectories(dir) {
        let manifest_path = path.join("package.json");
        let Ok(text) = std::fs::read_to_string(&manifest_path) else {
            continue;
        };
        match serde_json::from_str::<PackageManifest>(&text) {
            Ok(PackageManifest {
                name: Some(name),
            }) if !name.trim().is_empty() => {
                packages.insert(name.trim().to_owned(), path);
            },
            Ok(_) => {},
            Err(error) => debug!("[packages] invalid {}: {error}", manifest_path.display()),
        }
    }
}

/// Sub-directories of `dir` sorted by name; empty when `dir` is unreadable.
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs
}

/// Orders `1.10.0` after `1.9.2`. Numeric segments compare as numbers,
/// anything else (commit hashes, pre-release tags) as text.
pub fn compare_versions(
    a: &str,
    b: &str,
) -> Ordering {
    let mut left = a.split(['.', '-', '+']);
    let mut right = b.split(['.', '-', '+']);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/includes/packages_tests.rs"]
mod tests;
