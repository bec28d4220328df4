use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

const SHADERLABFMT_FILENAME: &str = "shaderlabfmt.toml";

/// Project-level formatter overrides read from `shaderlabfmt.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct ProjectFormatConfig {
    pub(crate) tab_size: Option<u32>,
    pub(crate) enabled: Option<bool>,
}

/// Walks parent directories of `source` looking for `shaderlabfmt.toml`.
/// Returns the path to the first one found, or `None`.
pub(crate) fn find_shaderlabfmt_toml(source: &Path) -> Option<PathBuf> {
    let mut dir = source.parent()?;
    loop {
        let candidate = dir.join(SHADERLABFMT_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads and parses a `shaderlabfmt.toml` file. Unreadable or malformed
/// files count as absent.
pub(crate) fn load_project_config(path: &Path) -> Option<ProjectFormatConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ProjectFormatConfig>(&content) {
        Ok(config) => Some(config),
        Err(error) => {
            debug!("[format] ignoring {}: {error}", path.display());
            None
        },
    }
}

/// The overrides that apply to the document at `source_path`, if any.
pub(crate) fn resolve_project_config(source_path: &Path) -> Option<ProjectFormatConfig> {
    let toml_path = find_shaderlabfmt_toml(source_path)?;
    load_project_config(&toml_path)
}

#[cfg(test)]
#[path = "../../tests/src/server/shaderlabfmt_tests.rs"]
mod tests;
