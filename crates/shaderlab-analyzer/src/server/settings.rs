use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    format::{MAX_TAB_SIZE, MIN_TAB_SIZE},
    includes::IncludeConfig,
};

pub(crate) const SETTINGS_SECTION_KEY: &str = "shaderlab-analyzer";
const MIN_WORKSPACE_FILES: usize = 1;
const MAX_WORKSPACE_FILES: usize = 20_000;
const DEFAULT_WORKSPACE_FILES: usize = 500;

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ServerSettings {
    pub(crate) cg_includes_path: Option<String>,
    pub(crate) unity_project_path: Option<String>,
    /// Package prefix to directory, longest prefix first.
    pub(crate) package_mappings: Vec<(String, String)>,
    pub(crate) formatting: FormattingSettings,
    pub(crate) indexing: IndexingSettings,
    pub(crate) logging: LoggingSettings,
}

impl ServerSettings {
    pub(crate) fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub(crate) fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    /// Include resolution settings for the given workspace folders.
    pub(crate) fn include_config(
        &self,
        workspace_roots: Vec<PathBuf>,
    ) -> IncludeConfig {
        IncludeConfig {
            cg_includes_path: self.cg_includes_path.as_ref().map(PathBuf::from),
            unity_project_path: self.unity_project_path.as_ref().map(PathBuf::from),
            package_mappings: self
                .package_mappings
                .iter()
                .map(|(prefix, dir)| (prefix.clone(), PathBuf::from(dir)))
                .collect(),
            workspace_roots,
        }
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(path) = patch.cg_includes_path {
            self.cg_includes_path = Some(path);
        }
        if let Some(path) = patch.unity_project_path {
            self.unity_project_path = Some(path);
        }
        if let Some(mappings) = patch.package_mappings {
            self.package_mappings = mappings.into_iter().collect();
        }
        if let Some(formatting) = patch.formatting {
            self.formatting.apply_patch(formatting);
        }
        if let Some(indexing) = patch.indexing {
            self.indexing.apply_patch(indexing);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.cg_includes_path = trimmed(self.cg_includes_path.take());
        self.unity_project_path = trimmed(self.unity_project_path.take());

        let mut seen = HashSet::new();
        let mut mappings: Vec<(String, String)> = self
            .package_mappings
            .iter()
            .map(|(prefix, dir)| (prefix.trim().trim_end_matches('/').to_string(), dir.trim().to_string()))
            .filter(|(prefix, dir)| !prefix.is_empty() && !dir.is_empty())
            .filter(|(prefix, _)| seen.insert(prefix.clone()))
            .collect();
        mappings.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.package_mappings = mappings;

        self.formatting.normalize();
        self.indexing.normalize();
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormattingSettings {
    pub(crate) enabled: bool,
    pub(crate) tab_size: Option<u32>,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tab_size: None,
        }
    }
}

impl FormattingSettings {
    fn apply_patch(
        &mut self,
        patch: FormattingSettingsPatch,
    ) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(tab_size) = patch.tab_size {
            self.tab_size = Some(u32::try_from(tab_size).unwrap_or(MAX_TAB_SIZE));
        }
    }

    fn normalize(&mut self) {
        self.tab_size = self.tab_size.map(|size| size.clamp(MIN_TAB_SIZE, MAX_TAB_SIZE));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexingSettings {
    pub(crate) workspace_fallback: bool,
    pub(crate) max_workspace_files: usize,
    pub(crate) exclude_paths: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            workspace_fallback: true,
            max_workspace_files: DEFAULT_WORKSPACE_FILES,
            exclude_paths: Vec::new(),
        }
    }
}

impl IndexingSettings {
    fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(workspace_fallback) = patch.workspace_fallback {
            self.workspace_fallback = workspace_fallback;
        }
        if let Some(max_workspace_files) = patch.max_workspace_files {
            self.max_workspace_files = max_workspace_files;
        }
        if let Some(exclude_paths) = patch.exclude_paths {
            self.exclude_paths = exclude_paths;
        }
    }

    fn normalize(&mut self) {
        self.max_workspace_files = self.max_workspace_files.clamp(MIN_WORKSPACE_FILES, MAX_WORKSPACE_FILES);
        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .filter(|path| seen.insert(path.clone()))
            .collect();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LoggingSettings {
    pub(crate) level: LoggingLevel,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub(crate) fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    #[serde(alias = "Unity CGIncludes Path")]
    cg_includes_path: Option<String>,
    unity_project_path: Option<String>,
    package_mappings: Option<BTreeMap<String, String>>,
    formatting: Option<FormattingSettingsPatch>,
    indexing: Option<IndexingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct FormattingSettingsPatch {
    enabled: Option<bool>,
    tab_size: Option<u64>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct IndexingSettingsPatch {
    workspace_fallback: Option<bool>,
    max_workspace_files: Option<usize>,
    exclude_paths: Option<Vec<String>>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
