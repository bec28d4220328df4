mod brackets;
mod lexical;

use std::path::Path;

use tower_lsp::lsp_types::Url;

pub use brackets::{BracketKind, BracketRegion, BracketTree, RegionId};
pub use lexical::{CharClass, class_at, for_each_class, mask_comments};

/// Extensions that belong to the shader family handled by the watcher and
/// the workspace scans.
pub const SHADER_FAMILY_EXTENSIONS: &[&str] = &["shader", "cginc", "hlsl", "hlsli", "compute"];

/// Glob registered with the client file watcher.
pub const SHADER_FAMILY_GLOB: &str = "**/*.{shader,cginc,hlsl,hlsli,compute}";

/// The two languages understood by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLanguage {
    /// Unity's declarative `.shader` wrapper with embedded code regions.
    ShaderLab,
    /// Plain HLSL / Cg source (`.hlsl`, `.cginc`, `.compute`, ...).
    Hlsl,
}

impl ShaderLanguage {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "shader" => Some(Self::ShaderLab),
            "hlsl" | "hlsli" | "cginc" | "compute" | "fx" | "fxh" => Some(Self::Hlsl),
            _ => None,
        }
    }

    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id.to_ascii_lowercase().as_str() {
            "shaderlab" => Some(Self::ShaderLab),
            "hlsl" | "cg" => Some(Self::Hlsl),
            _ => None,
        }
    }

    /// Pick a language from the client's `languageId` first, then the
    /// file extension.
    pub fn detect(
        uri: &Url,
        language_id: Option<&str>,
    ) -> Option<Self> {
        if let Some(language) = language_id.and_then(Self::from_language_id) {
            return Some(language);
        }
        let path = uri.to_file_path().ok()?;
        Self::from_path(&path)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShaderLab => "shaderlab",
            Self::Hlsl => "hlsl",
        }
    }
}

pub fn is_shader_family_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SHADER_FAMILY_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Half-open byte range into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Containment used for cursor queries: both ends are inclusive, so a
    /// cursor sitting right after the last character still counts.
    pub fn contains(
        &self,
        offset: usize,
    ) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn contains_range(
        &self,
        other: TextRange,
    ) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Shrink `self` so that it lies inside `outer`.
    pub fn clamped_to(
        self,
        outer: TextRange,
    ) -> Self {
        let start = self.start.clamp(outer.start, outer.end);
        let end = self.end.clamp(start, outer.end);
        Self {
            start,
            end,
        }
    }

    pub fn shifted(
        self,
        base: usize,
    ) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }

    /// Text covered by this range, or `""` when it does not fall on char
    /// boundaries of `text`.
    pub fn slice<'a>(
        &self,
        text: &'a str,
    ) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Returned by scans that observed a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// A cancellation check that never fires.
pub fn never_cancelled() -> bool {
    false
}

#[cfg(test)]
#[path = "../../tests/src/syntax/mod_tests.rs"]
mod tests;
