use std::fmt::{Display, Formatter};

use tower_lsp::lsp_types::{FormattingOptions, Position, Range, TextEdit};
use tracing::debug;

use crate::{
    document::Document,
    format::{MAX_TAB_SIZE, MIN_TAB_SIZE, format_code},
    server::{settings::FormattingSettings, shaderlabfmt},
    syntax::ShaderLanguage,
};

pub(crate) fn format_document(
    document: &Document,
    options: &FormattingOptions,
    formatting_settings: &FormattingSettings,
) -> Result<Option<TextEdit>, FormattingError> {
    if document.language.is_none() {
        return Err(FormattingError::NotApplicable {
            language: language_name(document).to_string(),
        });
    }

    let project = document.uri.to_file_path().ok().and_then(|path| shaderlabfmt::resolve_project_config(&path));
    let project = project.unwrap_or_default();
    if !project.enabled.unwrap_or(formatting_settings.enabled) {
        return Err(FormattingError::Disabled);
    }

    let tab_size = project
        .tab_size
        .or(formatting_settings.tab_size)
        .unwrap_or(options.tab_size)
        .clamp(MIN_TAB_SIZE, MAX_TAB_SIZE);
    debug!("[format] {} with tab size {tab_size}", document.file_name());
    let formatted = format_code(&document.text, tab_size);

    if formatted == document.text {
        return Ok(None);
    }

    Ok(Some(TextEdit {
        range: full_document_range(document),
        new_text: formatted,
    }))
}

/// The `formatShaderLab` command: like [`format_document`] but refuses
/// anything that is not a ShaderLab document.
pub(crate) fn format_shaderlab(
    document: &Document,
    options: &FormattingOptions,
    formatting_settings: &FormattingSettings,
) -> Result<Option<TextEdit>, FormattingError> {
    if document.language != Some(ShaderLanguage::ShaderLab) {
        return Err(FormattingError::NotApplicable {
            language: language_name(document).to_string(),
        });
    }
    format_document(document, options, formatting_settings)
}

fn language_name(document: &Document) -> &'static str {
    document.language.map_or("plaintext", ShaderLanguage::as_str)
}

fn full_document_range(document: &Document) -> Range {
    let end = document.position_of(document.text.len());
    Range {
        start: Position::new(0, 0),
        end,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormattingError {
    NotApplicable {
        language: String,
    },
    Disabled,
}

impl Display for FormattingError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::NotApplicable {
                language,
            } => {
                write!(f, "Current document language is {language}, not shaderlab; cannot format")
            },
            Self::Disabled => write!(f, "formatting is disabled"),
        }
    }
}

impl std::error::Error for FormattingError {}

#[cfg(test)]
#[path = "../../tests/src/server/formatting_tests.rs"]
mod tests;
