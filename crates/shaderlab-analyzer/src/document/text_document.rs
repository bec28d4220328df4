use tower_lsp::lsp_types::*;

use crate::syntax::{ShaderLanguage, TextRange};

// ── Document ────────────────────────────────────────────────────────────────

/// Snapshot of a text document, either open in the client or read from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client; 0 for files read from disk.
    pub version: i32,
    /// Language picked from the client's `languageId` or the file extension.
    pub language: Option<ShaderLanguage>,
    /// Pre-computed line start byte offsets (rebuilt on every mutation).
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = Self::compute_line_offsets(&text);
        let language = ShaderLanguage::detect(&uri, None);
        Self {
            uri,
            text,
            version,
            language,
            line_offsets,
        }
    }

    /// Prefer the client's `languageId` over the extension when it names a
    /// supported language.
    pub fn with_language_id(
        mut self,
        language_id: &str,
    ) -> Self {
        if let Some(language) = ShaderLanguage::from_language_id(language_id) {
            self.language = Some(language);
        }
        self
    }

    /// File name component of the URI, for "defined in" trailers and logs.
    pub fn file_name(&self) -> String {
        self.uri
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.uri.to_string())
    }

    // ── queries ─────────────────────────────────────────────────────────

    /// Return the full text of a given 0-based line (without the trailing newline).
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let slice = &self.text[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Convert an LSP `Position` (line/character, 0-based) to a byte offset.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        let line = pos.line as usize;
        let line_start = *self.line_offsets.get(line)?;
        let line_end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];

        // LSP character offsets are UTF-16 code-unit counts.
        let mut utf16_offset: u32 = 0;
        let mut byte_offset = line_start;
        for ch in line_text.chars() {
            if utf16_offset >= pos.character {
                break;
            }
            utf16_offset += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        Some(byte_offset)
    }

    /// Convert a byte offset to an LSP `Position`.
    pub fn position_of(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        let line_start = self.line_offsets[line];
        let character = self.text.get(line_start..offset).unwrap_or_default().chars().map(|c| c.len_utf16() as u32).sum::<u32>();
        Position {
            line: line as u32,
            character,
        }
    }

    pub fn range_of(
        &self,
        range: TextRange,
    ) -> Range {
        Range {
            start: self.position_of(range.start),
            end: self.position_of(range.end),
        }
    }

    /// 0-based line containing `offset`.
    pub fn line_of(
        &self,
        offset: usize,
    ) -> usize {
        match self.line_offsets.binary_search(&offset.min(self.text.len())) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        }
    }

    /// Byte offset where `line` starts.
    pub fn line_start(
        &self,
        line: usize,
    ) -> Option<usize> {
        self.line_offsets.get(line).copied()
    }

    /// Byte span of the identifier touching `offset`, if any. A cursor right
    /// after the last character of a word still selects it.
    pub fn word_range_at(
        &self,
        offset: usize,
    ) -> Option<TextRange> {
        let bytes = self.text.as_bytes();
        let offset = offset.min(bytes.len());
        let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
        let mut start = offset;
        while start > 0 && is_word(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = offset;
        while end < bytes.len() && is_word(bytes[end]) {
            end += 1;
        }
        (end > start).then(|| TextRange::new(start, end))
    }

    // ── mutations ───────────────────────────────────────────────────────

    /// Apply a list of incremental or full-content changes and bump version.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            if let Some(range) = change.range {
                if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end)) {
                    self.text.replace_range(start..end, &change.text);
                    self.line_offsets = Self::compute_line_offsets(&self.text);
                }
            } else {
                self.text = change.text;
                self.line_offsets = Self::compute_line_offsets(&self.text);
            }
        }
        self.version = version;
    }

    // ── internal helpers ────────────────────────────────────────────────

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = vec![0usize];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        offsets
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
