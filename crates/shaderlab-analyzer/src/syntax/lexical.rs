//! Byte-level lexical classification shared by the bracket matcher and the
//! regex extraction passes.
//!
//! The scanner only distinguishes code from string, character, and comment
//! content. Offsets are byte offsets into the original text.

use super::Cancelled;

/// How often (in bytes) the cancellation check is polled.
const CANCEL_CHECK_INTERVAL: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Code,
    String,
    Char,
    LineComment,
    BlockComment,
}

impl CharClass {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    String,
    Char,
    LineComment,
    BlockComment,
}

/// Visit every byte of `text` with its lexical class.
///
/// Strings and character literals honour backslash escapes and end at an
/// unescaped newline, so an unterminated literal never swallows the rest of
/// the file. Newlines that terminate a line comment are reported as code.
pub fn for_each_class(
    text: &str,
    is_cancelled: &dyn Fn() -> bool,
    visit: impl FnMut(usize, u8, CharClass),
) -> Result<(), Cancelled> {
    scan(text, is_cancelled, visit).map(|_| ())
}

/// Runs the classifier and returns the mode the scanner ends in.
fn scan(
    text: &str,
    is_cancelled: &dyn Fn() -> bool,
    mut visit: impl FnMut(usize, u8, CharClass),
) -> Result<Mode, Cancelled> {
    let bytes = text.as_bytes();
    let mut mode = Mode::Code;
    let mut i = 0usize;
    let mut next_check = CANCEL_CHECK_INTERVAL;

    while i < bytes.len() {
        if i >= next_check {
            if is_cancelled() {
                return Err(Cancelled);
            }
            next_check = i + CANCEL_CHECK_INTERVAL;
        }

        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match mode {
            Mode::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    visit(i, b, CharClass::LineComment);
                    visit(i + 1, b'/', CharClass::LineComment);
                    mode = Mode::LineComment;
                    i += 2;
                    continue;
                },
                (b'/', Some(b'*')) => {
                    visit(i, b, CharClass::BlockComment);
                    visit(i + 1, b'*', CharClass::BlockComment);
                    mode = Mode::BlockComment;
                    i += 2;
                    continue;
                },
                (b'"', _) => {
                    visit(i, b, CharClass::String);
                    mode = Mode::String;
                },
                (b'\'', _) => {
                    visit(i, b, CharClass::Char);
                    mode = Mode::Char;
                },
                _ => visit(i, b, CharClass::Code),
            },
            Mode::String | Mode::Char => {
                let (class, quote) = if mode == Mode::String {
                    (CharClass::String, b'"')
                } else {
                    (CharClass::Char, b'\'')
                };
                match b {
                    b'\\' => {
                        visit(i, b, class);
                        if let Some(escaped) = next
                            && escaped != b'\n'
                        {
                            visit(i + 1, escaped, class);
                            i += 2;
                            continue;
                        }
                    },
                    b'\n' => {
                        visit(i, b, CharClass::Code);
                        mode = Mode::Code;
                    },
                    _ if b == quote => {
                        visit(i, b, class);
                        mode = Mode::Code;
                    },
                    _ => visit(i, b, class),
                }
            },
            Mode::LineComment => {
                if b == b'\n' {
                    visit(i, b, CharClass::Code);
                    mode = Mode::Code;
                } else {
                    visit(i, b, CharClass::LineComment);
                }
            },
            Mode::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    visit(i, b, CharClass::BlockComment);
                    visit(i + 1, b'/', CharClass::BlockComment);
                    mode = Mode::Code;
                    i += 2;
                    continue;
                }
                visit(i, b, CharClass::BlockComment);
            },
        }
        i += 1;
    }

    Ok(mode)
}

/// Replace comment content with spaces, keeping newlines and byte offsets
/// intact. Regex passes run over the masked text so that commented-out
/// declarations never produce symbols.
pub fn mask_comments(
    text: &str,
    is_cancelled: &dyn Fn() -> bool,
) -> Result<String, Cancelled> {
    let mut bytes = text.as_bytes().to_vec();
    for_each_class(text, is_cancelled, |offset, byte, class| {
        if class.is_comment() && byte != b'\n' && byte != b'\r' {
            bytes[offset] = b' ';
        }
    })?;
    // Every byte of a multi-byte character shares one class, so the result
    // is still valid UTF-8.
    Ok(String::from_utf8(bytes).unwrap_or_else(|_| text.to_owned()))
}

/// Lexical class the scanner is in at `offset`, i.e. the class the next
/// byte would get if it were ordinary content.
pub fn class_at(
    text: &str,
    offset: usize,
) -> CharClass {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    match scan(&text[..end], &|| false, |_, _, _| {}) {
        Ok(Mode::String) => CharClass::String,
        Ok(Mode::Char) => CharClass::Char,
        Ok(Mode::LineComment) => CharClass::LineComment,
        Ok(Mode::BlockComment) => CharClass::BlockComment,
        Ok(Mode::Code) | Err(Cancelled) => CharClass::Code,
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/lexical_tests.rs"]
mod tests;
