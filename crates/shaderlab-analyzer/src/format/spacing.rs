use super::lines::collapse_spaces;

/// Operators written with one space on each side.
const SPACED: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", "==", "!=", "<=", ">=", "&&", "||", "?", ":",
];

/// Operators spaced when they are binary and glued when unary.
const ARITHMETIC: &[&str] = &["+", "-", "*", "/", "%", "&", "|", "^"];

/// Operators whose surrounding whitespace is kept as written, since `<`
/// and `>` also delimit template arguments such as `Texture2D<float4>`.
const AS_WRITTEN: &[&str] = &["<", ">", "<<", ">>"];

const MULTI_CHAR: &[&str] = &[
    "<<=", ">>=", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "++", "--", "::",
    "<<", ">>", "->",
];

const CONTROL: &[&str] = &["if", "for", "while", "switch"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Word,
    Str,
    Op,
}

#[derive(Debug)]
struct Token<'a> {
    text: &'a str,
    kind: Kind,
    space_before: bool,
    unary: bool,
}

impl Token<'_> {
    fn is(
        &self,
        text: &str,
    ) -> bool {
        self.kind == Kind::Op && self.text == text
    }

    fn is_any(
        &self,
        set: &[&str],
    ) -> bool {
        self.kind == Kind::Op && set.contains(&self.text)
    }

    fn is_operand(&self) -> bool {
        matches!(self.kind, Kind::Word | Kind::Str) || self.is(")") || self.is("]")
    }
}

/// Re-space one line of code.
pub(crate) fn format_line(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    let mut tokens = tokenize(code);
    let mut out = String::with_capacity(code.len() + 8);
    for index in 0..tokens.len() {
        let separator = separator(&mut tokens, index);
        out.push_str(separator);
        out.push_str(tokens[index].text);
    }
    out
}

/// Whitespace to emit before `tokens[index]`. Marks unary operators as a
/// side effect so later tokens can glue to them.
fn separator(
    tokens: &mut [Token<'_>],
    index: usize,
) -> &'static str {
    if tokens[index].is_any(ARITHMETIC) {
        let cur = &tokens[index];
        let sign = cur.is("-") || cur.is("+");
        let next_spaced = tokens.get(index + 1).is_some_and(|next| next.space_before);
        let binary = index
            .checked_sub(1)
            .is_some_and(|at| tokens[at].is_operand() && !(sign && cur.space_before && !next_spaced));
        tokens[index].unary = !binary;
    }
    let Some(prev) = index.checked_sub(1).map(|at| &tokens[at]) else {
        return "";
    };
    let cur = &tokens[index];

    if cur.is(",") || cur.is(";") || cur.is(")") || cur.is("]") || cur.is(".") || cur.is("::") {
        return "";
    }
    if (cur.is("++") || cur.is("--")) && prev.is_operand() {
        return "";
    }
    if prev.is("(") || prev.is("[") || prev.is(".") || prev.is("!") || prev.is("~") || prev.is("#") || prev.is("::") {
        return "";
    }
    if prev.unary || prev.is("++") || prev.is("--") {
        return if cur.is_operand() || cur.is("(") {
            ""
        } else {
            " "
        };
    }
    if cur.is_any(AS_WRITTEN) || prev.is_any(AS_WRITTEN) {
        return as_written(cur);
    }
    if cur.is_any(SPACED) || prev.is_any(SPACED) || cur.is_any(ARITHMETIC) || prev.is_any(ARITHMETIC) {
        return " ";
    }
    if prev.is(",") || prev.is(";") {
        return " ";
    }
    if cur.is("(") {
        if prev.kind == Kind::Word && CONTROL.contains(&prev.text) {
            return " ";
        }
        return as_written(cur);
    }
    if cur.is("{") || (prev.kind == Kind::Word && cur.kind == Kind::Word) {
        return " ";
    }
    as_written(cur)
}

fn as_written(token: &Token<'_>) -> &'static str {
    if token.space_before {
        " "
    } else {
        ""
    }
}

fn tokenize(code: &str) -> Vec<Token<'_>> {
    let bytes = code.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;
    let mut space_before = false;
    while index < bytes.len() {
        let c = bytes[index];
        if c.is_ascii_whitespace() {
            space_before = true;
            index += 1;
            continue;
        }
        let start = index;
        let kind = if c == b'"' {
            index += 1;
            while index < bytes.len() {
                match bytes[index] {
                    b'\\' => index += 2,
                    b'"' => {
                        index += 1;
                        break;
                    },
                    _ => index += 1,
                }
            }
            index = index.min(bytes.len());
            Kind::Str
        } else if c.is_ascii_digit() || (c == b'.' && bytes.get(index + 1).is_some_and(u8::is_ascii_digit)) {
            index = number_end(bytes, index);
            Kind::Word
        } else if c.is_ascii_alphabetic() || c == b'_' || !c.is_ascii() {
            while index < bytes.len() && (bytes[index].is_ascii_alphanumeric() || bytes[index] == b'_' || !bytes[index].is_ascii()) {
                index += 1;
            }
            Kind::Word
        } else {
            let rest = &code[index..];
            let length = MULTI_CHAR.iter().find(|op| rest.starts_with(**op)).map_or(1, |op| op.len());
            index += length;
            Kind::Op
        };
        tokens.push(Token {
            text: &code[start..index],
            kind,
            space_before,
            unary: false,
        });
        space_before = false;
    }
    tokens
}

/// End of a numeric literal starting at `start`, including a signed
/// exponent such as `1e-3`.
fn number_end(
    bytes: &[u8],
    start: usize,
) -> usize {
    let mut index = start;
    while index < bytes.len() {
        let c = bytes[index];
        if c.is_ascii_alphanumeric() || c == b'.' || c == b'_' {
            index += 1;
            continue;
        }
        let exponent = matches!(bytes[index - 1], b'e' | b'E') && !bytes[start..index].starts_with(b"0x");
        if exponent && matches!(c, b'+' | b'-') && bytes.get(index + 1).is_some_and(u8::is_ascii_digit) {
            index += 1;
            continue;
        }
        break;
    }
    index
}

fn is_include_line(code: &str) -> bool {
    code.strip_prefix('#').is_some_and(|rest| rest.trim_start().starts_with("include"))
}

/// Re-space a preprocessor line. `#include` paths are left untouched and
/// only the surrounding whitespace is collapsed.
pub(crate) fn format_directive(code: &str) -> String {
    if is_include_line(code) {
        collapse_spaces(code)
    } else {
        format_line(code)
    }
}

#[cfg(test)]
#[path = "../../tests/src/format/spacing_tests.rs"]
mod tests;
