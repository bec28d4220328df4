/// One output line before indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) content: String,
    pub(crate) comment: String,
}

impl Line {
    fn new(content: String) -> Self {
        Self {
            content,
            comment: String::new(),
        }
    }
}

/// Split `text` into formatted lines: comments are separated from code and
/// code is broken after `;`, around non-empty `{ }` blocks and after `}`.
pub(crate) fn split_lines(text: &str) -> Vec<Line> {
    let mut out = Vec::new();
    let mut in_block_comment = false;
    for raw in text.split('\n') {
        let trimmed = raw.trim();
        if in_block_comment {
            in_block_comment = !trimmed.contains("*/");
            out.push(comment_line(trimmed));
            continue;
        }

        let (code, comment) = split_comment(raw);
        if comment.starts_with("/*") && !comment.contains("*/") {
            in_block_comment = true;
        }

        if code.starts_with('#') {
            let mut line = Line::new(collapse_spaces(code));
            line.comment = comment.to_owned();
            out.push(line);
            continue;
        }

        let mut pieces: Vec<Line> = split_code(code).into_iter().map(|piece| Line::new(piece)).collect();
        if pieces.is_empty() {
            pieces.push(Line::new(String::new()));
        }
        if let Some(last) = pieces.last_mut() {
            last.comment = comment.to_owned();
        }
        out.extend(pieces);
    }
    out
}

fn comment_line(text: &str) -> Line {
    Line {
        content: String::new(),
        comment: text.to_owned(),
    }
}

/// Code and comment halves of `raw`, both trimmed. The comment starts at
/// the first `//` or `/*` outside a string literal.
pub(crate) fn split_comment(raw: &str) -> (&str, &str) {
    let bytes = raw.as_bytes();
    let mut in_string = false;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' if in_string => index += 1,
            b'"' => in_string = !in_string,
            b'/' if !in_string && matches!(bytes.get(index + 1), Some(b'/' | b'*')) => {
                return (raw[..index].trim(), raw[index..].trim());
            },
            _ => {},
        }
        index += 1;
    }
    (raw.trim(), "")
}

/// Collapse whitespace runs outside string literals to single spaces.
pub(crate) fn collapse_spaces(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut in_string = false;
    let mut pending_space = false;
    let mut escaped = false;
    for c in code.trim().chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }
    out
}

/// Break one line of code into the pieces that belong on separate lines.
fn split_code(code: &str) -> Vec<String> {
    let chars: Vec<char> = code.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut index = 0;

    let flush = |current: &mut String, pieces: &mut Vec<String>| {
        let piece = current.trim();
        if !piece.is_empty() {
            pieces.push(piece.to_owned());
        }
        current.clear();
    };

    while index < chars.len() {
        let c = chars[index];
        match c {
            '"' => {
                current.push(c);
                index += 1;
                while index < chars.len() {
                    let s = chars[index];
                    current.push(s);
                    index += 1;
                    if s == '\\' {
                        if let Some(escaped) = chars.get(index) {
                            current.push(*escaped);
                            index += 1;
                        }
                    } else if s == '"' {
                        break;
                    }
                }
                continue;
            },
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '{' => {
                let next = next_non_space(&chars, index + 1);
                if next.map(|at| chars[at]) == Some('}') {
                    let trimmed = current.trim_end().len();
                    current.truncate(trimmed);
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str("{}");
                    index = close_statement(&chars, next.unwrap_or(index) + 1, &mut current);
                    flush(&mut current, &mut pieces);
                    continue;
                }
                flush(&mut current, &mut pieces);
                pieces.push("{".to_owned());
                index += 1;
                continue;
            },
            '}' => {
                flush(&mut current, &mut pieces);
                current.push('}');
                index = close_statement(&chars, index + 1, &mut current);
                flush(&mut current, &mut pieces);
                continue;
            },
            ';' if depth == 0 => {
                current.push(';');
                flush(&mut current, &mut pieces);
                index += 1;
                continue;
            },
            _ => {},
        }
        current.push(c);
        index += 1;
    }
    flush(&mut current, &mut pieces);
    pieces
}

fn next_non_space(
    chars: &[char],
    from: usize,
) -> Option<usize> {
    (from..chars.len()).find(|at| !chars[*at].is_whitespace())
}

/// Append a `;` that directly follows a closing brace. Returns the index to
/// continue scanning from.
fn close_statement(
    chars: &[char],
    from: usize,
    current: &mut String,
) -> usize {
    match next_non_space(chars, from) {
        Some(at) if chars[at] == ';' => {
            current.push(';');
            at + 1
        },
        _ => from,
    }
}

#[cfg(test)]
#[path = "../../tests/src/format/lines_tests.rs"]
mod tests;
