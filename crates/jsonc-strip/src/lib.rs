//! JSONC preprocessing for hand-written command and directory files.
//!
//! Supports:
//! - `//` line comments
//! - `/* ... */` block comments
//! - trailing commas before `}` and `]`
//! - string literal preservation (including escapes)

use std::iter::Peekable;
use std::str::Chars;

/// Convert JSONC input into plain JSON that `serde_json` accepts.
///
/// Comments are removed and trailing commas dropped. Content inside string
/// literals is never touched.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

/// Copy a string literal (opening quote already consumed and pushed).
fn copy_string(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => return,
            _ => {}
        }
    }
}

/// Remove `//` and `/* */` comments.
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                copy_string(&mut chars, &mut out);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Keep the newline so line numbers in serde errors stay accurate.
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Drop commas that are followed (after whitespace) by `}` or `]`.
#[must_use]
pub fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                copy_string(&mut chars, &mut out);
            }
            ',' => {
                let mut gap = String::new();
                while let Some(&ws) = chars.peek() {
                    if !ws.is_whitespace() {
                        break;
                    }
                    gap.push(ws);
                    chars.next();
                }
                if !matches!(chars.peek(), Some('}') | Some(']')) {
                    out.push(',');
                }
                out.push_str(&gap);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{strip_comments, strip_jsonc, strip_trailing_commas};

    #[test]
    fn strips_line_and_block_comments() {
        let input = r#"
{
  // which commands exist
  "name": "ban", /* inline */ "kind": "message"
}
"#;
        let stripped = strip_comments(input);
        assert!(!stripped.contains("which commands"));
        assert!(!stripped.contains("inline"));
        assert!(stripped.contains("\"name\": \"ban\""));
        assert!(stripped.contains("\"kind\": \"message\""));
    }

    #[test]
    fn preserves_comment_like_text_in_strings() {
        let input = r#"{ "url": "http://example.com/*x*/", "note":"//keep" }"#;
        let stripped = strip_jsonc(input);
        assert!(stripped.contains("http://example.com/*x*/"));
        assert!(stripped.contains("\"note\":\"//keep\""));
    }

    #[test]
    fn preserves_escaped_quotes() {
        let input = r#"{ "q": "say \"hi\" // not a comment" }"#;
        assert_eq!(strip_jsonc(input), input);
    }

    #[test]
    fn drops_trailing_commas() {
        let input = "{ \"a\": [1, 2, ], \"b\": 3,\n}";
        let stripped = strip_trailing_commas(input);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"][1], 2);
        assert_eq!(value["b"], 3);
    }

    #[test]
    fn keeps_commas_inside_strings() {
        let input = r#"["a, ]", "b"]"#;
        assert_eq!(strip_trailing_commas(input), input);
    }

    #[test]
    fn block_comment_keeps_line_count() {
        let input = "/* one\ntwo */ {}";
        assert_eq!(strip_comments(input).matches('\n').count(), 1);
    }
}
