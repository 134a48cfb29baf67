//! Command-line tokenization.
//!
//! Splits one line into raw argument strings. A double-quoted segment yields
//! its inner text (which may be empty or contain whitespace); anything else
//! is a maximal run of non-whitespace characters. A quote with no closing
//! partner is an ordinary character.

use std::ops::Range;

/// Splits a command line into raw argument strings.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    tokenize_with_spans(line)
        .into_iter()
        .map(|(_, text)| text)
        .collect()
}

/// Like [`tokenize`], also returning the byte range each token covers in
/// `line` (quotes included).
#[must_use]
pub fn tokenize_with_spans(line: &str) -> Vec<(Range<usize>, String)> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' {
            if let Some(close) = line[start + 1..].find('"') {
                let end = start + 1 + close;
                tokens.push((start..end + 1, line[start + 1..end].to_string()));
                while chars.peek().is_some_and(|&(i, _)| i <= end) {
                    chars.next();
                }
                continue;
            }
        }

        let mut end = line.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() {
                end = i;
                break;
            }
            chars.next();
        }
        tokens.push((start..end, line[start..end].to_string()));
    }

    tokens
}
