//! Syntax highlighting for the explorer.
//!
//! Words are colored by the kind the lexer gives them in context, so a word
//! that names a subcommand at one level and is a plain argument at another is
//! colored accordingly.

use std::borrow::Cow;

use argot_parser::{Lexer, Parser, TokenKind, tokenize_with_spans};

const RESET: &str = "\x1b[0m";

/// Highlighter driven by a grammar.
#[derive(Debug, Default)]
pub struct GrammarHighlighter {
    parser: Option<Parser>,
}

impl GrammarHighlighter {
    /// Creates a highlighter with no grammar; lines pass through unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self { parser: None }
    }

    /// Sets the grammar to highlight against.
    pub fn set_parser(&mut self, parser: Parser) {
        self.parser = Some(parser);
    }

    /// Highlight a line of input.
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let Some(parser) = &self.parser else {
            return Cow::Borrowed(line);
        };
        let spans = tokenize_with_spans(line);
        if spans.is_empty() {
            return Cow::Borrowed(line);
        }

        let words: Vec<String> = spans.iter().map(|(_, word)| word.clone()).collect();
        let normalized = parser.normalize_root_command(words.clone());
        let mut lexer = Lexer::new(parser.configuration());
        // a synthesized root name is lexed but never shown
        for synthesized in &normalized[..normalized.len() - words.len()] {
            lexer.lex_arg(synthesized);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut last = 0;
        for (index, (span, _)) in spans.iter().enumerate() {
            result.push_str(&line[last..span.start]);
            let word = &normalized[normalized.len() - words.len() + index];
            let kind = lexer.lex_arg(word).first().map(|token| token.kind);
            match kind.and_then(color) {
                Some(color) => {
                    result.push_str(color);
                    result.push_str(&line[span.clone()]);
                    result.push_str(RESET);
                }
                None => result.push_str(&line[span.clone()]),
            }
            last = span.end;
        }
        result.push_str(&line[last..]);
        Cow::Owned(result)
    }
}

fn color(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Command => Some("\x1b[1;32m"),
        TokenKind::Option => Some("\x1b[36m"),
        TokenKind::EndOfArguments => Some("\x1b[33m"),
        TokenKind::Operand => Some("\x1b[2m"),
        TokenKind::Argument => None,
    }
}
