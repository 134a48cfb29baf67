//! Line editor abstraction for the explorer.
//!
//! This module provides a trait-based abstraction over line editing libraries,
//! allowing the explorer to use rustyline while remaining swappable.

use std::borrow::Cow;

use argot_foundation::{Error, Result};
use argot_parser::{Parser, tokenize_with_spans};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

use crate::highlight::GrammarHighlighter;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the grammar used for completion and highlighting.
    fn set_parser(&mut self, parser: Parser);
}

#[derive(Helper, Completer, Hinter, Validator)]
struct ArgotHelper {
    #[rustyline(Completer)]
    completer: GrammarCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: GrammarHighlighter,
}

impl Highlighter for ArgotHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes the word under the cursor from the parse of the text before it.
#[derive(Debug, Default)]
pub struct GrammarCompleter {
    parser: Option<Parser>,
}

impl GrammarCompleter {
    /// Creates a completer with no grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self { parser: None }
    }

    /// Sets the grammar to complete against.
    pub fn set_parser(&mut self, parser: Parser) {
        self.parser = Some(parser);
    }

    /// Returns the byte offset where replacement starts and the candidates.
    #[must_use]
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let Some(parser) = &self.parser else {
            return (pos, Vec::new());
        };
        let before = &line[..pos];
        let result = parser.parse_command_line(before);
        let start = if result.is_progressive() {
            tokenize_with_spans(before)
                .last()
                .filter(|(span, _)| span.end == pos)
                .map_or(pos, |(span, _)| span.start)
        } else {
            pos
        };
        (start, result.suggestions())
    }
}

impl Completer for GrammarCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ArgotHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = ArgotHelper {
            completer: GrammarCompleter::new(),
            hinter: HistoryHinter::new(),
            highlighter: GrammarHighlighter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::io(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_parser(&mut self, parser: Parser) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.set_parser(parser.clone());
            helper.highlighter.set_parser(parser);
        }
    }
}
