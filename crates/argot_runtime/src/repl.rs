//! The interactive grammar explorer.
//!
//! Each line is parsed against the loaded grammar and the outcome printed:
//! the diagram, the applied command, errors, and leftover tokens. Lines
//! starting with `:` are explorer commands.

use std::fmt::Write as _;
use std::io::{self, Write};

use argot_foundation::{Error, Result};
use argot_parser::{ParseResult, Parser, lex, tokenize};
use tracing::debug;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::help::render_help;

/// What evaluating one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Text to print.
    Output(String),
    /// The user asked to leave.
    Quit,
}

/// The interactive explorer.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The grammar under exploration.
    parser: Parser,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new explorer with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(parser: Parser) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, parser))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new explorer with the given editor.
    pub fn with_editor(mut editor: E, parser: Parser) -> Self {
        editor.set_parser(parser.clone());
        Self {
            editor,
            parser,
            show_banner: true,
            prompt: "argot> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The grammar under exploration.
    #[must_use]
    pub const fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Runs the explorer loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                    return Err(e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let line = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        match self.eval(&line) {
            Evaluation::Output(text) => {
                println!("{text}");
                Ok(true)
            }
            Evaluation::Quit => Ok(false),
        }
    }

    /// Evaluates one line.
    #[must_use]
    pub fn eval(&self, line: &str) -> Evaluation {
        let trimmed = line.trim_start();
        let Some(command) = trimmed.strip_prefix(':') else {
            debug!(line, "parsing line");
            return Evaluation::Output(report(&self.parser.parse_command_line(line)));
        };

        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        match name.trim() {
            "q" | "quit" => Evaluation::Quit,
            "help" => Evaluation::Output(HELP.to_string()),
            "grammar" => Evaluation::Output(render_help(self.parser.configuration())),
            "complete" => {
                let suggestions = self.parser.parse_command_line(rest).suggestions();
                Evaluation::Output(suggestions.join("\n"))
            }
            "tokens" => {
                let args = self.parser.normalize_root_command(tokenize(rest));
                let tokens: Vec<String> = lex(&args, self.parser.configuration())
                    .map(|token| token.to_string())
                    .collect();
                Evaluation::Output(tokens.join(" "))
            }
            other => Evaluation::Output(format!(
                "unknown command ':{other}' (try :help)"
            )),
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!("\x1b[1;36margot\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Exploring '{}'. Type a command line to parse it, :help for commands, Ctrl+D to exit.\n",
            self.parser.configuration().root_node().name()
        );
        let _ = io::stdout().flush();
    }
}

const HELP: &str = "\
<command line>     Parse the line and show the result
:grammar           Show the grammar
:complete <text>   Show completions for <text>
:tokens <text>     Show how <text> is lexed
:help              Show this help
:quit              Exit";

/// Formats a parse result for display.
#[must_use]
pub fn report(result: &ParseResult) -> String {
    let mut out = result.diagram();
    if let Some(command) = result.applied_command() {
        let _ = write!(out, "\ncommand: {}", command.name());
    }
    for error in result.errors() {
        let _ = write!(out, "\nerror: {error}");
    }
    if !result.unmatched_tokens().is_empty() {
        let _ = write!(out, "\nunmatched: {}", result.unmatched_tokens().join(" "));
    }
    if !result.unparsed_tokens().is_empty() {
        let _ = write!(out, "\nunparsed: {}", result.unparsed_tokens().join(" "));
    }
    out
}
