//! Grammar files, interactive explorer, and CLI for argot.
//!
//! This crate provides:
//! - [`grammar_file`] - JSON grammar definitions
//! - [`Repl`] - Interactive explorer that parses lines against a grammar
//! - [`editor`] - Line editing with grammar-driven completion
//! - [`highlight`] - Coloring by lexical kind
//! - [`help`] - Help text generated from a grammar
//! - [`cli`] - The `argot` binary's own command line

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod editor;
pub mod grammar_file;
pub mod help;
pub mod highlight;
pub mod repl;

pub use cli::{Cli, Invocation, parse_cli};
pub use editor::{GrammarCompleter, LineEditor, ReadResult, RustylineEditor};
pub use grammar_file::{GrammarFile, OptionSpec, SAMPLE_GRAMMAR};
pub use help::render_help;
pub use highlight::GrammarHighlighter;
pub use repl::{Evaluation, Repl, report};
