//! The `argot` binary's own command line, defined with argot.

use std::path::PathBuf;

use argot_foundation::Result;
use argot_grammar::{OptionDef, accept};
use argot_parser::{OptionError, ParseResult, Parser};

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Print help.
    Help,
    /// Print the version.
    Version,
    /// Start the interactive explorer.
    Repl,
    /// Parse one argument vector and report.
    Parse(Vec<String>),
    /// Print completions for a partial command line.
    Complete(String),
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cli {
    /// Grammar file to load instead of the sample.
    pub grammar: Option<PathBuf>,
    /// Raise logging to `debug`.
    pub verbose: bool,
    /// The requested action.
    pub invocation: Invocation,
}

/// The binary's grammar.
#[must_use]
pub fn definition() -> OptionDef {
    OptionDef::command_with_subcommands(
        "argot",
        "Explore command-line grammars",
        [
            OptionDef::command("repl", "Start the interactive explorer"),
            OptionDef::command("parse", "Parse the arguments after '--' and report")
                .with_rule(accept::zero_or_more_arguments().named("args")),
            OptionDef::command("complete", "Print completions for a partial command line")
                .with_rule(accept::exactly_one_argument().named("line")),
        ],
    )
    .with_options([
        OptionDef::option(
            "-g|--grammar",
            "Grammar file (JSON); defaults to the bundled sample",
            accept::exactly_one_argument()
                .existing_files_only()
                .named("file"),
        ),
        OptionDef::flag("-v|--verbose", "Log parser activity to stderr"),
        OptionDef::flag("-h|--help", "Print help"),
        OptionDef::flag("--version", "Print version"),
    ])
}

/// The parser for [`definition`].
///
/// # Errors
///
/// Returns `DuplicateAlias` if the definition is inconsistent.
pub fn parser() -> Result<Parser> {
    Parser::from_options([definition()])
}

/// Interprets a process argument vector, executable path first.
///
/// # Errors
///
/// Returns the parse's diagnostics when the command line is invalid, or a
/// single diagnostic if a value cannot be read.
pub fn parse_cli<I, S>(parser: &Parser, args: I) -> std::result::Result<Cli, Vec<OptionError>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let result = parser.parse(args);
    let Some(root) = result.get("argot") else {
        return Err(result.errors().to_vec());
    };

    let verbose = root.has_option("-v");
    let grammar = root
        .value_of::<PathBuf>("--grammar")
        .map_err(|e| vec![OptionError::new(e.to_string(), "--grammar", None)])?;

    let invocation = if root.has_option("--help") {
        Invocation::Help
    } else if root.has_option("--version") {
        Invocation::Version
    } else if !result.is_ok() {
        return Err(result.errors().to_vec());
    } else {
        invocation(&result)
    };

    Ok(Cli {
        grammar,
        verbose,
        invocation,
    })
}

fn invocation(result: &ParseResult) -> Invocation {
    match result.applied_command() {
        Some(command) if command.name() == "parse" => {
            let mut args = command.arguments();
            args.extend(result.unparsed_tokens().iter().cloned());
            Invocation::Parse(args)
        }
        Some(command) if command.name() == "complete" => {
            Invocation::Complete(command.arguments().concat())
        }
        _ => Invocation::Repl,
    }
}
