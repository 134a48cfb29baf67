//! JSON grammar files.
//!
//! A grammar file describes commands and options declaratively:
//!
//! ```json
//! {
//!   "options": [
//!     { "aliases": "tool", "help": "A tool", "command": true, "options": [
//!       { "aliases": "-v|--verbose", "help": "Verbose" },
//!       { "aliases": "--format", "help": "Format", "arity": "exactly_one",
//!         "allowed_values": ["json", "text"] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Entries under `subcommands` are always commands, and their parent gets the
//! exactly-one-subcommand rule.

use std::fs;
use std::path::Path;

use argot_foundation::{Error, Result};
use argot_grammar::{ArgumentsRule, Candidates, OptionDef, Validator, accept};
use argot_parser::ParserConfiguration;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The grammar the explorer loads when none is given.
pub const SAMPLE_GRAMMAR: &str = include_str!("../grammars/sample.json");

/// A whole grammar file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarFile {
    /// Option/value delimiters; the parser default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<Vec<char>>,
    /// Whether `-abc` may expand to `-a -b -c`.
    #[serde(default = "default_true")]
    pub unbundling: bool,
    /// Top-level options and commands.
    pub options: Vec<OptionSpec>,
}

fn default_true() -> bool {
    true
}

/// Argument count names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityName {
    /// No arguments.
    None,
    /// Exactly one argument.
    ExactlyOne,
    /// At most one argument.
    ZeroOrOne,
    /// At least one argument.
    OneOrMore,
    /// Any number of arguments.
    ZeroOrMore,
}

/// Filesystem checks on arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCheck {
    /// Arguments must name existing files or directories.
    Existing,
    /// Arguments must be legal paths.
    Legal,
}

/// One option or command.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    /// Aliases separated by `|` or whitespace.
    pub aliases: String,
    /// Help text; empty hides the entry from completion.
    #[serde(default)]
    pub help: String,
    /// Whether this is a command.
    #[serde(default)]
    pub command: bool,
    /// Argument count. Defaults to `exactly_one` when `allowed_values` is
    /// set, otherwise `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<ArityName>,
    /// Values accepted, ignoring case.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Extra completion values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Argument used when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Argument name for help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_name: Option<String>,
    /// Argument description for help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filesystem check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileCheck>,
    /// Commands only: whether unclaimed tokens are errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_unmatched_tokens_as_errors: Option<bool>,
    /// Mutually exclusive subcommands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<OptionSpec>,
    /// Child options and commands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

impl GrammarFile {
    /// Reads and parses a grammar file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `GrammarFile` if it is not
    /// a valid grammar.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loading grammar file");
        Self::from_json(&text)
    }

    /// Parses a grammar from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `GrammarFile` if the text is not a valid grammar.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::grammar_file(e.to_string()))
    }

    /// The built-in sample grammar.
    ///
    /// # Errors
    ///
    /// Returns `GrammarFile` if the bundled sample is malformed.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_GRAMMAR)
    }

    /// Builds the option definitions.
    ///
    /// # Errors
    ///
    /// Returns `GrammarFile` for contradictory entries.
    pub fn to_options(&self) -> Result<Vec<OptionDef>> {
        self.options.iter().map(OptionSpec::to_option).collect()
    }

    /// Builds a parser configuration.
    ///
    /// # Errors
    ///
    /// Returns `GrammarFile` for contradictory entries and `DuplicateAlias`
    /// if siblings share an alias.
    pub fn into_configuration(self) -> Result<ParserConfiguration> {
        let mut config = ParserConfiguration::new(self.to_options()?)?.with_unbundling(self.unbundling);
        if let Some(delimiters) = self.delimiters {
            config = config.with_delimiters(delimiters);
        }
        Ok(config)
    }
}

impl OptionSpec {
    /// Builds the option definition, recursively.
    ///
    /// # Errors
    ///
    /// Returns `GrammarFile` for contradictory entries.
    pub fn to_option(&self) -> Result<OptionDef> {
        self.build(self.command)
    }

    fn build(&self, is_command: bool) -> Result<OptionDef> {
        if self.aliases.trim().is_empty() {
            return Err(Error::grammar_file("an entry has no aliases"));
        }
        if !is_command && !(self.subcommands.is_empty() && self.options.is_empty()) {
            return Err(self.invalid("only commands can have children"));
        }
        if !is_command && self.treat_unmatched_tokens_as_errors.is_some() {
            return Err(self.invalid("treat_unmatched_tokens_as_errors applies to commands only"));
        }

        let rule = self.rule()?;
        let mut option = if !is_command {
            OptionDef::option(&self.aliases, self.help.clone(), rule)
        } else if self.subcommands.is_empty() {
            OptionDef::command(&self.aliases, self.help.clone()).with_rule(rule)
        } else {
            if self.arity.is_some_and(|arity| arity != ArityName::None) {
                return Err(self.invalid("a command with subcommands takes no arguments"));
            }
            let subcommands = self
                .subcommands
                .iter()
                .map(|sub| sub.build(true))
                .collect::<Result<Vec<_>>>()?;
            OptionDef::command_with_subcommands(&self.aliases, self.help.clone(), subcommands)
        };

        for child in &self.options {
            option = option.with_option(child.to_option()?);
        }
        if let Some(value) = self.treat_unmatched_tokens_as_errors {
            option = option.treat_unmatched_tokens_as_errors(value);
        }
        Ok(option)
    }

    fn rule(&self) -> Result<ArgumentsRule> {
        let arity = self.arity.unwrap_or(if self.allowed_values.is_empty() {
            ArityName::None
        } else {
            ArityName::ExactlyOne
        });
        if arity == ArityName::None
            && (!self.allowed_values.is_empty() || self.default.is_some() || self.files.is_some())
        {
            return Err(self.invalid("argument settings need an arity other than 'none'"));
        }

        let mut rule = match arity {
            ArityName::None => accept::no_arguments(),
            ArityName::ExactlyOne if !self.allowed_values.is_empty() => {
                accept::any_one_of(self.allowed_values.clone())
            }
            ArityName::ExactlyOne => accept::exactly_one_argument(),
            ArityName::ZeroOrOne => accept::zero_or_one_argument(),
            ArityName::OneOrMore => accept::one_or_more_arguments(),
            ArityName::ZeroOrMore => accept::zero_or_more_arguments(),
        };
        if arity != ArityName::ExactlyOne && !self.allowed_values.is_empty() {
            rule = rule
                .and(ArgumentsRule::from_validator(Validator::Membership(
                    Candidates::Fixed(self.allowed_values.clone()),
                )))
                .with_suggestions_from(self.allowed_values.clone());
        }
        if !self.suggestions.is_empty() {
            rule = rule.with_suggestions_from(self.suggestions.clone());
        }
        match self.files {
            Some(FileCheck::Existing) => rule = rule.existing_files_only(),
            Some(FileCheck::Legal) => rule = rule.legal_file_paths_only(),
            None => {}
        }
        if let Some(default) = self.default.clone() {
            rule = rule.with_default_value(move || default.clone());
        }
        if let Some(name) = &self.argument_name {
            rule = rule.named(name.clone());
        }
        if let Some(description) = &self.description {
            rule = rule.described(description.clone());
        }
        Ok(rule)
    }

    fn invalid(&self, message: &str) -> Error {
        Error::grammar_file(format!("'{}': {message}", self.aliases))
    }
}
