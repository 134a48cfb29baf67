//! Parse results.
//!
//! A [`ParseResult`] is an immutable snapshot of one parse: the raw input,
//! the applied tree, diagnostics, and what completion and debugging need.

use std::collections::BTreeSet;
use std::fmt;

use argot_foundation::{Error, Result};

use crate::applied::{AppliedId, AppliedOption, AppliedTree};
use crate::config::ParserConfiguration;

/// A diagnostic collected during a parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionError {
    /// The message text.
    pub message: String,
    /// The token the error concerns.
    pub token: String,
    /// The applied option at fault, if any.
    pub option: Option<AppliedId>,
}

impl OptionError {
    /// Creates an error.
    #[must_use]
    pub fn new(message: impl Into<String>, token: impl Into<String>, option: Option<AppliedId>) -> Self {
        Self {
            message: message.into(),
            token: token.into(),
            option,
        }
    }
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The outcome of a parse.
#[derive(Clone, Debug)]
pub struct ParseResult {
    tokens: Vec<String>,
    tree: AppliedTree,
    is_progressive: bool,
    config: ParserConfiguration,
    unparsed_tokens: Vec<String>,
    unmatched_tokens: Vec<String>,
    errors: Vec<OptionError>,
}

impl ParseResult {
    pub(crate) fn new(
        tokens: Vec<String>,
        tree: AppliedTree,
        is_progressive: bool,
        config: ParserConfiguration,
        unparsed_tokens: Vec<String>,
        unmatched_tokens: Vec<String>,
        errors: Vec<OptionError>,
    ) -> Self {
        Self {
            tokens,
            tree,
            is_progressive,
            config,
            unparsed_tokens,
            unmatched_tokens,
            errors,
        }
    }

    /// The raw input, without a synthesized root name.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if the parse was of partial input.
    #[must_use]
    pub fn is_progressive(&self) -> bool {
        self.is_progressive
    }

    /// The configuration used.
    #[must_use]
    pub fn configuration(&self) -> &ParserConfiguration {
        &self.config
    }

    /// The applied tree.
    #[must_use]
    pub fn tree(&self) -> &AppliedTree {
        &self.tree
    }

    /// Strings after `--`, untouched.
    #[must_use]
    pub fn unparsed_tokens(&self) -> &[String] {
        &self.unparsed_tokens
    }

    /// Tokens that no option claimed.
    #[must_use]
    pub fn unmatched_tokens(&self) -> &[String] {
        &self.unmatched_tokens
    }

    /// Collected diagnostics: unmatched tokens first, then validation
    /// failures breadth-first.
    #[must_use]
    pub fn errors(&self) -> &[OptionError] {
        &self.errors
    }

    /// Returns true if there are no errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// View of an applied node.
    #[must_use]
    pub fn option(&self, id: AppliedId) -> AppliedOption<'_> {
        AppliedOption::new(&self.tree, &self.config, id)
    }

    /// Top-level applied options in application order.
    pub fn applied_options(&self) -> impl Iterator<Item = AppliedOption<'_>> {
        self.tree.roots().iter().map(|&id| self.option(id))
    }

    /// The top-level applied option answering to `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<AppliedOption<'_>> {
        self.applied_options().find(|o| o.has_alias(alias))
    }

    /// Returns true if a top-level option answering to `alias` was applied.
    #[must_use]
    pub fn has_option(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// The deepest applied command: the last command breadth-first.
    #[must_use]
    pub fn applied_command(&self) -> Option<AppliedOption<'_>> {
        self.tree
            .breadth_first()
            .into_iter()
            .rev()
            .map(|id| self.option(id))
            .find(AppliedOption::is_command)
    }

    /// Like [`applied_command`](Self::applied_command), failing when no
    /// command was applied.
    ///
    /// # Errors
    ///
    /// Returns `CommandNotProvided`.
    pub fn require_command(&self) -> Result<AppliedOption<'_>> {
        self.applied_command().ok_or_else(|| {
            Error::command_not_provided(self.config.messages().required_command_was_not_provided())
        })
    }

    /// The text a completion engine should match against.
    #[must_use]
    pub fn text_to_match(&self) -> &str {
        match self.tokens.last() {
            None => "",
            Some(last) if last.trim().is_empty() => "",
            Some(last) if self.is_progressive => last.as_str(),
            Some(_) => self.unmatched_tokens.last().map_or("", String::as_str),
        }
    }

    /// The option being completed: the last node, breadth-first, of the
    /// last top-level applied option.
    #[must_use]
    pub fn current_option(&self) -> Option<AppliedOption<'_>> {
        let last = *self.tree.roots().last()?;
        let id = *self.tree.breadth_first_from(&[last]).last()?;
        Some(self.option(id))
    }

    /// Completion candidates containing [`text_to_match`](Self::text_to_match),
    /// ignoring case, de-duplicated and sorted.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        let Some(current) = self.current_option() else {
            return Vec::new();
        };
        let grammar = self.config.grammar();
        let option = current.option();

        let mut candidates = option.rule().suggestions();
        for &child in option.children() {
            let child = grammar.node(child);
            if !child.is_hidden() {
                candidates.extend(child.aliases().iter().cloned());
            }
        }

        let needle = self.text_to_match().to_lowercase();
        candidates
            .into_iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Bracketed rendering of the applied tree followed by any unmatched
    /// tokens, e.g. `[ tool [ build <app1> ] ]   ???--> extra`.
    #[must_use]
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        for (i, option) in self.applied_options().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            option.write_diagram(&mut out);
        }
        if !self.unmatched_tokens.is_empty() {
            out.push_str("   ???-->");
            for token in &self.unmatched_tokens {
                out.push(' ');
                out.push_str(token);
            }
        }
        out
    }
}
