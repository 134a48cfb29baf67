//! Option and command definitions.
//!
//! Grammars are written as an owned tree of [`OptionDef`] values:
//!
//! ```
//! use argot_grammar::{OptionDef, accept};
//!
//! let root = OptionDef::command("tool", "A build tool").with_options([
//!     OptionDef::flag("-v|--verbose", "Print more"),
//!     OptionDef::command("build", "Build a target")
//!         .with_rule(accept::exactly_one_argument().named("target")),
//! ]);
//! assert_eq!(root.children().len(), 2);
//! ```

use argot_foundation::{Error, ErrorContext, Result};

use crate::accept;
use crate::rule::ArgumentsRule;

/// Whether a definition is a plain option or a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// An option such as `--verbose`.
    Option,
    /// A command or subcommand.
    Command {
        /// If true, tokens nothing claims are reported as errors.
        treat_unmatched_tokens_as_errors: bool,
    },
}

/// A grammar node before compilation.
#[derive(Clone, Debug)]
pub struct OptionDef {
    aliases: Vec<String>,
    help: String,
    rule: ArgumentsRule,
    kind: OptionKind,
    children: Vec<OptionDef>,
}

impl OptionDef {
    /// Defines an option. `aliases` is a `|`- or space-separated list.
    #[must_use]
    pub fn option(aliases: &str, help: impl Into<String>, rule: ArgumentsRule) -> Self {
        Self {
            aliases: split_aliases(aliases),
            help: help.into(),
            rule,
            kind: OptionKind::Option,
            children: Vec::new(),
        }
    }

    /// Defines an option that takes no arguments.
    #[must_use]
    pub fn flag(aliases: &str, help: impl Into<String>) -> Self {
        Self::option(aliases, help, accept::no_arguments())
    }

    /// Defines a command that accepts no arguments until given a rule.
    #[must_use]
    pub fn command(name: &str, help: impl Into<String>) -> Self {
        Self {
            aliases: split_aliases(name),
            help: help.into(),
            rule: accept::no_arguments(),
            kind: OptionKind::Command {
                treat_unmatched_tokens_as_errors: true,
            },
            children: Vec::new(),
        }
    }

    /// Defines a command that requires exactly one of `subcommands`.
    ///
    /// Completion is seeded with the subcommand names.
    #[must_use]
    pub fn command_with_subcommands(
        name: &str,
        help: impl Into<String>,
        subcommands: impl IntoIterator<Item = OptionDef>,
    ) -> Self {
        let subcommands: Vec<OptionDef> = subcommands.into_iter().collect();
        let names: Vec<String> = subcommands.iter().map(OptionDef::name).collect();
        Self::command(name, help)
            .with_rule(
                accept::no_arguments()
                    .and(accept::exactly_one_subcommand())
                    .and(accept::with_suggestions_from(names)),
            )
            .with_options(subcommands)
    }

    /// Defines a command named after the running executable.
    #[must_use]
    pub fn root_command(options: impl IntoIterator<Item = OptionDef>) -> Self {
        Self::command(&executable_name(), "").with_options(options)
    }

    /// Adds a child option or subcommand.
    #[must_use]
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.children.push(option);
        self
    }

    /// Adds several child options or subcommands.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionDef>) -> Self {
        self.children.extend(options);
        self
    }

    /// Replaces the rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ArgumentsRule) -> Self {
        self.rule = rule;
        self
    }

    /// Composes `rule` onto the existing rule with [`ArgumentsRule::and`].
    #[must_use]
    pub fn and_rule(mut self, rule: ArgumentsRule) -> Self {
        self.rule = self.rule.and(rule);
        self
    }

    /// Sets whether unclaimed tokens are errors. Ignored for plain options.
    #[must_use]
    pub fn treat_unmatched_tokens_as_errors(mut self, value: bool) -> Self {
        if let OptionKind::Command {
            treat_unmatched_tokens_as_errors,
        } = &mut self.kind
        {
            *treat_unmatched_tokens_as_errors = value;
        }
        self
    }

    /// The raw aliases, in definition order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The display name: the longest alias without its prefix.
    #[must_use]
    pub fn name(&self) -> String {
        longest_name(&self.aliases)
    }

    /// Help text. Empty help hides the option from completion.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Returns true if the option has no help text.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.help.trim().is_empty()
    }

    /// The arguments rule.
    #[must_use]
    pub fn rule(&self) -> &ArgumentsRule {
        &self.rule
    }

    /// Option or command.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns true for commands.
    #[must_use]
    pub fn is_command(&self) -> bool {
        matches!(self.kind, OptionKind::Command { .. })
    }

    /// Child options and subcommands.
    #[must_use]
    pub fn children(&self) -> &[OptionDef] {
        &self.children
    }

    /// Exact alias comparison.
    #[must_use]
    pub fn has_raw_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// Alias comparison that also accepts the alias without its prefix.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.has_raw_alias(alias) || self.aliases.iter().any(|a| remove_prefix(a) == alias)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, String, ArgumentsRule, OptionKind, Vec<OptionDef>) {
        (self.aliases, self.help, self.rule, self.kind, self.children)
    }
}

/// Sibling options with unique aliases.
#[derive(Clone, Debug, Default)]
pub struct OptionSet {
    options: Vec<OptionDef>,
}

impl OptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set, rejecting the first duplicate alias.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAlias` if two options share an alias.
    pub fn from_options(options: impl IntoIterator<Item = OptionDef>) -> Result<Self> {
        let mut set = Self::new();
        for option in options {
            set.add(option)?;
        }
        Ok(set)
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAlias` if any of its aliases is already used by a
    /// sibling.
    pub fn add(&mut self, option: OptionDef) -> Result<()> {
        if let Some(alias) = option
            .aliases
            .iter()
            .find(|alias| self.options.iter().any(|o| o.has_raw_alias(alias)))
        {
            return Err(Error::duplicate_alias(alias.clone())
                .with_context(ErrorContext::new().with_token(alias.clone())));
        }
        self.options.push(option);
        Ok(())
    }

    /// Looks an option up by exact alias, then without prefix.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&OptionDef> {
        self.options
            .iter()
            .find(|o| o.has_raw_alias(alias))
            .or_else(|| self.options.iter().find(|o| o.has_alias(alias)))
    }

    /// Returns true if some option answers to `alias`.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Consumes the set.
    #[must_use]
    pub fn into_vec(self) -> Vec<OptionDef> {
        self.options
    }
}

/// Splits `"-v|--verbose"` or `"-v --verbose"` into aliases.
#[must_use]
pub fn split_aliases(aliases: &str) -> Vec<String> {
    aliases
        .split(|c: char| c == '|' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips a leading `--` or `-`.
#[must_use]
pub fn remove_prefix(alias: &str) -> &str {
    alias
        .strip_prefix("--")
        .or_else(|| alias.strip_prefix('-'))
        .unwrap_or(alias)
}

pub(crate) fn longest_name(aliases: &[String]) -> String {
    let mut best = "";
    for alias in aliases {
        let name = remove_prefix(alias);
        if name.len() > best.len() {
            best = name;
        }
    }
    best.to_string()
}

fn executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "root".to_string())
}
