//! Parse-time configuration.

use std::sync::Arc;

use argot_foundation::{Error, Messages, Result, ValidationMessages};
use argot_grammar::{Grammar, OptionDef, OptionId, OptionNode};

/// Immutable configuration shared by every parse.
///
/// The grammar always has a single top-level command. A lone command passed
/// to [`ParserConfiguration::new`] becomes that command; anything else is
/// wrapped in an implicit root named after the executable, which the parser
/// strips from its results.
#[derive(Clone, Debug)]
pub struct ParserConfiguration {
    grammar: Arc<Grammar>,
    root: OptionId,
    root_command_is_implicit: bool,
    delimiters: Vec<char>,
    allow_unbundling: bool,
    messages: Messages,
}

impl ParserConfiguration {
    /// Compiles `options` with the default settings: delimiters `=` and `:`,
    /// unbundling enabled, English messages.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAlias` if two siblings share an alias.
    pub fn new(options: impl IntoIterator<Item = OptionDef>) -> Result<Self> {
        let mut options: Vec<OptionDef> = options.into_iter().collect();
        let root_command_is_implicit = !(options.len() == 1 && options[0].is_command());
        let top = if root_command_is_implicit {
            OptionDef::root_command(options)
        } else {
            options.remove(0)
        };

        let grammar = Grammar::new([top])?;
        let root = grammar
            .top_level()
            .first()
            .copied()
            .ok_or_else(|| Error::internal("grammar has no root command"))?;

        Ok(Self {
            grammar: Arc::new(grammar),
            root,
            root_command_is_implicit,
            delimiters: vec!['=', ':'],
            allow_unbundling: true,
            messages: Messages::default(),
        })
    }

    /// Builder method to set the option/value delimiters.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        self.delimiters = delimiters.into_iter().collect();
        self
    }

    /// Builder method to enable or disable short-flag unbundling.
    #[must_use]
    pub fn with_unbundling(mut self, allow: bool) -> Self {
        self.allow_unbundling = allow;
        self
    }

    /// Builder method to set the message provider.
    #[must_use]
    pub fn with_messages(mut self, provider: impl ValidationMessages + 'static) -> Self {
        self.messages = Messages::new(provider);
        self
    }

    /// The compiled grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The single top-level command.
    #[must_use]
    pub fn root(&self) -> OptionId {
        self.root
    }

    /// The root command's node.
    #[must_use]
    pub fn root_node(&self) -> &OptionNode {
        self.grammar.node(self.root)
    }

    /// Returns true if the root command was synthesized.
    #[must_use]
    pub fn root_command_is_implicit(&self) -> bool {
        self.root_command_is_implicit
    }

    /// Characters separating an option from an inline value.
    #[must_use]
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Whether `-abc` may expand to `-a -b -c`.
    #[must_use]
    pub fn allow_unbundling(&self) -> bool {
        self.allow_unbundling
    }

    /// The message provider.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }
}
