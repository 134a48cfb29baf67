//! The parser.
//!
//! Consumes lexed tokens into an [`AppliedTree`]:
//!
//! 1. The root command's name is normalized onto the front of the input.
//! 2. Option and command tokens naming the top-level command reuse its applied
//!    node. Every other token is offered to the applied nodes, most recent
//!    first, until one takes it. A plain argument refused by a command stops
//!    the search.
//! 3. `--` ends consumption; everything after it is reported as unparsed.
//! 4. Tokens nobody took are unmatched, and become errors if the deepest
//!    applied command treats them so.
//! 5. An implicit root is stripped and the finished tree validated
//!    breadth-first.

use argot_foundation::Result;
use argot_grammar::OptionDef;
use tracing::{debug, trace};

use crate::applied::{AppliedId, AppliedTree};
use crate::config::ParserConfiguration;
use crate::lexer::lex;
use crate::result::{OptionError, ParseResult};
use crate::token::TokenKind;
use crate::tokenizer::tokenize;

/// Parses command lines against a configuration.
#[derive(Clone, Debug)]
pub struct Parser {
    config: ParserConfiguration,
}

impl Parser {
    /// Creates a parser.
    #[must_use]
    pub fn new(config: ParserConfiguration) -> Self {
        Self { config }
    }

    /// Creates a parser with the default configuration for `options`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAlias` if two siblings share an alias.
    pub fn from_options(options: impl IntoIterator<Item = OptionDef>) -> Result<Self> {
        ParserConfiguration::new(options).map(Self::new)
    }

    /// The configuration.
    #[must_use]
    pub fn configuration(&self) -> &ParserConfiguration {
        &self.config
    }

    /// Parses an argument vector.
    pub fn parse<I, S>(&self, args: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_args(args.into_iter().map(Into::into).collect(), false)
    }

    /// Tokenizes and parses one command line. The parse is progressive unless
    /// the line ends with a space.
    pub fn parse_command_line(&self, line: &str) -> ParseResult {
        let is_progressive = !line.ends_with(' ');
        self.parse_args(tokenize(line), is_progressive)
    }

    /// Puts the root command's name at the front of `args`.
    ///
    /// An implicit root's name is always prepended. For an explicit root, a
    /// first argument that is the name or a path ending in the name (or
    /// `name.exe`), compared without ASCII case, is replaced by the name; any
    /// other first argument gets the name in front.
    #[must_use]
    pub fn normalize_root_command(&self, mut args: Vec<String>) -> Vec<String> {
        let name = self.config.root_node().name().to_string();
        if self.config.root_command_is_implicit() {
            args.insert(0, name);
            return args;
        }
        match args.first() {
            Some(first) if first.eq_ignore_ascii_case(&name) || is_path_to(first, &name) => {
                args[0] = name;
            }
            _ => args.insert(0, name),
        }
        args
    }

    fn parse_args(&self, args: Vec<String>, is_progressive: bool) -> ParseResult {
        let config = &self.config;
        let grammar = config.grammar();
        let args = self.normalize_root_command(args);

        let mut tree = AppliedTree::new();
        let mut chain: Vec<AppliedId> = Vec::new();
        let mut unmatched_tokens = Vec::new();

        let mut tokens = lex(&args, config);
        for token in tokens.by_ref() {
            if token.kind == TokenKind::EndOfArguments {
                break;
            }

            if token.names_option() {
                if let Some(top) = grammar.find(None, &token.value) {
                    let existing = chain
                        .iter()
                        .rev()
                        .copied()
                        .find(|&id| tree.node(id).option() == top);
                    let applied = match existing {
                        Some(id) => {
                            tree.respecify(id);
                            id
                        }
                        None => tree.apply(top, &token.value, None),
                    };
                    chain.push(applied);
                    continue;
                }
            }

            let mut taker = None;
            for &candidate in chain.iter().rev() {
                taker = tree.take_token(config, candidate, &token);
                if taker.is_some() {
                    break;
                }
                let is_command = grammar.node(tree.node(candidate).option()).is_command();
                if token.kind == TokenKind::Argument && is_command {
                    break;
                }
            }

            match taker {
                Some(id) => {
                    trace!(token = %token, "token taken");
                    chain.push(id);
                }
                None => {
                    debug!(token = %token, "token unmatched");
                    unmatched_tokens.push(token.value);
                }
            }
        }
        let unparsed_tokens: Vec<String> = tokens.map(|token| token.value).collect();

        let treat_unmatched_as_errors = tree
            .breadth_first()
            .into_iter()
            .rev()
            .map(|id| grammar.node(tree.node(id).option()))
            .find(|option| option.is_command())
            .is_none_or(|command| command.treat_unmatched_tokens_as_errors());

        let mut errors: Vec<OptionError> = if treat_unmatched_as_errors {
            unmatched_tokens
                .iter()
                .map(|token| {
                    OptionError::new(
                        config.messages().unrecognized_command_or_argument(token),
                        token.clone(),
                        None,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut echo = args;
        if config.root_command_is_implicit() {
            if !echo.is_empty() {
                echo.remove(0);
            }
            if let Some(&root) = tree.roots().first() {
                tree.strip_root(root);
            }
        }

        for id in tree.breadth_first() {
            if let Some(message) = tree.validate(config, id) {
                errors.push(OptionError::new(message, tree.node(id).token(), Some(id)));
            }
        }

        debug!(
            applied = tree.breadth_first().len(),
            unmatched = unmatched_tokens.len(),
            unparsed = unparsed_tokens.len(),
            errors = errors.len(),
            "parse complete"
        );

        ParseResult::new(
            echo,
            tree,
            is_progressive,
            config.clone(),
            unparsed_tokens,
            unmatched_tokens,
            errors,
        )
    }
}

fn is_path_to(arg: &str, name: &str) -> bool {
    let arg = arg.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    arg.contains(['/', '\\']) && (arg.ends_with(&name) || arg.ends_with(&format!("{name}.exe")))
}
