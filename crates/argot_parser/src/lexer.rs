//! Context-sensitive lexer.
//!
//! The lexer classifies raw argument strings against the set of aliases that
//! are "known" at the current position. Recognizing a subcommand re-scopes
//! that set: it becomes the subcommand's own aliases, its children's aliases,
//! and the option aliases of every enclosing command. The same string can
//! therefore be a command at one level and a plain argument below it.

use std::collections::{HashMap, VecDeque};

use argot_grammar::{Grammar, OptionId};
use tracing::trace;

use crate::config::ParserConfiguration;
use crate::token::{END_OF_ARGUMENTS, Token, TokenKind};

#[derive(Clone, Copy, Debug)]
struct Known {
    id: OptionId,
    is_command: bool,
}

/// Incremental lexer state.
#[derive(Debug)]
pub struct Lexer<'a> {
    config: &'a ParserConfiguration,
    current: Option<OptionId>,
    known: HashMap<String, Known>,
    end_of_arguments: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned above the top-level command.
    #[must_use]
    pub fn new(config: &'a ParserConfiguration) -> Self {
        let grammar = config.grammar();
        let mut known = HashMap::new();
        for &top in grammar.top_level() {
            for alias in grammar.node(top).aliases() {
                known.insert(
                    alias.clone(),
                    Known {
                        id: top,
                        is_command: true,
                    },
                );
            }
            insert_children(grammar, top, &mut known);
        }
        Self {
            config,
            current: None,
            known,
            end_of_arguments: false,
        }
    }

    /// The most recently recognized command.
    #[must_use]
    pub fn current_command(&self) -> Option<OptionId> {
        self.current
    }

    /// Returns true if `alias` is known at the current position.
    #[must_use]
    pub fn is_known(&self, alias: &str) -> bool {
        self.known.contains_key(alias)
    }

    /// Returns true once `--` has been seen.
    #[must_use]
    pub fn is_past_end_of_arguments(&self) -> bool {
        self.end_of_arguments
    }

    /// Classifies one raw string, which may yield several tokens.
    pub fn lex_arg(&mut self, arg: &str) -> Vec<Token> {
        if self.end_of_arguments {
            return vec![Token::new(arg, TokenKind::Operand)];
        }
        if arg == END_OF_ARGUMENTS {
            self.end_of_arguments = true;
            return vec![Token::end_of_arguments()];
        }
        if let Some(tokens) = self.split_delimited(arg) {
            return tokens;
        }
        if let Some(tokens) = self.unbundle(arg) {
            return tokens;
        }

        let Some(&known) = self.known.get(arg) else {
            return vec![Token::new(arg, TokenKind::Argument)];
        };
        if self.is_current_command_name(arg) {
            return vec![Token::new(arg, TokenKind::Argument)];
        }
        if !known.is_command {
            return vec![Token::new(arg, TokenKind::Option)];
        }
        if self.current == Some(known.id) {
            // another alias of the command we are already in
            return vec![Token::new(arg, TokenKind::Argument)];
        }
        self.rescope(known.id);
        vec![Token::new(arg, TokenKind::Command)]
    }

    fn is_current_command_name(&self, arg: &str) -> bool {
        self.current
            .is_some_and(|id| self.config.grammar().node(id).name() == arg)
    }

    fn split_delimited(&self, arg: &str) -> Option<Vec<Token>> {
        if !arg.starts_with('-') {
            return None;
        }
        let delimiters = self.config.delimiters();
        let (index, delimiter) = arg.char_indices().find(|(_, c)| delimiters.contains(c))?;
        let name = &arg[..index];
        let value = &arg[index + delimiter.len_utf8()..];
        if self.is_known(name) {
            Some(vec![
                Token::new(name, TokenKind::Option),
                Token::new(value, TokenKind::Argument),
            ])
        } else {
            Some(vec![Token::new(arg, TokenKind::Argument)])
        }
    }

    fn unbundle(&self, arg: &str) -> Option<Vec<Token>> {
        if !self.config.allow_unbundling()
            || !arg.starts_with('-')
            || arg.starts_with("--")
            || arg.len() < 2
            || self.is_known(arg)
        {
            return None;
        }
        arg[1..]
            .chars()
            .map(|c| {
                let alias = format!("-{c}");
                match self.known.get(&alias) {
                    Some(known) if !known.is_command => Some(Token::new(alias, TokenKind::Option)),
                    _ => None,
                }
            })
            .collect()
    }

    fn rescope(&mut self, command: OptionId) {
        let grammar = self.config.grammar();
        let mut known = HashMap::new();

        let path = grammar.path(command);
        for &enclosing in &path[..path.len() - 1] {
            for &child in grammar.node(enclosing).children() {
                let node = grammar.node(child);
                if node.is_command() {
                    continue;
                }
                for alias in node.aliases() {
                    known.insert(
                        alias.clone(),
                        Known {
                            id: child,
                            is_command: false,
                        },
                    );
                }
            }
        }
        for alias in grammar.node(command).aliases() {
            known.insert(
                alias.clone(),
                Known {
                    id: command,
                    is_command: true,
                },
            );
        }
        insert_children(grammar, command, &mut known);

        trace!(
            command = grammar.node(command).name(),
            known = known.len(),
            "re-scoped known tokens"
        );
        self.current = Some(command);
        self.known = known;
    }
}

fn insert_children(grammar: &Grammar, parent: OptionId, known: &mut HashMap<String, Known>) {
    for &child in grammar.node(parent).children() {
        let node = grammar.node(child);
        for alias in node.aliases() {
            known.insert(
                alias.clone(),
                Known {
                    id: child,
                    is_command: node.is_command(),
                },
            );
        }
    }
}

/// Lazy token stream over raw strings.
#[derive(Debug)]
pub struct Tokens<'a, I> {
    lexer: Lexer<'a>,
    args: I,
    pending: VecDeque<Token>,
}

impl<I> Iterator for Tokens<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let arg = self.args.next()?;
            self.pending.extend(self.lexer.lex_arg(arg.as_ref()));
        }
    }
}

/// Lexes `args` against `config`.
pub fn lex<I>(args: I, config: &ParserConfiguration) -> Tokens<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Tokens {
        lexer: Lexer::new(config),
        args: args.into_iter(),
        pending: VecDeque::new(),
    }
}
