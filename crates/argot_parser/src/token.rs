//! Token types.
//!
//! Tokens are the output of the lexer and the input to the parser.

use std::fmt;

/// The literal marking the end of parsed arguments.
pub const END_OF_ARGUMENTS: &str = "--";

/// A classified command-line string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// The raw text.
    pub value: String,
    /// How the lexer classified it.
    pub kind: TokenKind,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(value: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// The `--` token.
    #[must_use]
    pub fn end_of_arguments() -> Self {
        Self::new(END_OF_ARGUMENTS, TokenKind::EndOfArguments)
    }

    /// Returns true for `Option` and `Command` tokens.
    #[must_use]
    pub const fn names_option(&self) -> bool {
        matches!(self.kind, TokenKind::Option | TokenKind::Command)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

/// Lexical classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A subcommand name.
    Command,
    /// An option alias such as `-v` or `--verbose`.
    Option,
    /// A value for some option or command.
    Argument,
    /// A string after `--`, passed through untouched.
    Operand,
    /// `--` itself.
    EndOfArguments,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Command => "Command",
            Self::Option => "Option",
            Self::Argument => "Argument",
            Self::Operand => "Operand",
            Self::EndOfArguments => "EndOfArguments",
        };
        f.write_str(name)
    }
}
