//! Error types for argot.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Parse diagnostics (unrecognized tokens, arity and domain failures) are not
//! errors in this sense: they are collected on the parse result. These types
//! cover grammar construction, value materialization, and the runtime layer.

use std::fmt;

use thiserror::Error;

use crate::value::ValueType;

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for argot operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate alias error.
    #[must_use]
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateAlias(alias.into()))
    }

    /// Creates an unknown alias error.
    #[must_use]
    pub fn unknown_alias(alias: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAlias(alias.into()))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ValueType, actual: ValueType) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a materialization error for an option's arguments.
    #[must_use]
    pub fn materialization(
        option: impl Into<String>,
        arguments: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Materialization {
            option: option.into(),
            arguments,
            message: message.into(),
        })
    }

    /// Creates a missing command error.
    #[must_use]
    pub fn command_not_provided(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CommandNotProvided(message.into()))
    }

    /// Creates a grammar file error.
    #[must_use]
    pub fn grammar_file(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GrammarFile(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Two sibling options were defined with the same alias.
    #[error("alias '{0}' is already in use")]
    DuplicateAlias(String),

    /// An alias was looked up that no option defines.
    #[error("no option has the alias '{0}'")]
    UnknownAlias(String),

    /// A materialized value had a different type than requested.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: ValueType,
        /// The actual type encountered.
        actual: ValueType,
    },

    /// Converting an option's raw arguments into a value failed.
    #[error(
        "an error occurred while getting the value for option '{option}' based on argument(s): {}: {message}",
        describe_arguments(.arguments)
    )]
    Materialization {
        /// Name of the option whose value was requested.
        option: String,
        /// The raw arguments the value was built from.
        arguments: Vec<String>,
        /// Why the conversion failed.
        message: String,
    },

    /// A command was required but the parse did not apply one.
    #[error("{0}")]
    CommandNotProvided(String),

    /// A grammar definition file could not be read or understood.
    #[error("invalid grammar file: {0}")]
    GrammarFile(String),

    /// I/O failure in the runtime layer.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn describe_arguments(arguments: &[String]) -> String {
    if arguments.is_empty() {
        "(none)".to_string()
    } else {
        arguments.join(", ")
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The raw token being processed, if any.
    pub token: Option<String>,
    /// Command path from the innermost command outwards.
    pub path: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token being processed.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adds an enclosing command.
    #[must_use]
    pub fn with_frame(mut self, command: impl Into<String>) -> Self {
        self.path.push(command.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            write!(f, "at '{token}'")?;
        }
        if !self.path.is_empty() {
            writeln!(f)?;
            for frame in &self.path {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
