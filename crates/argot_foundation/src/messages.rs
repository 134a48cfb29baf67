//! Validation message provider.
//!
//! Every diagnostic the parser reports is worded by a [`ValidationMessages`]
//! implementation. The trait's default methods produce English text, so a
//! custom provider only overrides what it wants to change. [`Messages`] wraps
//! a provider and falls back to the default wording whenever a provider
//! returns a blank string.

use std::fmt;
use std::sync::Arc;

/// Produces the text of parse diagnostics.
pub trait ValidationMessages: Send + Sync {
    /// A command received more than one argument.
    fn command_accepts_only_one_argument(&self, command: &str, count: usize) -> String {
        format!("Command '{command}' only accepts a single argument but {count} were provided.")
    }

    /// More than one subcommand was applied under the same command.
    fn command_accepts_only_one_subcommand(&self, command: &str, subcommands: &str) -> String {
        format!(
            "Command '{command}' only accepts a single subcommand but multiple were provided: {subcommands}"
        )
    }

    /// A path argument names nothing on disk.
    fn file_does_not_exist(&self, path: &str) -> String {
        format!("File does not exist: {path}")
    }

    /// A path argument cannot be a filesystem path.
    fn illegal_file_path(&self, path: &str) -> String {
        format!("Illegal file path: {path}")
    }

    /// An option that takes no arguments received some.
    fn no_arguments_allowed(&self, option: &str) -> String {
        format!("Arguments not allowed for option: {option}")
    }

    /// An option received more than one argument in one occurrence.
    fn option_accepts_only_one_argument(&self, option: &str, count: usize) -> String {
        format!("Option '{option}' only accepts a single argument but {count} were provided.")
    }

    /// A command is missing its required argument.
    fn required_argument_missing_for_command(&self, command: &str) -> String {
        format!("Required argument missing for command: {command}")
    }

    /// An option is missing its required argument.
    fn required_argument_missing_for_option(&self, option: &str) -> String {
        format!("Required argument missing for option: {option}")
    }

    /// The caller required a command but none was applied.
    fn required_command_was_not_provided(&self) -> String {
        "Required command was not provided.".to_string()
    }

    /// An argument is not among the allowed values.
    fn unrecognized_argument(&self, argument: &str, allowed: &[String]) -> String {
        format!(
            "Argument '{argument}' not recognized. Must be one of:{}",
            enumerate(allowed)
        )
    }

    /// A token matched nothing in the grammar.
    fn unrecognized_command_or_argument(&self, token: &str) -> String {
        format!("Unrecognized command or argument '{token}'")
    }

    /// An option alias is not defined where it was named.
    fn unrecognized_option(&self, option: &str, allowed: &[String]) -> String {
        format!(
            "Option '{option}' not recognized. Must be one of:{}",
            enumerate(allowed)
        )
    }
}

fn enumerate(values: &[String]) -> String {
    values.iter().map(|v| format!("\n\t'{v}'")).collect()
}

/// The built-in English provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultValidationMessages;

impl ValidationMessages for DefaultValidationMessages {}

/// Shared handle to a message provider with blank-message fallback.
#[derive(Clone)]
pub struct Messages {
    provider: Arc<dyn ValidationMessages>,
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(DefaultValidationMessages)
    }
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages").finish_non_exhaustive()
    }
}

macro_rules! with_fallback {
    ($(#[$doc:meta])* $name:ident($($arg:ident: $ty:ty),*)) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name(&self, $($arg: $ty),*) -> String {
            let message = self.provider.$name($($arg),*);
            if message.trim().is_empty() {
                DefaultValidationMessages.$name($($arg),*)
            } else {
                message
            }
        }
    };
}

impl Messages {
    /// Wraps a custom provider.
    #[must_use]
    pub fn new(provider: impl ValidationMessages + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    with_fallback!(
        /// See [`ValidationMessages::command_accepts_only_one_argument`].
        command_accepts_only_one_argument(command: &str, count: usize)
    );
    with_fallback!(
        /// See [`ValidationMessages::command_accepts_only_one_subcommand`].
        command_accepts_only_one_subcommand(command: &str, subcommands: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::file_does_not_exist`].
        file_does_not_exist(path: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::illegal_file_path`].
        illegal_file_path(path: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::no_arguments_allowed`].
        no_arguments_allowed(option: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::option_accepts_only_one_argument`].
        option_accepts_only_one_argument(option: &str, count: usize)
    );
    with_fallback!(
        /// See [`ValidationMessages::required_argument_missing_for_command`].
        required_argument_missing_for_command(command: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::required_argument_missing_for_option`].
        required_argument_missing_for_option(option: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::required_command_was_not_provided`].
        required_command_was_not_provided()
    );
    with_fallback!(
        /// See [`ValidationMessages::unrecognized_argument`].
        unrecognized_argument(argument: &str, allowed: &[String])
    );
    with_fallback!(
        /// See [`ValidationMessages::unrecognized_command_or_argument`].
        unrecognized_command_or_argument(token: &str)
    );
    with_fallback!(
        /// See [`ValidationMessages::unrecognized_option`].
        unrecognized_option(option: &str, allowed: &[String])
    );
}
