//! Argument rules.
//!
//! An [`ArgumentsRule`] bundles four independent attachments:
//!
//! - a [`Validator`], a tagged tree evaluated by [`ArgumentsRule::validate`]
//! - an optional materializer turning raw strings into a [`Value`]
//! - an optional default-value thunk
//! - allowed values and suggestion sources used for completion
//!
//! Validators are either structural (arity and custom closures) or deferred
//! (membership, paths, defined options, subcommand cardinality). Structural
//! checks run whenever the parser considers handing a token to an option;
//! deferred checks only run in the final validation pass.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use argot_foundation::{Messages, Value};

use crate::arguments::ArgumentList;
use crate::grammar::{Grammar, OptionId, OptionNode};

/// Custom validation closure.
pub type ValidateFn = Arc<dyn Fn(&RuleContext<'_>) -> Option<String> + Send + Sync>;

/// Converts raw arguments into a value.
pub type MaterializeFn = Arc<dyn Fn(&[String]) -> Result<Value, String> + Send + Sync>;

/// Produces a default argument.
pub type DefaultFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Produces candidate values on demand.
pub type CandidatesFn = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// A fixed or dynamically fetched list of values.
#[derive(Clone)]
pub enum Candidates {
    /// Values known at definition time.
    Fixed(Vec<String>),
    /// Values fetched each time they are needed.
    Dynamic(CandidatesFn),
}

impl Candidates {
    /// Current candidate values.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Fixed(values) => values.clone(),
            Self::Dynamic(fetch) => fetch(),
        }
    }
}

impl fmt::Debug for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(values) => f.debug_tuple("Fixed").field(values).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// How many arguments one occurrence may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// No arguments.
    None,
    /// Exactly one.
    ExactlyOne,
    /// Zero or one.
    ZeroOrOne,
    /// At least one.
    OneOrMore,
    /// Any number.
    ZeroOrMore,
}

impl Arity {
    /// Minimum argument count.
    #[must_use]
    pub const fn min(self) -> usize {
        match self {
            Self::ExactlyOne | Self::OneOrMore => 1,
            Self::None | Self::ZeroOrOne | Self::ZeroOrMore => 0,
        }
    }

    /// Maximum argument count, if bounded.
    #[must_use]
    pub const fn max(self) -> Option<usize> {
        match self {
            Self::None => Some(0),
            Self::ExactlyOne | Self::ZeroOrOne => Some(1),
            Self::OneOrMore | Self::ZeroOrMore => None,
        }
    }

    fn check(self, context: &RuleContext<'_>, occurrence: &[String]) -> Option<String> {
        let count = occurrence.len();
        let name = context.name();
        let messages = context.messages;
        if count < self.min() {
            return Some(if context.is_command() {
                messages.required_argument_missing_for_command(name)
            } else {
                messages.required_argument_missing_for_option(name)
            });
        }
        match self.max() {
            Some(0) if count > 0 => Some(messages.no_arguments_allowed(name)),
            Some(max) if count > max => Some(if context.is_command() {
                messages.command_accepts_only_one_argument(name, count)
            } else {
                messages.option_accepts_only_one_argument(name, count)
            }),
            _ => None,
        }
    }
}

/// Which checks a validation pass runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Speculative acceptance of one more argument: structural checks only,
    /// arity against the current occurrence.
    Accept,
    /// Final pass over the finished tree: every check, arity per occurrence.
    Final,
}

/// Tagged validation tree.
#[derive(Clone)]
pub enum Validator {
    /// Always passes.
    Any,
    /// Argument count per occurrence.
    Arity(Arity),
    /// Exactly one applied child must be a command.
    ExactlyOneSubcommand,
    /// Every argument must be one of the candidates, ignoring case.
    Membership(Candidates),
    /// Every argument must name an existing file or directory.
    PathsExist,
    /// Every argument must be usable as a filesystem path.
    PathsLegal,
    /// Every listed alias must be defined under the current option.
    DefinedOptions(Vec<String>),
    /// A custom closure.
    Custom(ValidateFn),
    /// Left, then right; the first message wins.
    And(Box<Validator>, Box<Validator>),
}

impl Validator {
    /// Returns true for checks that run during speculative acceptance.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Any | Self::Arity(_) | Self::Custom(_))
    }

    /// The first arity constraint in the tree, if any.
    #[must_use]
    pub fn arity(&self) -> Option<Arity> {
        match self {
            Self::Arity(arity) => Some(*arity),
            Self::And(left, right) => left.arity().or_else(|| right.arity()),
            _ => None,
        }
    }

    fn check(&self, context: &RuleContext<'_>, phase: Phase) -> Option<String> {
        if phase == Phase::Accept && !self.is_structural() && !matches!(self, Self::And(..)) {
            return None;
        }
        match self {
            Self::Any => None,
            Self::Arity(arity) => match phase {
                Phase::Accept => arity.check(context, context.arguments.current_occurrence()),
                // An occurrence left empty by a respecified option is
                // covered by the occurrences that carry values.
                Phase::Final => {
                    let mut filled = context
                        .arguments
                        .occurrences()
                        .filter(|occurrence| !occurrence.is_empty())
                        .peekable();
                    if filled.peek().is_none() {
                        arity.check(context, &[])
                    } else {
                        filled.find_map(|occurrence| arity.check(context, occurrence))
                    }
                }
            },
            Self::ExactlyOneSubcommand => check_single_subcommand(context),
            Self::Membership(candidates) => {
                let allowed = candidates.values();
                context
                    .values()
                    .iter()
                    .find(|arg| !allowed.iter().any(|v| v.eq_ignore_ascii_case(arg)))
                    .map(|arg| context.messages.unrecognized_argument(arg, &allowed))
            }
            Self::PathsExist => context
                .values()
                .iter()
                .find(|arg| !Path::new(arg.as_str()).exists())
                .map(|arg| context.messages.file_does_not_exist(arg)),
            Self::PathsLegal => context
                .values()
                .iter()
                .find(|arg| !is_legal_path(arg))
                .map(|arg| context.messages.illegal_file_path(arg)),
            Self::DefinedOptions(aliases) => {
                let children = context.option().children();
                aliases
                    .iter()
                    .find(|alias| {
                        !children
                            .iter()
                            .any(|&id| context.grammar.node(id).has_alias(alias))
                    })
                    .map(|alias| context.messages.unrecognized_option(alias, aliases))
            }
            Self::Custom(validate) => validate(context),
            Self::And(left, right) => left
                .check(context, phase)
                .or_else(|| right.check(context, phase)),
        }
    }
}

fn check_single_subcommand(context: &RuleContext<'_>) -> Option<String> {
    let commands: Vec<&str> = context
        .applied_children
        .iter()
        .map(|&id| context.grammar.node(id))
        .filter(|node| node.is_command())
        .map(OptionNode::name)
        .collect();
    match commands.len() {
        0 => Some(
            context
                .messages
                .required_argument_missing_for_command(context.name()),
        ),
        1 => None,
        _ => Some(
            context
                .messages
                .command_accepts_only_one_subcommand(context.name(), &commands.join(", ")),
        ),
    }
}

/// Returns false for strings that cannot name a filesystem path.
#[must_use]
pub fn is_legal_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\0') {
        return false;
    }
    if cfg!(windows) {
        return !path
            .chars()
            .any(|c| matches!(c, '<' | '>' | '"' | '|' | '?' | '*') || c.is_control());
    }
    true
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Arity(arity) => f.debug_tuple("Arity").field(arity).finish(),
            Self::ExactlyOneSubcommand => f.write_str("ExactlyOneSubcommand"),
            Self::Membership(candidates) => f.debug_tuple("Membership").field(candidates).finish(),
            Self::PathsExist => f.write_str("PathsExist"),
            Self::PathsLegal => f.write_str("PathsLegal"),
            Self::DefinedOptions(aliases) => {
                f.debug_tuple("DefinedOptions").field(aliases).finish()
            }
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::And(left, right) => f.debug_tuple("And").field(left).field(right).finish(),
        }
    }
}

/// What a validator sees.
pub struct RuleContext<'a> {
    /// The grammar being parsed against.
    pub grammar: &'a Grammar,
    /// The option whose arguments are checked.
    pub option: OptionId,
    /// The arguments, including a candidate under consideration.
    pub arguments: &'a ArgumentList,
    /// Grammar ids of the option's applied children, in application order.
    pub applied_children: &'a [OptionId],
    /// Message provider.
    pub messages: &'a Messages,
}

impl<'a> RuleContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(
        grammar: &'a Grammar,
        option: OptionId,
        arguments: &'a ArgumentList,
        applied_children: &'a [OptionId],
        messages: &'a Messages,
    ) -> Self {
        Self {
            grammar,
            option,
            arguments,
            applied_children,
            messages,
        }
    }

    /// The grammar node being validated.
    #[must_use]
    pub fn option(&self) -> &'a OptionNode {
        self.grammar.node(self.option)
    }

    /// The node's display name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.option().name()
    }

    /// Returns true if the node is a command.
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.option().is_command()
    }

    /// Every argument value.
    #[must_use]
    pub fn values(&self) -> &'a [String] {
        self.arguments.values()
    }
}

/// An immutable rule attached to a grammar node.
#[derive(Clone)]
pub struct ArgumentsRule {
    validator: Validator,
    allowed_values: Vec<String>,
    suggestions: Vec<Candidates>,
    materializer: Option<MaterializeFn>,
    default_value: Option<DefaultFn>,
    name: Option<String>,
    description: Option<String>,
}

impl Default for ArgumentsRule {
    fn default() -> Self {
        Self::from_validator(Validator::Any)
    }
}

impl fmt::Debug for ArgumentsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentsRule")
            .field("validator", &self.validator)
            .field("allowed_values", &self.allowed_values)
            .field("suggestions", &self.suggestions)
            .field("has_materializer", &self.materializer.is_some())
            .field("has_default", &self.default_value.is_some())
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl ArgumentsRule {
    /// A rule with a custom validator. Returning `Some(message)` rejects.
    #[must_use]
    pub fn new<F>(validate: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self::from_validator(Validator::Custom(Arc::new(validate)))
    }

    /// A rule with the given validator and no other attachments.
    #[must_use]
    pub fn from_validator(validator: Validator) -> Self {
        Self {
            validator,
            allowed_values: Vec::new(),
            suggestions: Vec::new(),
            materializer: None,
            default_value: None,
            name: None,
            description: None,
        }
    }

    /// Combines two rules.
    ///
    /// Validation reports the first message from left to right. Allowed values
    /// and suggestion sources concatenate. The right-hand materializer,
    /// default, name and description win when present.
    #[must_use]
    pub fn and(self, other: ArgumentsRule) -> ArgumentsRule {
        let validator = match (self.validator, other.validator) {
            (Validator::Any, v) | (v, Validator::Any) => v,
            (left, right) => Validator::And(Box::new(left), Box::new(right)),
        };
        let mut allowed_values = self.allowed_values;
        allowed_values.extend(other.allowed_values);
        let mut suggestions = self.suggestions;
        suggestions.extend(other.suggestions);
        ArgumentsRule {
            validator,
            allowed_values,
            suggestions,
            materializer: other.materializer.or(self.materializer),
            default_value: other.default_value.or(self.default_value),
            name: other.name.or(self.name),
            description: other.description.or(self.description),
        }
    }

    /// Rejects arguments that do not name an existing file or directory.
    #[must_use]
    pub fn existing_files_only(self) -> Self {
        self.and(Self::from_validator(Validator::PathsExist))
    }

    /// Rejects arguments that cannot be filesystem paths.
    #[must_use]
    pub fn legal_file_paths_only(self) -> Self {
        self.and(Self::from_validator(Validator::PathsLegal))
    }

    /// Adds fixed completion values.
    #[must_use]
    pub fn with_suggestions_from<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.and(crate::accept::with_suggestions_from(values))
    }

    /// Adds a dynamic completion source.
    #[must_use]
    pub fn with_suggestions_from_fn<F>(self, fetch: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        self.and(crate::accept::with_suggestions_from_fn(fetch))
    }

    /// Supplies an argument when none was given.
    #[must_use]
    pub fn with_default_value<F>(mut self, default: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.default_value = Some(Arc::new(default));
        self
    }

    /// Replaces the materializer.
    #[must_use]
    pub fn materialize_with<F>(mut self, materialize: F) -> Self
    where
        F: Fn(&[String]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.materializer = Some(Arc::new(materialize));
        self
    }

    /// Sets the argument name shown in help.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the argument description shown in help.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn with_allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values.extend(values);
        self
    }

    pub(crate) fn with_source(mut self, source: Candidates) -> Self {
        self.suggestions.push(source);
        self
    }

    /// Runs the validator. `None` means the arguments are acceptable.
    #[must_use]
    pub fn validate(&self, context: &RuleContext<'_>, phase: Phase) -> Option<String> {
        self.validator.check(context, phase)
    }

    /// Converts raw arguments into a value.
    ///
    /// Without a materializer: no arguments give [`Value::Absent`], one gives
    /// a string, several give a list.
    ///
    /// # Errors
    ///
    /// Returns the materializer's message on failure.
    pub fn materialize(&self, arguments: &[String]) -> Result<Value, String> {
        match &self.materializer {
            Some(materialize) => materialize(arguments),
            None => Ok(match arguments {
                [] => Value::Absent,
                [one] => Value::String(one.clone()),
                many => Value::List(many.to_vec()),
            }),
        }
    }

    /// The default argument, if the rule has one.
    #[must_use]
    pub fn default_value(&self) -> Option<String> {
        self.default_value.as_ref().map(|default| default())
    }

    /// Returns true if the rule supplies a default.
    #[must_use]
    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    /// Allowed values followed by every suggestion source, in order.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        let mut values = self.allowed_values.clone();
        for source in &self.suggestions {
            values.extend(source.values());
        }
        values
    }

    /// The validator tree.
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The first arity constraint, if any.
    #[must_use]
    pub fn arity(&self) -> Option<Arity> {
        self.validator.arity()
    }

    /// Values listed for completion and help.
    #[must_use]
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    /// Argument name for help.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Argument description for help.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
