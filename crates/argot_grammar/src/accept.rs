//! Rule combinators.
//!
//! Each function returns a fresh [`ArgumentsRule`]; layer further checks with
//! [`ArgumentsRule::and`] or the builder methods on the rule.

use std::sync::Arc;

use argot_foundation::Value;

use crate::option::OptionDef;
use crate::rule::{ArgumentsRule, Arity, Candidates, Validator};

fn arity(arity: Arity) -> ArgumentsRule {
    ArgumentsRule::from_validator(Validator::Arity(arity))
}

fn scalar(arguments: &[String]) -> Result<Value, String> {
    match arguments {
        [] => Err("no argument was provided".to_string()),
        [one] => Ok(Value::String(one.clone())),
        many => Ok(Value::List(many.to_vec())),
    }
}

fn optional_scalar(arguments: &[String]) -> Result<Value, String> {
    match arguments {
        [] => Ok(Value::Absent),
        _ => scalar(arguments),
    }
}

fn list(arguments: &[String]) -> Result<Value, String> {
    Ok(Value::List(arguments.to_vec()))
}

/// Accepts no arguments; the option materializes as `true`.
#[must_use]
pub fn no_arguments() -> ArgumentsRule {
    arity(Arity::None).materialize_with(|_| Ok(Value::Bool(true)))
}

/// Accepts exactly one argument per occurrence.
#[must_use]
pub fn exactly_one_argument() -> ArgumentsRule {
    arity(Arity::ExactlyOne).materialize_with(scalar)
}

/// Accepts at most one argument per occurrence.
#[must_use]
pub fn zero_or_one_argument() -> ArgumentsRule {
    arity(Arity::ZeroOrOne).materialize_with(optional_scalar)
}

/// Accepts one or more arguments.
#[must_use]
pub fn one_or_more_arguments() -> ArgumentsRule {
    arity(Arity::OneOrMore).materialize_with(list)
}

/// Accepts any number of arguments.
#[must_use]
pub fn zero_or_more_arguments() -> ArgumentsRule {
    arity(Arity::ZeroOrMore).materialize_with(list)
}

/// Exactly one argument, which must be one of `values` (ignoring case).
#[must_use]
pub fn any_one_of<I, S>(values: I) -> ArgumentsRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    exactly_one_argument()
        .and(ArgumentsRule::from_validator(Validator::Membership(
            Candidates::Fixed(values.clone()),
        )))
        .with_allowed_values(values)
}

/// Exactly one argument, checked against values fetched when needed.
#[must_use]
pub fn any_one_of_dynamic<F>(fetch: F) -> ArgumentsRule
where
    F: Fn() -> Vec<String> + Send + Sync + 'static,
{
    let source = Candidates::Dynamic(Arc::new(fetch));
    exactly_one_argument()
        .and(ArgumentsRule::from_validator(Validator::Membership(
            source.clone(),
        )))
        .with_source(source)
}

/// Every alias of `options` must be defined under the option carrying this
/// rule. Visible aliases become completion values.
#[must_use]
pub fn zero_or_more_of(options: &[OptionDef]) -> ArgumentsRule {
    let aliases: Vec<String> = options
        .iter()
        .flat_map(|o| o.aliases().iter().cloned())
        .collect();
    let visible: Vec<String> = options
        .iter()
        .filter(|o| !o.is_hidden())
        .flat_map(|o| o.aliases().iter().cloned())
        .collect();
    ArgumentsRule::from_validator(Validator::DefinedOptions(aliases))
        .materialize_with(list)
        .with_allowed_values(visible)
}

/// Exactly one applied child must be a command.
#[must_use]
pub fn exactly_one_subcommand() -> ArgumentsRule {
    ArgumentsRule::from_validator(Validator::ExactlyOneSubcommand)
}

/// A suggestion source that never rejects anything.
#[must_use]
pub fn with_suggestions_from<I, S>(values: I) -> ArgumentsRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ArgumentsRule::default().with_source(Candidates::Fixed(
        values.into_iter().map(Into::into).collect(),
    ))
}

/// A dynamic suggestion source that never rejects anything.
#[must_use]
pub fn with_suggestions_from_fn<F>(fetch: F) -> ArgumentsRule
where
    F: Fn() -> Vec<String> + Send + Sync + 'static,
{
    ArgumentsRule::default().with_source(Candidates::Dynamic(Arc::new(fetch)))
}
