//! Grammar model for argot.
//!
//! A grammar is described by a tree of [`OptionDef`] builders (options and
//! commands, each carrying an [`ArgumentsRule`]) and compiled into an
//! immutable [`Grammar`] arena that the lexer and parser read.
//!
//! # Modules
//!
//! - [`option`] - `OptionDef` builders and the sibling [`OptionSet`]
//! - [`grammar`] - The compiled arena, addressed by [`OptionId`]
//! - [`arguments`] - Argument lists grouped by occurrence
//! - [`rule`] - Validators, materializers, defaults and suggestion sources
//! - [`accept`] - Rule combinators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accept;
pub mod arguments;
pub mod grammar;
pub mod option;
pub mod rule;

pub use arguments::ArgumentList;
pub use grammar::{Grammar, OptionId, OptionNode};
pub use option::{OptionDef, OptionKind, OptionSet, remove_prefix, split_aliases};
pub use rule::{ArgumentsRule, Arity, Candidates, Phase, RuleContext, Validator};
