//! Core types shared by every argot layer.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Value`] - Materialized option values
//! - [`ValidationMessages`] - Pluggable diagnostic message provider

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod messages;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use messages::{DefaultValidationMessages, Messages, ValidationMessages};
pub use value::{Value, ValueType};
