//! argot - Context-sensitive command-line grammar engine
//!
//! This crate re-exports all layers of argot for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: argot_runtime    Grammar files, interactive explorer, CLI
//! Layer 2: argot_parser     Tokenizer, lexer, parser, parse results
//! Layer 1: argot_grammar    Options, commands, argument rules
//! Layer 0: argot_foundation Core types (Value, Error, messages)
//! ```

pub use argot_foundation as foundation;
pub use argot_grammar as grammar;
pub use argot_parser as parser;
pub use argot_runtime as runtime;
