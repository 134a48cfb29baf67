//! Command-line parsing for argot.
//!
//! # Architecture
//!
//! ```text
//! "tool build app1 --verbose"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["tool", "build", "app1", "--verbose"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   LEXER         │  → [Command(tool), Command(build), Argument(app1), Option(--verbose)]
//! │   (re-scoping)  │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   PARSER        │  → [ tool [ build <app1> ] [ verbose ] ]
//! │   (applied tree)│
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   PARSE RESULT  │  → errors, unmatched tokens, suggestions, diagram
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`token`] - Typed lexical units
//! - [`tokenizer`] - Splits one command line into raw strings
//! - [`lexer`] - Context-sensitive classification of raw strings
//! - [`config`] - Parse-time configuration
//! - [`applied`] - The applied-option tree built during a parse
//! - [`parser`] - The token-consuming state machine
//! - [`result`] - Parse outcome, diagnostics and completion

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod applied;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod result;
pub mod token;
pub mod tokenizer;


pub use applied::{AppliedId, AppliedNode, AppliedOption, AppliedTree, ArgumentState, RejectedToken};
pub use config::ParserConfiguration;
pub use lexer::{Lexer, lex};
pub use parser::Parser;
pub use result::{OptionError, ParseResult};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, tokenize_with_spans};
