//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Error, and validation messages.

mod errors;
mod messages;
