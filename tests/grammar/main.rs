//! Integration tests for Layer 1: Grammar
//!
//! Tests for option definitions, compiled grammars, and argument rules.

mod compiled;
mod options;
mod rules;
