//! Integration tests for Layer 2: Parser
//!
//! Tests for tokenizing, lexing, parsing, diagnostics and completion.

mod diagnostics;
mod lexing;

use argot_grammar::{OptionDef, accept};
use argot_parser::Parser;

/// A small tool grammar shared by the suites.
pub fn tool() -> Parser {
    Parser::from_options([OptionDef::command("root", "Root").with_options([
        OptionDef::option("--name", "Name", accept::exactly_one_argument()),
        OptionDef::option("--format", "Format", accept::any_one_of(["json", "xml"])),
        OptionDef::flag("-v|--verbose", "Verbose"),
        OptionDef::flag("-q", "Quiet"),
        OptionDef::command("build", "Build")
            .with_rule(accept::exactly_one_argument().named("target"))
            .with_option(OptionDef::flag("--release", "Release")),
        OptionDef::command("add", "Add"),
        OptionDef::command("remove", "Remove"),
    ])])
    .unwrap()
}

/// Owned copies of `values`.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}
