//! Help text generated from a grammar.

use std::fmt::Write;

use argot_grammar::{Arity, Grammar, OptionId, OptionNode};
use argot_parser::ParserConfiguration;

const HELP_COLUMN: usize = 28;

/// Renders the grammar as an indented outline, one entry per line:
///
/// ```text
/// tool                        A tool
///   -v, --verbose             Show more output
///   build <target>            Build a target
/// ```
///
/// Hidden entries are skipped. An implicit root is not shown.
#[must_use]
pub fn render_help(config: &ParserConfiguration) -> String {
    let grammar = config.grammar();
    let mut out = String::new();
    if config.root_command_is_implicit() {
        for &child in config.root_node().children() {
            write_entry(grammar, child, 0, &mut out);
        }
    } else {
        write_entry(grammar, config.root(), 0, &mut out);
    }
    out
}

fn write_entry(grammar: &Grammar, id: OptionId, depth: usize, out: &mut String) {
    let node = grammar.node(id);
    if node.is_hidden() && depth > 0 {
        return;
    }
    let label = format!("{}{}", "  ".repeat(depth), label(node));
    if node.help().is_empty() {
        let _ = writeln!(out, "{label}");
    } else {
        let _ = writeln!(out, "{label:<HELP_COLUMN$}{}", node.help());
    }
    if let Some(description) = node.rule().description() {
        let _ = writeln!(out, "{}{description}", " ".repeat(HELP_COLUMN + 2));
    }
    for &child in node.children() {
        write_entry(grammar, child, depth + 1, out);
    }
}

fn label(node: &OptionNode) -> String {
    let mut label = node.aliases().join(", ");
    let rule = node.rule();
    let name = rule.name().unwrap_or("value");
    match rule.arity() {
        Some(Arity::ExactlyOne) => {
            let _ = write!(label, " <{name}>");
        }
        Some(Arity::ZeroOrOne) => {
            let _ = write!(label, " [{name}]");
        }
        Some(Arity::OneOrMore) => {
            let _ = write!(label, " <{name}>...");
        }
        Some(Arity::ZeroOrMore) => {
            let _ = write!(label, " [{name}]...");
        }
        Some(Arity::None) | None => {}
    }
    label
}
