//! Parse diagnostics: unmatched tokens, arity and domain failures, messages.

use argot_foundation::ValidationMessages;
use argot_grammar::{ArgumentsRule, OptionDef, accept};
use argot_parser::Parser;

use crate::{strings, tool};

// =============================================================================
// Unmatched tokens
// =============================================================================

#[test]
fn extra_argument_is_unmatched() {
    let result = tool().parse(["root", "--name", "a", "b"]);
    assert_eq!(result.unmatched_tokens(), strings(&["b"]));
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "Unrecognized command or argument 'b'");
    assert_eq!(result.errors()[0].token, "b");
    assert_eq!(result.errors()[0].option, None);
    assert_eq!(result.diagram(), "[ root [ name <a> ] ]   ???--> b");
}

#[test]
fn sibling_command_is_unmatched() {
    let result = tool().parse(["root", "add", "remove"]);
    assert_eq!(result.unmatched_tokens(), strings(&["remove"]));
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.applied_command().unwrap().name(), "add");
}

#[test]
fn unmatched_tokens_tolerated_when_asked() {
    let parser = Parser::from_options([OptionDef::command("root", "Root")
        .with_option(OptionDef::command("run", "Run").treat_unmatched_tokens_as_errors(false))])
    .unwrap();
    let result = parser.parse(["root", "run", "x", "y"]);
    assert!(result.is_ok(), "{:?}", result.errors());
    assert_eq!(result.unmatched_tokens(), strings(&["x", "y"]));
}

#[test]
fn unmatched_errors_come_first() {
    let result = tool().parse(["root", "build", "a", "b"]);
    let messages: Vec<&str> = result.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Unrecognized command or argument 'b'"]);

    let result = tool().parse(["root", "--format", "yaml", "oops"]);
    assert_eq!(result.errors().len(), 2);
    assert!(result.errors()[0].message.contains("'oops'"));
    assert!(result.errors()[1].message.contains("'yaml'"));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn missing_command_argument() {
    let result = tool().parse(["root", "build"]);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(
        result.errors()[0].message,
        "Required argument missing for command: build"
    );
    assert_eq!(result.errors()[0].token, "build");
    assert!(result.errors()[0].option.is_some());
}

#[test]
fn missing_option_argument() {
    let result = tool().parse(["root", "--name"]);
    assert_eq!(
        result.errors()[0].message,
        "Required argument missing for option: name"
    );
}

#[test]
fn value_outside_allowed_set() {
    let result = tool().parse(["root", "--format", "yaml"]);
    assert_eq!(result.errors().len(), 1);
    let message = &result.errors()[0].message;
    assert!(message.contains("'json'"));
    assert!(message.contains("'xml'"));
    assert_eq!(result.diagram(), "[ root [ format <yaml> ] ]");

    assert!(tool().parse(["root", "--format", "XML"]).is_ok());
}

#[test]
fn flag_rejects_arguments() {
    let result = tool().parse(["root", "add", "x"]);
    assert_eq!(result.unmatched_tokens(), strings(&["x"]));
}

#[test]
fn exactly_one_subcommand() {
    let parser = Parser::from_options([OptionDef::command_with_subcommands(
        "git",
        "Git",
        [
            OptionDef::command("add", "Add"),
            OptionDef::command("rm", "Remove"),
        ],
    )])
    .unwrap();

    assert!(parser.parse(["git", "add"]).is_ok());

    let none = parser.parse(["git"]);
    assert_eq!(none.errors().len(), 1);
    assert_eq!(
        none.errors()[0].message,
        "Required argument missing for command: git"
    );

    let two = parser.parse(["git", "add", "rm"]);
    assert_eq!(two.unmatched_tokens(), strings(&["rm"]));
}

#[test]
fn validate_all_matches_parse() {
    let result = tool().parse(["root", "build"]);
    let root = result.get("root").unwrap();
    assert_eq!(root.validate_all(), result.errors());
}

#[test]
fn custom_validator() {
    let even = ArgumentsRule::new(|context| {
        context
            .values()
            .iter()
            .find(|v| !v.parse::<u32>().is_ok_and(|n| n % 2 == 0))
            .map(|v| format!("{v} is not even"))
    });
    let parser = Parser::from_options([OptionDef::command("root", "Root").with_option(
        OptionDef::option("--n", "Number", accept::exactly_one_argument().and(even)),
    )])
    .unwrap();
    assert!(parser.parse(["root", "--n", "4"]).is_ok());

    let odd = parser.parse(["root", "--n", "3"]);
    assert_eq!(odd.unmatched_tokens(), strings(&["3"]));
}

// =============================================================================
// Messages
// =============================================================================

struct Short;

impl ValidationMessages for Short {
    fn required_argument_missing_for_command(&self, command: &str) -> String {
        format!("{command}: needs an argument")
    }

    fn unrecognized_command_or_argument(&self, _token: &str) -> String {
        String::new()
    }
}

#[test]
fn custom_messages() {
    let config = tool().configuration().clone().with_messages(Short);
    let parser = Parser::new(config);

    let result = parser.parse(["root", "build"]);
    assert_eq!(result.errors()[0].message, "build: needs an argument");

    let result = parser.parse(["root", "build", "a", "b"]);
    assert_eq!(
        result.errors()[0].message,
        "Unrecognized command or argument 'b'"
    );
}
