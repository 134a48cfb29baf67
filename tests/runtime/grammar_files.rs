//! Grammar file tests.

use std::path::PathBuf;

use argot_foundation::ErrorKind;
use argot_parser::Parser;
use argot_runtime::{GrammarFile, render_help};

use crate::sample;

fn parser(json: &str) -> Parser {
    Parser::new(GrammarFile::from_json(json).unwrap().into_configuration().unwrap())
}

// =============================================================================
// The sample grammar
// =============================================================================

#[test]
fn nested_subcommand() {
    let result = sample().parse(["tool", "remote", "add", "origin"]);
    assert!(result.is_ok(), "{:?}", result.errors());
    let command = result.require_command().unwrap();
    assert_eq!(command.name(), "add");
    assert_eq!(command.arguments(), vec!["origin".to_string()]);
    assert_eq!(command.option().rule().name(), Some("name"));
}

#[test]
fn subcommand_required() {
    let result = sample().parse(["tool", "remote"]);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(
        result.errors()[0].message,
        "Required argument missing for command: remote"
    );
}

#[test]
fn path_valued_option() {
    let result = sample().parse(["tool", "build", "app", "-o", "out/dir"]);
    assert!(result.is_ok(), "{:?}", result.errors());
    let build = result.applied_command().unwrap();
    assert_eq!(
        build.value_of::<PathBuf>("--output").unwrap(),
        Some(PathBuf::from("out/dir"))
    );
}

#[test]
fn allowed_values_checked() {
    let parser = sample();
    assert!(parser.parse(["tool", "--format", "JSON"]).is_ok());
    let result = parser.parse(["tool", "--format", "yaml"]);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].message.contains("'text'"));
}

#[test]
fn help_outline() {
    let help = render_help(sample().configuration());
    assert!(help.starts_with("tool "));
    assert!(help.contains("  build <target> "));
    assert!(help.contains("    -o, --output <value> "));
    assert!(help.contains("    add <name> "));
}

// =============================================================================
// Custom grammars
// =============================================================================

#[test]
fn top_level_options_get_an_implicit_root() {
    let parser = parser(
        r#"{
            "delimiters": [":"],
            "unbundling": false,
            "options": [
                { "aliases": "-a", "help": "A" },
                { "aliases": "-b", "help": "B" },
                { "aliases": "--level", "help": "Level", "arity": "exactly_one" }
            ]
        }"#,
    );
    assert!(parser.configuration().root_command_is_implicit());
    assert_eq!(parser.configuration().delimiters(), [':']);
    assert!(!parser.configuration().allow_unbundling());

    let result = parser.parse(["--level:3", "-a"]);
    assert!(result.is_ok(), "{:?}", result.errors());
    assert_eq!(result.diagram(), "[ level <3> ] [ a ]");

    assert_eq!(parser.parse(["-ab"]).unmatched_tokens(), ["-ab".to_string()]);
}

#[test]
fn unmatched_tokens_setting() {
    let parser = parser(
        r#"{ "options": [ {
            "aliases": "run",
            "help": "Run",
            "command": true,
            "treat_unmatched_tokens_as_errors": false
        } ] }"#,
    );
    let result = parser.parse(["run", "anything"]);
    assert!(result.is_ok(), "{:?}", result.errors());
    assert_eq!(result.unmatched_tokens(), ["anything".to_string()]);
}

#[test]
fn suggestions_and_defaults() {
    let parser = parser(
        r#"{ "options": [ {
            "aliases": "deploy",
            "help": "Deploy",
            "command": true,
            "options": [ {
                "aliases": "--env",
                "help": "Environment",
                "arity": "zero_or_one",
                "suggestions": ["staging", "prod"],
                "default": "staging"
            } ]
        } ] }"#,
    );
    assert_eq!(
        parser.parse_command_line("deploy --env ").suggestions(),
        vec!["prod".to_string(), "staging".to_string()]
    );
    let result = parser.parse(["deploy", "--env"]);
    let deploy = result.require_command().unwrap();
    assert_eq!(deploy.arguments_of("--env"), vec!["staging".to_string()]);
}

#[test]
fn contradictions_are_reported() {
    let err = GrammarFile::from_json(
        r#"{ "options": [ { "aliases": "--x", "help": "X", "arity": "none", "default": "1" } ] }"#,
    )
    .unwrap()
    .into_configuration()
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::GrammarFile(_)));
    assert!(err.to_string().contains("'--x'"));
}

#[test]
fn malformed_json_is_a_grammar_error() {
    let err = GrammarFile::from_json("{ \"options\": [").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::GrammarFile(_)));
}

#[test]
fn load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.json");
    std::fs::write(&path, argot_runtime::SAMPLE_GRAMMAR).unwrap();

    let file = GrammarFile::load(&path).unwrap();
    assert_eq!(file.options.len(), 1);
    assert_eq!(file.options[0].aliases, "tool");

    let err = GrammarFile::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(err.to_string().contains("missing.json"));
}
