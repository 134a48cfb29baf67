//! Compiled grammar tests.

use argot_foundation::ErrorKind;
use argot_grammar::{Grammar, OptionDef, accept};

fn grammar() -> Grammar {
    Grammar::new([OptionDef::command("tool", "Tool").with_options([
        OptionDef::flag("-v|--verbose", "Verbose"),
        OptionDef::command("remote", "Remote").with_options([
            OptionDef::command("add", "Add").with_rule(accept::exactly_one_argument()),
            OptionDef::flag("--force", "Force"),
        ]),
    ])])
    .unwrap()
}

#[test]
fn nodes_form_a_tree() {
    let grammar = grammar();
    assert_eq!(grammar.len(), 5);
    assert_eq!(grammar.top_level().len(), 1);

    let tool = grammar.top_level()[0];
    let remote = grammar.find(Some(tool), "remote").unwrap();
    let add = grammar.find(Some(remote), "add").unwrap();
    assert_eq!(grammar.node(add).parent(), Some(remote));
    assert_eq!(grammar.path(add), vec![tool, remote, add]);
    assert_eq!(grammar.path_name(add), "tool remote add");
}

#[test]
fn find_accepts_unprefixed_alias() {
    let grammar = grammar();
    let tool = grammar.top_level()[0];
    assert!(grammar.find(Some(tool), "verbose").is_some());
    assert!(grammar.find_raw(Some(tool), "verbose").is_none());
    assert!(grammar.find_raw(Some(tool), "--verbose").is_some());
}

#[test]
fn lookups_are_scoped() {
    let grammar = grammar();
    let tool = grammar.top_level()[0];
    assert!(grammar.find(Some(tool), "--force").is_none());
    assert!(grammar.find(None, "tool").is_some());
    assert!(grammar.find(None, "remote").is_none());
}

#[test]
fn nested_duplicate_reports_path() {
    let err = Grammar::new([OptionDef::command("root", "Root").with_option(
        OptionDef::command("build", "Build").with_options([
            OptionDef::flag("-x", "One"),
            OptionDef::flag("-x", "Two"),
        ]),
    )])
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateAlias(_)));
    assert_eq!(err.context.unwrap().path, vec!["build", "root"]);
}

#[test]
fn iteration_visits_every_node() {
    let grammar = grammar();
    let names: Vec<&str> = grammar.iter().map(|(_, node)| node.name()).collect();
    for name in ["tool", "verbose", "remote", "add", "force"] {
        assert!(names.contains(&name), "{name} missing");
    }
}
