//! Argument rule tests.
//!
//! Rules are evaluated directly against a compiled grammar, without a parser.

use argot_foundation::{Messages, Value};
use argot_grammar::{
    ArgumentList, ArgumentsRule, Arity, Grammar, OptionDef, OptionId, Phase, RuleContext, accept,
};

fn compile(option: OptionDef) -> (Grammar, OptionId) {
    let grammar = Grammar::new([option]).unwrap();
    let id = grammar.top_level()[0];
    (grammar, id)
}

fn check(option: OptionDef, values: &[&str], phase: Phase) -> Option<String> {
    let (grammar, id) = compile(option);
    let arguments = ArgumentList::from_values(values.iter().copied());
    let messages = Messages::default();
    let context = RuleContext::new(&grammar, id, &arguments, &[], &messages);
    grammar.node(id).rule().validate(&context, phase)
}

// =============================================================================
// Arity
// =============================================================================

#[test]
fn arity_bounds() {
    assert_eq!(Arity::None.max(), Some(0));
    assert_eq!(Arity::ExactlyOne.min(), 1);
    assert_eq!(Arity::ZeroOrOne.max(), Some(1));
    assert_eq!(Arity::OneOrMore.max(), None);
    assert_eq!(Arity::ZeroOrMore.min(), 0);
}

#[test]
fn exactly_one_for_option() {
    let option = || OptionDef::option("--name", "Name", accept::exactly_one_argument());
    assert_eq!(
        check(option(), &[], Phase::Final).as_deref(),
        Some("Required argument missing for option: name")
    );
    assert_eq!(check(option(), &["a"], Phase::Final), None);
    assert_eq!(
        check(option(), &["a", "b"], Phase::Accept).as_deref(),
        Some("Option 'name' only accepts a single argument but 2 were provided.")
    );
}

#[test]
fn exactly_one_for_command() {
    let command = || OptionDef::command("build", "Build").with_rule(accept::exactly_one_argument());
    assert_eq!(
        check(command(), &[], Phase::Final).as_deref(),
        Some("Required argument missing for command: build")
    );
    assert_eq!(
        check(command(), &["a", "b"], Phase::Final).as_deref(),
        Some("Command 'build' only accepts a single argument but 2 were provided.")
    );
}

#[test]
fn no_arguments() {
    let flag = OptionDef::flag("-v|--verbose", "Verbose");
    assert_eq!(
        check(flag, &["x"], Phase::Accept).as_deref(),
        Some("Arguments not allowed for option: verbose")
    );
}

#[test]
fn arity_is_per_occurrence() {
    let (grammar, id) =
        compile(OptionDef::option("--name", "Name", accept::exactly_one_argument()));
    let mut arguments = ArgumentList::from_values(["a"]);
    arguments.start_occurrence();
    arguments.push("b");
    let messages = Messages::default();
    let context = RuleContext::new(&grammar, id, &arguments, &[], &messages);
    assert_eq!(grammar.node(id).rule().validate(&context, Phase::Final), None);
}

// =============================================================================
// Deferred checks
// =============================================================================

#[test]
fn membership_is_deferred_and_case_insensitive() {
    let option = || OptionDef::option("--format", "Format", accept::any_one_of(["json", "xml"]));
    assert_eq!(check(option(), &["yaml"], Phase::Accept), None);
    assert_eq!(check(option(), &["JSON"], Phase::Final), None);
    assert_eq!(
        check(option(), &["yaml"], Phase::Final).as_deref(),
        Some("Argument 'yaml' not recognized. Must be one of:\n\t'json'\n\t'xml'")
    );
}

#[test]
fn dynamic_membership() {
    let option = OptionDef::option(
        "--env",
        "Env",
        accept::any_one_of_dynamic(|| vec!["dev".to_string(), "prod".to_string()]),
    );
    assert_eq!(option.rule().suggestions(), vec!["dev", "prod"]);
    assert!(check(option, &["qa"], Phase::Final).unwrap().contains("'prod'"));
}

#[test]
fn existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("present.txt");
    std::fs::write(&file, "x").unwrap();
    let present = file.to_string_lossy().to_string();
    let missing = dir.path().join("absent.txt").to_string_lossy().to_string();

    let option = || {
        OptionDef::option(
            "--input",
            "Input",
            accept::exactly_one_argument().existing_files_only(),
        )
    };
    assert_eq!(check(option(), &[present.as_str()], Phase::Final), None);
    assert_eq!(
        check(option(), &[missing.as_str()], Phase::Final),
        Some(format!("File does not exist: {missing}"))
    );
}

#[test]
fn legal_paths() {
    let option = || {
        OptionDef::option(
            "--out",
            "Out",
            accept::exactly_one_argument().legal_file_paths_only(),
        )
    };
    assert_eq!(check(option(), &["out/dir"], Phase::Final), None);
    assert_eq!(
        check(option(), &["a\0b"], Phase::Final).as_deref(),
        Some("Illegal file path: a\0b")
    );
}

#[test]
fn zero_or_more_of_requires_defined_children() {
    let children = [OptionDef::flag("-a", "A"), OptionDef::flag("-b", "")];
    let bad = OptionDef::option("--pick", "Pick", accept::zero_or_more_of(&children))
        .with_option(OptionDef::flag("-a", "A"));
    let message = check(bad, &[], Phase::Final).unwrap();
    assert!(message.starts_with("Option '-b' not recognized."));

    let good = OptionDef::option("--pick", "Pick", accept::zero_or_more_of(&children))
        .with_options(children.clone());
    assert_eq!(good.rule().suggestions(), vec!["-a"]);
    assert_eq!(check(good, &[], Phase::Final), None);
}

#[test]
fn zero_or_more_of_reports_first_missing_child() {
    let children = [
        OptionDef::flag("-a", "A"),
        OptionDef::flag("-b", ""),
        OptionDef::flag("-c", ""),
    ];
    let bad = OptionDef::option("--pick", "Pick", accept::zero_or_more_of(&children))
        .with_option(OptionDef::flag("-a", "A"));
    let message = check(bad, &[], Phase::Final).unwrap();
    assert!(message.starts_with("Option '-b' not recognized."));
    assert_eq!(message.matches("not recognized").count(), 1);
}

// =============================================================================
// Composition and materialization
// =============================================================================

#[test]
fn custom_rule_runs_on_accept() {
    let rule = ArgumentsRule::new(|context| {
        context
            .values()
            .iter()
            .find(|v| v.parse::<i64>().is_err())
            .map(|v| format!("'{v}' is not a number"))
    });
    let option = || OptionDef::option("--count", "Count", accept::exactly_one_argument().and(rule.clone()));
    assert_eq!(
        check(option(), &["x"], Phase::Accept).as_deref(),
        Some("'x' is not a number")
    );
    assert_eq!(check(option(), &["7"], Phase::Accept), None);
}

#[test]
fn first_failure_wins() {
    let option = OptionDef::option(
        "--format",
        "Format",
        accept::any_one_of(["json"]).and(ArgumentsRule::new(|_| Some("never".to_string()))),
    );
    assert_eq!(
        check(option, &[], Phase::Final).as_deref(),
        Some("Required argument missing for option: format")
    );
}

#[test]
fn materializers() {
    assert_eq!(accept::no_arguments().materialize(&[]), Ok(Value::Bool(true)));
    assert_eq!(
        accept::exactly_one_argument().materialize(&["a".to_string()]),
        Ok(Value::String("a".to_string()))
    );
    assert_eq!(accept::zero_or_one_argument().materialize(&[]), Ok(Value::Absent));
    assert_eq!(
        accept::one_or_more_arguments().materialize(&["a".to_string()]),
        Ok(Value::List(vec!["a".to_string()]))
    );
    let parsed = accept::exactly_one_argument()
        .materialize_with(|args| args[0].parse::<i64>().map(Value::Int).map_err(|e| e.to_string()));
    assert_eq!(parsed.materialize(&["42".to_string()]), Ok(Value::Int(42)));
    assert!(parsed.materialize(&["x".to_string()]).is_err());
}

#[test]
fn metadata_survives_composition() {
    let rule = accept::exactly_one_argument()
        .named("target")
        .described("What to build")
        .with_default_value(|| "all".to_string())
        .with_suggestions_from(["app", "lib"]);
    assert_eq!(rule.name(), Some("target"));
    assert_eq!(rule.description(), Some("What to build"));
    assert_eq!(rule.default_value().as_deref(), Some("all"));
    assert!(rule.has_default_value());
    assert_eq!(rule.suggestions(), vec!["app", "lib"]);
    assert_eq!(rule.arity(), Some(Arity::ExactlyOne));
}
