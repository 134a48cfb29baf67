//! Option definition tests.

use argot_foundation::ErrorKind;
use argot_grammar::{OptionDef, OptionKind, OptionSet, accept, remove_prefix, split_aliases};

// =============================================================================
// Aliases and names
// =============================================================================

#[test]
fn aliases_split_on_pipe_and_space() {
    assert_eq!(split_aliases("-v|--verbose"), vec!["-v", "--verbose"]);
    assert_eq!(split_aliases("-o --output"), vec!["-o", "--output"]);
}

#[test]
fn prefixes_removed() {
    assert_eq!(remove_prefix("--verbose"), "verbose");
    assert_eq!(remove_prefix("-v"), "v");
    assert_eq!(remove_prefix("/v"), "/v");
    assert_eq!(remove_prefix("build"), "build");
}

#[test]
fn name_is_longest_unprefixed_alias() {
    let option = OptionDef::flag("-v|--verbose|-V", "Verbose");
    assert_eq!(option.name(), "verbose");
}

#[test]
fn alias_matching_with_and_without_prefix() {
    let option = OptionDef::flag("-v|--verbose", "Verbose");
    assert!(option.has_raw_alias("--verbose"));
    assert!(!option.has_raw_alias("verbose"));
    assert!(option.has_alias("verbose"));
    assert!(option.has_alias("v"));
}

#[test]
fn empty_help_hides() {
    assert!(OptionDef::flag("--secret", "").is_hidden());
    assert!(!OptionDef::flag("--shown", "Shown").is_hidden());
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn commands_treat_unmatched_tokens_as_errors_by_default() {
    let command = OptionDef::command("build", "Build");
    assert_eq!(
        command.kind(),
        OptionKind::Command {
            treat_unmatched_tokens_as_errors: true
        }
    );
    let lenient = command.treat_unmatched_tokens_as_errors(false);
    assert_eq!(
        lenient.kind(),
        OptionKind::Command {
            treat_unmatched_tokens_as_errors: false
        }
    );
}

#[test]
fn plain_option_ignores_unmatched_setting() {
    let option = OptionDef::flag("-v", "V").treat_unmatched_tokens_as_errors(false);
    assert_eq!(option.kind(), OptionKind::Option);
}

#[test]
fn root_command_wraps_options() {
    let root = OptionDef::root_command([OptionDef::flag("-v", "V"), OptionDef::flag("-q", "Q")]);
    assert!(root.is_command());
    assert_eq!(root.children().len(), 2);
    assert!(!root.name().is_empty());
}

#[test]
fn and_rule_composes() {
    let option = OptionDef::option("--level", "Level", accept::exactly_one_argument())
        .and_rule(accept::with_suggestions_from(["1", "2"]));
    assert_eq!(option.rule().suggestions(), vec!["1", "2"]);
}

// =============================================================================
// Option sets
// =============================================================================

#[test]
fn option_set_rejects_duplicates() {
    let err = OptionSet::from_options([
        OptionDef::flag("-v|--verbose", "A"),
        OptionDef::flag("--verbose", "B"),
    ])
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateAlias(ref a) if a == "--verbose"));
}

#[test]
fn option_set_lookup() {
    let set = OptionSet::from_options([
        OptionDef::flag("-v|--verbose", "Verbose"),
        OptionDef::command("build", "Build"),
    ])
    .unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains("--verbose"));
    assert!(set.contains("verbose"));
    assert!(set.get("build").unwrap().is_command());
    assert!(set.get("missing").is_none());
}
