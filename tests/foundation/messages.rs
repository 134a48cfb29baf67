//! Integration tests for validation messages
//!
//! Tests the default English wording and provider fallback.

use argot_foundation::{DefaultValidationMessages, Messages, ValidationMessages};

#[test]
fn default_wording() {
    let m = DefaultValidationMessages;
    assert_eq!(
        m.required_argument_missing_for_command("build"),
        "Required argument missing for command: build"
    );
    assert_eq!(
        m.unrecognized_command_or_argument("x"),
        "Unrecognized command or argument 'x'"
    );
    assert_eq!(m.illegal_file_path("a"), "Illegal file path: a");
}

#[test]
fn allowed_values_are_enumerated() {
    let m = DefaultValidationMessages;
    let text = m.unrecognized_argument("yaml", &["json".to_string(), "xml".to_string()]);
    assert_eq!(
        text,
        "Argument 'yaml' not recognized. Must be one of:\n\t'json'\n\t'xml'"
    );
}

struct Terse;

impl ValidationMessages for Terse {
    fn required_argument_missing_for_command(&self, command: &str) -> String {
        format!("{command}?")
    }

    fn unrecognized_command_or_argument(&self, _token: &str) -> String {
        String::new()
    }
}

#[test]
fn custom_provider_overrides() {
    let messages = Messages::new(Terse);
    assert_eq!(messages.required_argument_missing_for_command("build"), "build?");
}

#[test]
fn blank_message_falls_back() {
    let messages = Messages::new(Terse);
    assert_eq!(
        messages.unrecognized_command_or_argument("x"),
        "Unrecognized command or argument 'x'"
    );
}

#[test]
fn messages_default_is_english() {
    let messages = Messages::default();
    assert_eq!(
        messages.required_command_was_not_provided(),
        "Required command was not provided."
    );
}
