//! Tokenizer and lexer tests.

use argot_parser::{Token, TokenKind, lex, tokenize, tokenize_with_spans};

use crate::{strings, tool};

fn kinds(args: &[&str]) -> Vec<TokenKind> {
    let parser = tool();
    lex(args.iter().copied(), parser.configuration())
        .map(|token| token.kind)
        .collect()
}

// =============================================================================
// Tokenizer
// =============================================================================

#[test]
fn quoted_words_stay_together() {
    assert_eq!(
        tokenize(r#"root --name "two words" build"#),
        strings(&["root", "--name", "two words", "build"])
    );
}

#[test]
fn spans_cover_quotes() {
    let spans = tokenize_with_spans(r#"a "b c""#);
    assert_eq!(spans[0], (0..1, "a".to_string()));
    assert_eq!(spans[1], (2..7, "b c".to_string()));
}

#[test]
fn blank_line_has_no_tokens() {
    assert!(tokenize("   \t ").is_empty());
}

// =============================================================================
// Lexer
// =============================================================================

#[test]
fn root_and_options() {
    use TokenKind::{Argument, Command, Option};
    assert_eq!(
        kinds(&["root", "--name", "x", "-v"]),
        vec![Command, Option, Argument, Option]
    );
}

#[test]
fn subcommand_name_below_itself_is_an_argument() {
    use TokenKind::{Argument, Command};
    assert_eq!(kinds(&["root", "build", "build"]), vec![Command, Command, Argument]);
}

#[test]
fn enclosing_options_remain_known() {
    use TokenKind::{Argument, Command, Option};
    assert_eq!(
        kinds(&["root", "build", "x", "--release", "-v"]),
        vec![Command, Command, Argument, Option, Option]
    );
}

#[test]
fn sibling_command_is_unknown_after_rescoping() {
    use TokenKind::Command;
    assert_eq!(
        kinds(&["root", "add", "remove"]),
        vec![Command, Command, TokenKind::Argument]
    );
}

#[test]
fn clusters_unbundle() {
    let parser = tool();
    let tokens: Vec<Token> = lex(["root", "-vq"], parser.configuration()).collect();
    assert_eq!(
        tokens[1..],
        [
            Token::new("-v", TokenKind::Option),
            Token::new("-q", TokenKind::Option)
        ]
    );
}

#[test]
fn delimiters_split_known_options() {
    let parser = tool();
    let tokens: Vec<Token> = lex(["root", "--name=x"], parser.configuration()).collect();
    assert_eq!(
        tokens[1..],
        [
            Token::new("--name", TokenKind::Option),
            Token::new("x", TokenKind::Argument)
        ]
    );
}

#[test]
fn double_dash_switches_to_operands() {
    use TokenKind::{Command, EndOfArguments, Operand};
    assert_eq!(
        kinds(&["root", "--", "--name", "build"]),
        vec![Command, EndOfArguments, Operand, Operand]
    );
}

#[test]
fn tokens_display_kind_and_value() {
    assert_eq!(Token::new("-v", TokenKind::Option).to_string(), "Option(-v)");
    assert_eq!(Token::end_of_arguments().to_string(), "EndOfArguments(--)");
}
