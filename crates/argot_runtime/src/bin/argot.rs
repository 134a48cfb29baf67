//! argot CLI entry point.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use argot_foundation::Result;
use argot_parser::Parser;
use argot_runtime::{Cli, GrammarFile, Invocation, Repl, cli, parse_cli, render_help, report};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let parser = match cli::parser() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            return ExitCode::FAILURE;
        }
    };

    let cli = match parse_cli(&parser, env::args()) {
        Ok(cli) => cli,
        Err(errors) => {
            for error in errors {
                eprintln!("\x1b[31mError: {error}\x1b[0m");
            }
            eprintln!("Run 'argot --help' for usage.");
            return ExitCode::from(2);
        }
    };

    init_tracing(cli.verbose);

    match run(&parser, cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_parser(path: Option<&Path>) -> Result<Parser> {
    let grammar = match path {
        Some(path) => GrammarFile::load(path)?,
        None => GrammarFile::sample()?,
    };
    Ok(Parser::new(grammar.into_configuration()?))
}

fn run(cli_parser: &Parser, cli: Cli) -> Result<ExitCode> {
    let grammar = cli.grammar.as_deref();
    match cli.invocation {
        Invocation::Help => {
            print_help(cli_parser);
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Version => {
            println!("argot {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Parse(args) => {
            let result = load_parser(grammar)?.parse(args);
            println!("{}", report(&result));
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Invocation::Complete(line) => {
            for suggestion in load_parser(grammar)?.parse_command_line(&line).suggestions() {
                println!("{suggestion}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Repl => {
            Repl::new(load_parser(grammar)?)?.run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_help(cli_parser: &Parser) {
    println!(
        "\x1b[1margot\x1b[0m - Explore command-line grammars

\x1b[1mUSAGE:\x1b[0m
    argot [OPTIONS] repl
    argot [OPTIONS] parse -- <ARGS...>
    argot [OPTIONS] complete <LINE>

\x1b[1mCOMMANDS AND OPTIONS:\x1b[0m
{}
\x1b[1mEXAMPLES:\x1b[0m
    argot repl                                Explore the bundled sample grammar
    argot -g git.json parse -- remote add x   Parse against git.json
    argot complete \"tool bu\"                  Complete a partial line

\x1b[1mLOGGING:\x1b[0m
    RUST_LOG=trace argot parse -- tool build x   Trace every token",
        render_help(cli_parser.configuration())
    );
}
