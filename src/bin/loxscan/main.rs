use clap::Parser;
use error::{ErrorReporter, LoxError};
use std::{
    error::Error,
    fs,
    io::{self, Write},
    process,
};
use token::Token;

mod error;
mod lexer;
mod token;

/// Exit status for input that failed to scan (sysexits.h EX_DATAERR).
const EXIT_DATAERR: i32 = 65;

#[derive(Parser, Debug)]
struct Args {
    filename: Option<String>,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let result = match args.filename {
        Some(filename) => run_script(&filename, args.debug),
        None => repl(args.debug),
    };

    match result {
        Err(LoxError::ScanFailed { .. }) => process::exit(EXIT_DATAERR),
        other => other?,
    }

    Ok(())
}

fn run_script(filename: &str, debug: bool) -> Result<(), LoxError> {
    let mut reporter = ErrorReporter::new();
    let source = String::from_utf8(fs::read(filename)?)?;

    run(&source, filename, debug, &mut reporter)?;

    if reporter.had_error() {
        return Err(LoxError::ScanFailed {
            count: reporter.count(),
        });
    }
    Ok(())
}

fn repl(debug: bool) -> Result<(), LoxError> {
    let mut reporter = ErrorReporter::new();
    loop {
        let mut buf = String::new();
        io::stdout().write_all(b"> ")?;
        io::stdout().flush()?;
        if io::stdin().read_line(&mut buf)? == 0 {
            println!();
            return Ok(());
        }

        run(&buf, "<repl>", debug, &mut reporter)?;
        // A bad line only spoils that line.
        reporter.reset();
    }
}

fn run(
    source: &str,
    name: &str,
    debug: bool,
    reporter: &mut ErrorReporter,
) -> Result<(), LoxError> {
    let tokens = lexer::scan_tokens(source, reporter);

    if debug {
        eprint!("{}", TokenListing { name, tokens: &tokens });
    }

    let mut out = io::stdout().lock();
    for token in &tokens {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

/// Debug listing of a scan, one token per row.
struct TokenListing<'a> {
    name: &'a str,
    tokens: &'a [Token],
}

impl std::fmt::Display for TokenListing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "==== {} ====", self.name)?;
        let mut last_line = 0;
        for (idx, token) in self.tokens.iter().enumerate() {
            let line_display = if token.line() == last_line {
                String::from("   |")
            } else {
                format!("{:>4}", token.line())
            };
            last_line = token.line();
            writeln!(
                f,
                "{:04} {} {:<14} '{}'",
                idx,
                line_display,
                token.token_type(),
                token.lexeme()
            )?;
        }
        Ok(())
    }
}
