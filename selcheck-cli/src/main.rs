//! Selcheck CLI
//!
//! Validate CSS3 selector groups and inspect how they tokenize.
//!
//! - selcheck 'div, p'            # validate
//! - selcheck -t 'a/* x */.b'     # dump tokens
//! - selcheck -f selectors.txt    # validate one selector per line

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use selcheck_common::warning::{clear_warnings, emitted, set_enabled, warn_once};
use selcheck_css::{
    Css3Tokenizer, Cursor, SelectorError, SelectorValidator, Symbol, Tokenizer, TraceEntry,
};

/// Selcheck: recognizer for CSS Level 3 selector groups
#[derive(Parser, Debug)]
#[command(name = "selcheck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Validate a selector group
    selcheck 'ul.nav, #main [href^="https"]'

    # Validate every line of a file
    selcheck -f selectors.txt

    # Show the productions tried while validating
    selcheck --trace ':nth-child(2n + 1)'

    # Dump tokens, including comments, as JSON
    selcheck -t --comments --json 'a/* note */.b'
"#)]
struct Cli {
    /// Selector groups to check
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Read selector groups from a file, one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print tokens instead of validating
    #[arg(short = 't', long)]
    tokens: bool,

    /// Include comment tokens in the token dump
    #[arg(long, requires = "tokens")]
    comments: bool,

    /// Print the token dump as JSON
    #[arg(long, requires = "tokens")]
    json: bool,

    /// Print every production attempt while validating
    #[arg(long, conflicts_with = "tokens")]
    trace: bool,

    /// Suppress warnings
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    set_enabled(!cli.quiet);

    let selectors = collect_selectors(&cli)?;
    if selectors.is_empty() {
        anyhow::bail!("No selectors given; pass SELECTOR arguments or --file");
    }

    // Token dump mode
    if cli.tokens {
        for selector in &selectors {
            dump_tokens(selector, cli.comments, cli.json)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    clear_warnings();
    let mut validator = SelectorValidator::new();
    let mut invalid = 0;
    for selector in &selectors {
        let result = if cli.trace {
            let (result, trace) = validator.parse_traced(selector.as_str());
            print_trace(&trace);
            result
        } else {
            validator.parse(selector.as_str())
        };

        match result {
            Ok(()) => println!("{} {selector}", "✓".green()),
            Err(err) => {
                invalid += 1;
                println!("{} {selector}", "✗".red());
                println!("    {}", err.dimmed());
                if let Some(symbol) = unsupported_combinator(selector, &err) {
                    let _ = warn_once(
                        "Selectors",
                        &format!("combinators are not supported (found {symbol})"),
                    );
                }
            }
        }
    }

    if cli.quiet && emitted() > 0 {
        eprintln!("{} warnings suppressed", emitted());
    }

    if invalid > 0 {
        eprintln!("{invalid} of {} selector groups invalid", selectors.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Gather selectors from the command line, then from `--file`
fn collect_selectors(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut selectors = cli.selectors.clone();

    if let Some(ref path) = cli.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                let _ = warn_once(
                    "CLI",
                    &format!("skipping blank line {} in {}", index + 1, path.display()),
                );
                continue;
            }
            selectors.push(line.to_string());
        }
    }

    Ok(selectors)
}

/// The combinator a rejected selector stopped at, if any
fn unsupported_combinator(selector: &str, err: &SelectorError) -> Option<Symbol> {
    if !err.is_parse_error() {
        return None;
    }
    Css3Tokenizer
        .token_at(selector, err.offset())
        .name()
        .filter(|symbol| symbol.is_combinator())
}

/// Print the tokens of a selector with their byte offsets
fn dump_tokens(selector: &str, comments: bool, json: bool) -> anyhow::Result<()> {
    let mut cursor = Cursor::new();
    cursor.set_ignore_comments(!comments);
    cursor.set_string(selector);
    let tokens = cursor
        .tokens()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to tokenize {selector:?}"))?;

    if json {
        let items: Vec<_> = tokens
            .iter()
            .map(|(offset, token)| serde_json::json!({ "offset": offset, "token": token }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("{}", selector.bold());
    for (offset, token) in &tokens {
        println!("  {offset:>4}  {token}");
    }
    Ok(())
}

/// Print production attempts as an indented tree
fn print_trace(trace: &[TraceEntry]) {
    for entry in trace {
        let indent = "  ".repeat(entry.depth);
        let mark = if entry.matched {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        println!("{indent}{mark} {} @{}", entry.rule, entry.offset);
    }
}

#[cfg(test)]
mod tests {
    use selcheck_css::validate;

    use super::*;

    fn stopped_at(selector: &str) -> Option<Symbol> {
        let err = validate(selector).unwrap_err();
        unsupported_combinator(selector, &err)
    }

    #[test]
    fn test_combinator_at_failure_is_reported() {
        assert_eq!(stopped_at("div p"), Some(Symbol::S));
        assert_eq!(stopped_at("h1 + p"), Some(Symbol::Plus));
        assert_eq!(stopped_at("ul>li"), Some(Symbol::Greater));
        assert_eq!(stopped_at("a ~ b"), Some(Symbol::Tilde));
    }

    #[test]
    fn test_other_failures_are_not_combinators() {
        assert_eq!(stopped_at("div,"), None);
        assert_eq!(stopped_at("[title=]"), None);
        assert_eq!(stopped_at("div!"), None);
    }

    #[test]
    fn test_malformed_tokens_are_not_combinators() {
        let err = SelectorError::MalformedToken {
            token: "S \"\"".to_string(),
            offset: 3,
        };
        assert_eq!(unsupported_combinator("div p", &err), None);
    }
}
