//! The `highlight`, `indent`, and `classes` subcommands.
//!
//! Each command tokenizes the input line by line with one carried
//! [`ModeState`], exactly the way a host editing surface would drive
//! the engine.

use std::fs;
use std::io;

use rq_mode::{RqMode, TokenClass};
use tracing::debug;

use crate::error::CliError;

const RESET: &str = "\x1b[0m";

fn color(class: TokenClass) -> &'static str {
    match class {
        TokenClass::Variable => "\x1b[36m",   // cyan
        TokenClass::Atom => "\x1b[32m",       // green
        TokenClass::String => "\x1b[31m",     // red
        TokenClass::Comment => "\x1b[90m",    // bright black
        TokenClass::Keyword => "\x1b[1;34m",  // bold blue
        TokenClass::Identifier => "\x1b[0m",  // default
    }
}

fn read_source(path: &str) -> Result<String, CliError> {
    if path == "-" {
        io::read_to_string(io::stdin()).map_err(|source| CliError::Read {
            path: "<stdin>".into(),
            source,
        })
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.into(),
            source,
        })
    }
}

/// ANSI-highlight a query on stdout.
pub fn highlight(path: &str, unit: u32) -> Result<(), CliError> {
    let src = read_source(path)?;
    print!("{}", highlight_source(&src, unit));
    Ok(())
}

fn highlight_source(src: &str, unit: u32) -> String {
    let mode = RqMode::new(unit);
    let mut state = mode.start_state();
    let mut out = String::new();
    for line in src.lines() {
        for span in mode.tokenize_line(line, &mut state) {
            let text = &line[span.start as usize..span.end as usize];
            match span.class {
                Some(class) => {
                    out.push_str(color(class));
                    out.push_str(text);
                    out.push_str(RESET);
                }
                None => out.push_str(text),
            }
        }
        out.push('\n');
    }
    debug!(lines = src.lines().count(), "highlighted");
    out
}

/// Re-indent a query using the indentation oracle and print the result.
pub fn reindent(path: &str, unit: u32) -> Result<(), CliError> {
    let src = read_source(path)?;
    print!("{}", reindent_source(&src, unit));
    Ok(())
}

fn reindent_source(src: &str, unit: u32) -> String {
    let mode = RqMode::new(unit);
    let mut state = mode.start_state();
    let mut out = String::new();
    for line in src.lines() {
        // Lines continuing an unterminated literal keep their layout.
        if state.in_literal() {
            mode.tokenize_line(line, &mut state);
            out.push_str(line);
            out.push('\n');
            continue;
        }
        let body = line.trim_start_matches([' ', '\t']);
        if body.is_empty() {
            out.push('\n');
            continue;
        }
        let col = mode.indent(&state, body) as usize;
        let new_line = format!("{}{}", " ".repeat(col), body);
        mode.tokenize_line(&new_line, &mut state);
        out.push_str(&new_line);
        out.push('\n');
    }
    debug!(lines = src.lines().count(), "reindented");
    out
}

/// Dump `(line, span, class)` triples for every classified token.
pub fn classes(path: &str, unit: u32) -> Result<(), CliError> {
    let src = read_source(path)?;
    print!("{}", classes_source(&src, unit));
    Ok(())
}

fn classes_source(src: &str, unit: u32) -> String {
    let mode = RqMode::new(unit);
    let mut state = mode.start_state();
    let mut out = String::new();
    for (idx, line) in src.lines().enumerate() {
        for span in mode.tokenize_line(line, &mut state) {
            let Some(class) = span.class else { continue };
            let text = &line[span.start as usize..span.end as usize];
            out.push_str(&format!(
                "{}:{}-{}\t{}\t{}\n",
                idx + 1,
                span.start,
                span.end,
                class.style(),
                text
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reindent_aligns_a_pattern_block() {
        let src = "SELECT * WHERE { ?s ?p ?o\n?s2 ?p2 ?o2\n}\n";
        let expected = "SELECT * WHERE { ?s ?p ?o\n                 ?s2 ?p2 ?o2\n               }\n";
        assert_eq!(reindent_source(src, 2), expected);
    }

    #[test]
    fn reindent_steps_into_a_trailing_brace() {
        let src = "SELECT * WHERE {\n?s ?p ?o .\n}\n";
        let expected = "SELECT * WHERE {\n  ?s ?p ?o .\n}\n";
        assert_eq!(reindent_source(src, 2), expected);
    }

    #[test]
    fn reindent_leaves_literal_continuations_alone() {
        let src = "SELECT \"abc\n   def\" ?x\n";
        let expected = "SELECT \"abc\n   def\" ?x\n";
        assert_eq!(reindent_source(src, 2), expected);
    }

    #[test]
    fn reindent_preserves_blank_lines() {
        assert_eq!(reindent_source("{\n\n}\n", 2), "{\n\n}\n");
    }

    #[test]
    fn classes_lists_one_triple_per_classified_token() {
        let out = classes_source("SELECT ?x\n", 2);
        assert_eq!(out, "1:0-6\tkeyword\tSELECT\n1:7-9\tvariable-2\t?x\n");
    }

    #[test]
    fn highlight_wraps_classified_spans_in_ansi_codes() {
        let out = highlight_source("?x =\n", 2);
        assert_eq!(out, "\x1b[36m?x\x1b[0m =\n");
    }
}
