//! Command-line front end for the SPARQL editor mode engine.
//!
//! Drives the `rq_mode` engine the way a host editing surface would:
//! one carried state, one line at a time. Reads a file or stdin.

mod commands;
mod error;

use std::process;
use std::sync::Once;

use rq_mode::DEFAULT_INDENT_UNIT;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let mut unit = DEFAULT_INDENT_UNIT;
    let mut path: Option<&str> = None;
    for arg in &args[2..] {
        if let Some(value) = arg.strip_prefix("--unit=") {
            match value.parse::<u32>() {
                Ok(n) => unit = n,
                Err(_) => {
                    eprintln!("error: invalid --unit value: {value}");
                    process::exit(1);
                }
            }
        } else if path.is_none() {
            path = Some(arg);
        } else {
            eprintln!("error: unexpected argument: {arg}");
            print_usage();
            process::exit(1);
        }
    }
    let path = path.unwrap_or("-");

    let result = match command {
        "highlight" => commands::highlight(path, unit),
        "indent" => commands::reindent(path, unit),
        "classes" => commands::classes(path, unit),
        _ => {
            eprintln!("error: unknown command: {command}");
            print_usage();
            process::exit(1);
        }
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: rq-mode <command> [file.rq | -] [--unit=<n>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  highlight   ANSI-highlight a query");
    eprintln!("  indent      Re-indent a query with the indentation oracle");
    eprintln!("  classes     Dump (line, span, class) triples");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --unit=<n>  Indentation step in columns (default: {DEFAULT_INDENT_UNIT})");
    eprintln!();
    eprintln!("Reads stdin when the file argument is `-` or omitted.");
    eprintln!("Set RUST_LOG=rq_mode=trace to trace context push/pop.");
}

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=rq_mode=trace`.
fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
