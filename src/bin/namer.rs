extern crate atty;
extern crate clap;
extern crate colored;
extern crate log;
extern crate log_panics;
extern crate serde_json;
extern crate simple_logging;

mod reporting;
pub use self::reporting::*;

use log::LevelFilter;
use namer::semantics::{Namer, Naming, SymbolTable};
use namer::syntax::Parser;
use namer::{Arc, BasicReporter, Diagnostic, DiagnosticRecord, Reporter, Source};
use serde::Serialize;
use std::process::exit;

#[derive(Serialize)]
struct JsonOutput<'a> {
    symbols: &'a SymbolTable,
    diagnostics: Vec<DiagnosticRecord>,
}

fn log_to_stderr(verbosity: u64) {
    log_panics::init();
    let level = match verbosity {
        0 if cfg!(debug_assertions) => LevelFilter::Warn,
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simple_logging::log_to_stderr(level);
}

fn main() -> Result<(), clap::Error> {
    let mut app = clap::App::new("namer")
        .about("Checks type_member and type_template declarations.")
        .subcommands(vec![clap::SubCommand::with_name("check")
            .arg(
                clap::Arg::with_name("files")
                    .takes_value(true)
                    .multiple(true)
                    .value_name("FILES")
                    .help("Files or glob patterns to check, `-` for stdin"),
            )
            .arg(
                clap::Arg::with_name("format")
                    .long("format")
                    .takes_value(true)
                    .possible_values(&["pretty", "plain", "json"])
                    .default_value("pretty"),
            )
            .arg(
                clap::Arg::with_name("symbols")
                    .long("symbols")
                    .help("Print the type parameters bound in each scope"),
            )
            .arg(
                clap::Arg::with_name("verbose")
                    .short("v")
                    .multiple(true)
                    .help("Log more, repeat for more detail"),
            )]);
    let cli = app.clone().get_matches();

    match cli.subcommand() {
        ("check", Some(matches)) => {
            log_to_stderr(matches.occurrences_of("verbose"));
            if !atty::is(atty::Stream::Stdout) {
                colored::control::set_override(false);
            }

            let patterns = matches
                .values_of("files")
                .map(|f| f.collect())
                .unwrap_or_else(|| vec!["**/*.rb"]);
            let sources = load_sources(patterns);

            let failed = check(
                &sources,
                matches.value_of("format").unwrap_or("pretty"),
                matches.is_present("symbols"),
            );
            if failed {
                exit(1);
            }
        }

        _ => {
            app.print_help()?;
            println!();
        }
    }

    Ok(())
}

fn load_sources(patterns: Vec<&str>) -> Vec<Arc<Source>> {
    let mut sources = vec![];
    for pattern in patterns {
        let loaded = if pattern == "-" {
            Source::stdin().map(|s| vec![s])
        } else {
            Source::files(pattern)
        };
        match loaded {
            Ok(loaded) => sources.extend(loaded),
            Err(err) => {
                eprintln!("Failed to read {}: {}", pattern, err);
                exit(2);
            }
        }
    }
    log::info!("Checking {} file(s)", sources.len());
    sources
}

fn check(sources: &[Arc<Source>], format: &str, print_symbols: bool) -> bool {
    let parsed: Vec<_> = sources
        .iter()
        .cloned()
        .map(Parser::new)
        .map(Parser::parse)
        .map(|(tree, d)| (Arc::new(tree), d))
        .collect();

    let Naming {
        symbols,
        diagnostics,
    } = Namer::new().name(parsed);
    let failed = Diagnostic::failed(&diagnostics);

    match format {
        "json" => {
            let output = JsonOutput {
                symbols: &symbols,
                diagnostics: diagnostics.iter().map(Diagnostic::record).collect(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(err) => {
                    eprintln!("Failed to serialize output: {}", err);
                    exit(2);
                }
            }
            return failed;
        }
        "plain" => BasicReporter.report_all(diagnostics),
        _ => PrettyReporter::new(sources).report_all(diagnostics),
    }

    if print_symbols {
        print!("{}", symbols);
    }

    failed
}
