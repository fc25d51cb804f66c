//! Command-line interface for mtlxjson
//! This binary converts MaterialX documents between their XML and JSON representations.
//!
//! Usage:
//!   mtlxjson `<input>`                      - Convert an .mtlx or .json file, or every .mtlx file in a folder
//!   mtlxjson `<input>` --fromJSON           - Convert every .json file in a folder to XML
//!   mtlxjson `<input>` --outputPath `<dir>` - Write the results into an existing folder
//!
//! Settings come from the built-in defaults, then `mtlxjson.toml` in the working directory,
//! then `--config <file>`, then the flags below. Log output is controlled by `MTLXJSON_LOG`.

mod jobs;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use jobs::{Job, Outcome};
use mtlx_babel::convert::Direction;
use mtlx_config::{ConfigError, Loader, MtlxJsonConfig, LOCAL_CONFIG_FILE};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MTLXJSON_LOG";

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let input = matches
        .get_one::<PathBuf>("input")
        .expect("input is a required argument");
    let output_dir = matches.get_one::<PathBuf>("outputPath");
    if let Some(dir) = output_dir {
        if !dir.is_dir() {
            println!("Output path \"{}\" does not exist.", dir.display());
            std::process::exit(1);
        }
        println!("- Write files to outputPath: {}", dir.display());
    }

    let jobs = jobs::plan(input, output_dir.map(PathBuf::as_path), matches.get_flag("fromJSON"))
        .unwrap_or_else(|e| {
            println!("{}", e);
            std::process::exit(1);
        });

    let failures = handle_convert_command(&jobs, &config);
    if failures > 0 {
        eprintln!("{} of {} file(s) failed to convert", failures, jobs.len());
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("mtlxjson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to convert between XML and JSON representations of a MaterialX document")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Filename of the input document or folder containing input documents")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("outputPath")
                .long("outputPath")
                .alias("output-path")
                .short('o')
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Folder to write results to (must exist). Defaults to next to each input"),
        )
        .arg(
            Arg::new("fromJSON")
                .long("fromJSON")
                .alias("from-json")
                .action(ArgAction::SetTrue)
                .help("Convert files in a folder from JSON to XML. Default is XML to JSON"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file layered over the defaults and ./mtlxjson.toml"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("JSON indentation width; 0 writes a single line"),
        )
        .arg(
            Arg::new("keep-version")
                .long("keep-version")
                .action(ArgAction::SetTrue)
                .help("Do not upgrade the version of documents read from JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the local config file, `--config` and the flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<MtlxJsonConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(indent) = matches.get_one::<u32>("indent") {
        loader = loader.set_override("json.indent", i64::from(*indent))?;
    }
    if matches.get_flag("keep-version") {
        loader = loader.set_override("read.upgrade_version", false)?;
    }
    loader.build()
}

/// Convert every job, reporting each one. Returns the number of failures.
fn handle_convert_command(jobs: &[Job], config: &MtlxJsonConfig) -> usize {
    let mut failures = 0;
    for job in jobs {
        let skipped = Arc::new(AtomicUsize::new(0));
        match jobs::run(job, config, &skipped) {
            Ok(Outcome::Written) => {
                print_conversion(job);
                let skipped = skipped.load(Ordering::Relaxed);
                if skipped > 0 {
                    println!("  {} JSON entries skipped", skipped);
                }
            }
            Ok(Outcome::Empty) => {
                println!(
                    "Skip JSON file \"{}\": no MaterialX elements found",
                    job.input.display()
                );
            }
            Err(e) => {
                eprintln!("Error converting \"{}\": {}", job.input.display(), e);
                failures += 1;
            }
        }
    }
    failures
}

fn print_conversion(job: &Job) {
    let (from, to) = match job.direction {
        Direction::XmlToJson => ("XML", "JSON"),
        Direction::JsonToXml => ("JSON", "XML"),
    };
    println!(
        "Convert {} file \"{}\" -> {} file \"{}\"",
        from,
        job.input.display(),
        to,
        job.output.display()
    );
}
