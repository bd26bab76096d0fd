//! OMOP ETL command-line entry point.
//!
//! Validates the `--config` path, then hands over to [`bootstrap::run`]. Any
//! error is reported once here, with its cause chain, and mapped to an exit code.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::PathBuf;

use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};
use omop_etl::{bootstrap, exit_codes};

#[derive(Parser)]
#[command(name = "omop-etl", about = "Run an OMOP ETL from a YAML configuration file")]
struct Cli {
    /// Path to the yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "config_file_path",
        value_parser = OsStringValueParser::new().try_map(existing_readable_file)
    )]
    config: PathBuf,
}

/// Accept only a path that exists, is a regular file and can be opened.
fn existing_readable_file(raw: OsString) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    let shown = path.display();
    let metadata = fs::metadata(&path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => format!("file '{shown}' does not exist"),
        _ => format!("cannot access '{shown}': {err}"),
    })?;
    if !metadata.is_file() {
        return Err(format!("'{shown}' is not a file"));
    }
    File::open(&path).map_err(|err| format!("file '{shown}' is not readable: {err}"))?;
    Ok(path)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help is reported through the error path but is not a failure.
            let code = if err.use_stderr() {
                exit_codes::USAGE
            } else {
                exit_codes::OK
            };
            std::process::exit(code);
        }
    };
    let code = match bootstrap::run(&cli.config) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("Error: {err:?}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}
