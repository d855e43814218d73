//! Round-up Engine CLI
//!
//! Reads a JSON request body from a file or stdin, runs one pipeline
//! operation and writes the JSON response to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- parse transactions.json
//! cargo run -- filter < filter_request.json
//! cargo run -- performance
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `ROUNDUP_API_KEY`: Shared secret every invocation must present
//! - `X_API_KEY`: Key presented when `--api-key` is not given

use clap::{Parser, Subcommand};
use roundup_engine::{
    pipeline, Config, FilterRequest, PerformanceReport, Result, Transaction, ValidationRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "roundup-engine",
    version,
    about = "Round-up savings calculator and transaction validator"
)]
struct Cli {
    /// API key checked against ROUNDUP_API_KEY
    #[arg(long, env = "X_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute ceiling and remanent for a list of transactions
    Parse {
        /// Request file (defaults to stdin)
        input: Option<PathBuf>,
    },
    /// Split parsed transactions into valid and invalid ones
    Validate {
        /// Request file (defaults to stdin)
        input: Option<PathBuf>,
    },
    /// Apply Q, P and K windows, then validate
    Filter {
        /// Request file (defaults to stdin)
        input: Option<PathBuf>,
    },
    /// Report elapsed time, memory and thread count
    Performance,
}

fn main() {
    let started = Instant::now();
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli, started) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, started: Instant) -> Result<()> {
    Config::from_env()
        .guard()
        .authorize(cli.api_key.as_deref())?;

    let stdout = io::stdout();
    let handle = stdout.lock();

    match cli.command {
        Command::Parse { input } => {
            let transactions: Vec<Transaction> = read_request(input.as_deref())?;
            write_response(handle, &pipeline::parse(&transactions))
        }
        Command::Validate { input } => {
            let request: ValidationRequest = read_request(input.as_deref())?;
            write_response(handle, &pipeline::validate_parsed(request))
        }
        Command::Filter { input } => {
            let request: FilterRequest = read_request(input.as_deref())?;
            write_response(handle, &pipeline::filter_and_validate(request))
        }
        Command::Performance => write_response(handle, &PerformanceReport::capture(started)),
    }
}

fn read_request<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let request = match path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => serde_json::from_reader(io::stdin().lock())?,
    };
    Ok(request)
}

fn write_response<W: Write, T: Serialize>(mut writer: W, response: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
