//! # memio
//!
//! Runs the in-memory stream and error propagation demonstrations.
//!
//! # Usage
//!
//! ```bash
//! # Everything that completes normally
//! memio all
//!
//! # Guarded division with a custom divisor
//! memio try --divisor 0
//! memio try --divisor abc
//!
//! # Error that escapes every layer (exit status 1)
//! memio reraise --input 0
//!
//! # Config file and verbose JSON logs
//! memio --config memio.toml -v --json all
//! ```

#![deny(warnings)]

mod demos;

use clap::{Parser, Subcommand};
use demos::Transcript;
use memio_common::config::{DemoConfig, DemoSettings, LogLevel};
use memio_common::error::{Error, Result};
use memio_common::report;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// memio - in-memory streams and layered error propagation
#[derive(Parser, Debug)]
#[command(name = "memio")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Demonstrates in-memory streams and layered error propagation")]
#[command(long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write chunks to a text stream, then read a seeded one line by line
    StringIo,
    /// Read a seeded byte stream
    BytesIo,
    /// Guarded division with handlers, a no-error branch and an always branch
    Try {
        #[arg(long)]
        dividend: Option<i64>,
        /// Parsed inside the guarded region, so `abc` reaches the value handler
        #[arg(long)]
        divisor: Option<String>,
    },
    /// Log an error two layers above its origin and continue
    Log {
        #[arg(long)]
        input: Option<String>,
    },
    /// Show a broad handler shadowing a narrower one
    Shadowing,
    /// Raise an application error kind and let it escape
    Raise {
        #[arg(long)]
        input: Option<String>,
    },
    /// Log at an intermediate layer, then re-raise
    Reraise {
        #[arg(long)]
        input: Option<String>,
    },
    /// Translate a division by zero into a value error
    Translate,
    /// Run every demonstration that completes normally
    All,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = DemoConfig::load_or_default(args.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            report::unhandled(&Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = %config.shared.service_name,
        "memio v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let transcript = Transcript::new();
    let outcome = run(&args.command, &config.demo, &transcript);

    match transcript.text() {
        Ok(text) => print!("{text}"),
        Err(e) => report::unhandled(&e),
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::unhandled(&e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch a command, CLI values taking precedence over the config file.
fn run(command: &Command, settings: &DemoSettings, t: &Transcript) -> Result<()> {
    let input = |cli: &Option<String>| cli.clone().unwrap_or_else(|| settings.input.clone());

    match command {
        Command::StringIo => demos::string_io(t, settings),
        Command::BytesIo => demos::bytes_io(t, settings),
        Command::Try { dividend, divisor } => {
            let divisor = divisor
                .clone()
                .unwrap_or_else(|| settings.divisor.to_string());
            demos::try_divide(t, dividend.unwrap_or(settings.dividend), &divisor)
        }
        Command::Log { input: cli } => demos::log_and_continue(t, &input(cli)),
        Command::Shadowing => demos::shadowing(t),
        Command::Raise { input: cli } => demos::raise(t, &input(cli)),
        Command::Reraise { input: cli } => demos::reraise(t, &input(cli)),
        Command::Translate => demos::translate(t),
        Command::All => demos::all(t, settings),
    }
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
///
/// Logs go to stderr so stdout only carries demonstration output.
fn setup_tracing(args: &Args, level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from(level)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
