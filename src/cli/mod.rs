//! Command-line entry point.
//!
//! - [`args`] - flag definitions and output ordering

mod args;

pub use args::{parse_args, Cli};

use crate::config;
use crate::error::Result;
use crate::models::Params;
use crate::output::{self, references_interfaces, INTERFACES_KEY};
use crate::processing::{derive_record, interface_params, resolve};
use crate::system::{read_from_pipe, InterfaceSource, SystemInterfaces};
use clap::{ArgMatches, CommandFactory};
use colored::Colorize;
use serde_json::Value;
use std::io::Write;
use std::process::ExitCode;

/// What an invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text for stdout.
    Output(String),
    /// `-v` was given.
    Version,
    /// Nothing to work on; show usage and fail.
    Usage,
}

/// Run terminus with the process arguments, plus any words piped on stdin.
pub fn run() -> Result<ExitCode> {
    let mut argv: Vec<String> = std::env::args().collect();
    argv.extend(read_from_pipe()?);
    log::debug!("argv={:?}", argv);

    let (cli, matches) = parse_args(argv).unwrap_or_else(|e| e.exit());

    match execute(&cli, &matches, &SystemInterfaces)? {
        Outcome::Output(text) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Version => {
            eprintln!("{} version {}", config::PROGRAM_NAME, config::VERSION);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Usage => {
            Cli::command().print_help()?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Carry out a parsed command line against an interface source.
///
/// All output is assembled before anything is returned, so a failing
/// resolution never leaves partial output behind.
pub fn execute<S: InterfaceSource>(cli: &Cli, matches: &ArgMatches, source: &S) -> Result<Outcome> {
    if cli.version {
        return Ok(Outcome::Version);
    }
    if cli.list_interfaces {
        return Ok(Outcome::Output(output::list_interfaces(source)?));
    }

    let wants_interfaces = cli.template.as_deref().is_some_and(references_interfaces);
    let target = cli.target();
    if target.is_none() && !wants_interfaces {
        return Ok(Outcome::Usage);
    }

    let mut params = Params::new();
    if let Some(arg) = target {
        let cidr = resolve(arg, source)?;
        log::info!("{arg} resolved to {cidr}", cidr = cidr.to_string().on_blue());
        params = derive_record(arg, cidr, source)?.to_params()?;
    }
    if wants_interfaces {
        params.insert(
            INTERFACES_KEY.to_string(),
            Value::Object(interface_params(source)?),
        );
    }

    let items = cli.output_items(matches);
    Ok(Outcome::Output(output::render_output(&items, &params)?))
}
