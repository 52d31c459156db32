#[macro_use]
extern crate num_derive;
extern crate num_traits;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, trace};

use crate::exprl::prompt::{Emit, run_prompt};
use crate::exprl::runfile::{RunFileError, run_file};

pub mod exprl;

/// Tokenizes, parses and evaluates arithmetic expressions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct App {
    /// Source file to evaluate as a whole. Starts an interactive prompt when omitted.
    file: Option<PathBuf>,

    /// What to print: the evaluated value, the token stream, or the syntax tree.
    #[arg(long, default_value = "value")]
    emit: Emit,

    #[arg(long = "log-level", env = "RUST_LOG")]
    log: Option<LevelFilter>,
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let app = App::parse();
    init_logging(app.log.unwrap_or(LevelFilter::Warn))?;
    trace!("starting exprl with args {:?}", app);

    match app.file {
        None => {
            run_prompt(app.emit)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(file) => match run_file(&file, app.emit) {
            Ok(rendered) => {
                println!("{}", rendered);
                Ok(ExitCode::SUCCESS)
            }
            Err(RunFileError::Pipeline(e)) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        },
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    env_logger::Builder::new()
        .filter_level(level_filter)
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
