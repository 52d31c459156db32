use std::fs::read_to_string;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::exprl::common::error::PipelineError;
use crate::exprl::prompt::{Emit, run_emit};

#[derive(Debug, Error)]
pub enum RunFileError {
    #[error("Cannot open file {0}")]
    Io(String, #[source] io::Error),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Runs the whole file as one invocation: newlines are whitespace, so the file's value is the value
/// of its last statement.
pub fn run_file<P: AsRef<Path>>(file: P, emit: Emit) -> Result<String, RunFileError> {
    let file = file.as_ref();
    let source = read_to_string(file)
        .map_err(|e| RunFileError::Io(file.display().to_string(), e))?;
    Ok(run_emit(&source, emit)?)
}
