use std::io;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::exprl::common::error::PipelineResult;
use crate::exprl::common::lexer::tokenize;
use crate::exprl::interpreter::evaluate;
use crate::exprl::interpreter::runtime_value::RuntimeValue;
use crate::exprl::parser::{parse, parse_tokens};

const BANNER: &str = "Repl v0.1";

/// Which stage's output a run reports.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Emit {
    Value,
    Tokens,
    Ast,
}

impl FromStr for Emit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(Emit::Value),
            "tokens" => Ok(Emit::Tokens),
            "ast" => Ok(Emit::Ast),
            _ => Err(format!("unknown emit mode '{}', expected one of value, tokens, ast", s)),
        }
    }
}

pub fn run(line: &str) -> PipelineResult<RuntimeValue> {
    debug!("running {:?}", line);
    let program = parse(line)?;
    let value = evaluate(&program)?;
    debug!("evaluated to {} {}", value.type_name(), value);
    Ok(value)
}

/// Runs `line` up to the stage selected by `emit` and renders that stage's output.
pub fn run_emit(line: &str, emit: Emit) -> PipelineResult<String> {
    match emit {
        Emit::Value => run(line).map(|v| v.stringify()),
        Emit::Tokens => Ok(tokenize(line)?
            .iter()
            .map(|t| format!("{:?}", t))
            .collect::<Vec<_>>()
            .join("\n")),
        Emit::Ast => {
            let tokens = tokenize(line)?;
            let program = parse_tokens(&tokens)?;
            Ok(program.body.iter().map(|s| s.pretty_print()).collect::<Vec<_>>().join("\n"))
        }
    }
}

pub fn run_prompt(emit: Emit) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_prompt_with(stdin.lock(), &mut stdout.lock(), emit)
}

/// Reads one line at a time and runs each as an independent invocation. Ends on end of input, an
/// empty line or a line containing `exit`.
pub fn run_prompt_with<R: BufRead, W: Write>(mut input: R, output: &mut W, emit: Emit) -> io::Result<()> {
    writeln!(output, "\n{}", BANNER)?;
    let mut line_read = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line_read.clear();
        if input.read_line(&mut line_read)? == 0 {
            break;
        }
        let line = line_read.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if line.is_empty() || line.contains("exit") {
            break;
        }
        match run_emit(line, emit) {
            Ok(rendered) => writeln!(output, "{}", rendered)?,
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
    Ok(())
}
