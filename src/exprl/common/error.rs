use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use thiserror::Error;

use crate::exprl::common::lexer::{LexError, Token, TokenType};
use crate::exprl::interpreter::result::EvalError;

pub trait ExprError: Debug {
    fn get_info(&self) -> Option<ErrorInfo>;
    fn get_message(&self) -> String;
    fn kind(&self) -> ErrorKind;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ErrorInfo {
    pub line: usize,
    pub column: usize,
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, column {}]", self.line, self.column)
    }
}

/// Flat discriminant over every way a pipeline invocation can fail.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    UnrecognizedCharacter,
    ExpectedToken,
    UnexpectedToken,
    InvalidNumber,
    NestingTooDeep,
    UnsupportedNode,
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParserError {
    #[error("{} Error: Expected {expected}, but encountered {found}", .found.error_info())]
    ExpectedToken { expected: TokenType, found: Token },
    #[error("{} Error: Unexpected token {found}", .found.error_info())]
    UnexpectedToken { found: Token },
    #[error("{} Error: Invalid numeric literal '{}'", .token.error_info(), .token.lexeme)]
    InvalidNumber { token: Token },
    #[error("{} Error: Groupings nested deeper than {limit} levels", .token.error_info())]
    NestingTooDeep { token: Token, limit: usize },
}

impl ParserError {
    pub fn token(&self) -> &Token {
        match self {
            ParserError::ExpectedToken { found, .. } => found,
            ParserError::UnexpectedToken { found } => found,
            ParserError::InvalidNumber { token } => token,
            ParserError::NestingTooDeep { token, .. } => token,
        }
    }
}

impl ExprError for ParserError {
    fn get_info(&self) -> Option<ErrorInfo> {
        Some(self.token().error_info())
    }

    fn get_message(&self) -> String {
        match self {
            ParserError::ExpectedToken { expected, found } =>
                format!("Expected {}, but encountered {}", expected, found),
            ParserError::UnexpectedToken { found } => format!("Unexpected token {}", found),
            ParserError::InvalidNumber { token } =>
                format!("Invalid numeric literal '{}'", token.lexeme),
            ParserError::NestingTooDeep { limit, .. } =>
                format!("Groupings nested deeper than {} levels", limit),
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            ParserError::ExpectedToken { .. } => ErrorKind::ExpectedToken,
            ParserError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParserError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            ParserError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }
}

/// Whatever stopped a single tokenize -> parse -> evaluate run. Termination policy is left to the
/// caller.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl PipelineError {
    fn inner(&self) -> &dyn ExprError {
        match self {
            PipelineError::Lex(e) => e,
            PipelineError::Parse(e) => e,
            PipelineError::Eval(e) => e,
        }
    }
}

impl ExprError for PipelineError {
    fn get_info(&self) -> Option<ErrorInfo> { self.inner().get_info() }

    fn get_message(&self) -> String { self.inner().get_message() }

    fn kind(&self) -> ErrorKind { self.inner().kind() }
}

pub type PipelineResult<A> = Result<A, PipelineError>;

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use regex::Regex;

    use crate::exprl::prompt::run;

    use super::*;

    lazy_static! {
        static ref POSITIONED: Regex =
            Regex::new(r"^\[line \d+, column \d+\] Error: .+$").unwrap();
    }

    #[test]
    fn lex_and_parse_errors_are_positioned() {
        for source in vec!["3 + #", "(1 + 2", "let", "4 +", "(".repeat(300).as_str()] {
            let err = run(source).unwrap_err();
            let rendered = err.to_string();
            assert!(POSITIONED.is_match(&rendered), "'{}' is not positioned", rendered);
            assert!(err.get_info().is_some());
        }
    }

    #[test]
    fn eval_errors_have_no_position() {
        let err = run("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedNode);
        assert_eq!(err.get_info(), None);
        assert!(!POSITIONED.is_match(&err.to_string()));
    }

    #[test]
    fn message_drops_position() {
        let err = run("\n  (1 + 2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpectedToken);
        assert_eq!(err.get_info(), Some(ErrorInfo { line: 2, column: 9 }));
        assert_eq!(err.get_message(), "Expected CloseParen, but encountered EndOfFile");
    }
}
