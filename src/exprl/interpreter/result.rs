use thiserror::Error;

use crate::exprl::ast::Expression;
use crate::exprl::common::error::{ErrorInfo, ErrorKind, ExprError};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvalError {
    // Nodes carry no positions, so neither does this error.
    #[error("Error: Unsupported node {0:?}")]
    UnsupportedNode(Expression),
}

impl ExprError for EvalError {
    fn get_info(&self) -> Option<ErrorInfo> { None }

    fn get_message(&self) -> String {
        match self {
            EvalError::UnsupportedNode(node) => format!("Unsupported node {:?}", node),
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnsupportedNode(_) => ErrorKind::UnsupportedNode,
        }
    }
}

pub type EvalResult<A> = Result<A, EvalError>;
