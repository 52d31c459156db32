use std::fmt;
use std::fmt::{Display, Formatter};

use crate::exprl::interpreter::runtime_value::RuntimeValue::{Null, Number};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RuntimeValue {
    Number(f64),
    Null,
}

impl RuntimeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Number(_) => "number",
            Null => "null",
        }
    }

    pub fn stringify(&self) -> String {
        match self {
            Number(n) => n.to_string(),
            Null => "null".to_owned(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Number(n) => Some(*n),
            Null => None,
        }
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}
