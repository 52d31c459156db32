pub mod ast;
pub mod common;
pub mod interpreter;
pub mod parser;
pub mod prompt;
pub mod runfile;
