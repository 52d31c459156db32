pub mod error;
pub mod lexer;
#[cfg(test)]
pub mod tests;
