use crate::exprl::{
    ast::Program,
    common::lexer::{Token, TokenType, tokenize},
    parser::parse,
};

pub fn unsafe_tokenize(program: Vec<&str>) -> Vec<Token> {
    tokenize(program.join("\n").as_ref()).expect("Failed to tokenize")
}

pub fn token_types(source: &str) -> Vec<TokenType> {
    unsafe_tokenize(vec![source]).iter().map(Token::get_type).collect()
}

pub fn unsafe_parse(program: Vec<&str>) -> Program {
    parse(program.join("\n").as_ref()).expect("Failed to parse")
}

#[macro_export] macro_rules! assert_msg_contains {
    ($msg: expr, $str: expr) => {{
        if !$msg.contains($str) {
            panic!("'{}' Does not contain {}", $msg, $str)
        }
    }}
}
