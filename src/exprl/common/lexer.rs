use std::fmt;
use std::fmt::{Display, Formatter};

use log::trace;
use thiserror::Error;

use crate::exprl::common::error::{ErrorInfo, ErrorKind, ExprError};

pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let tokens = Lexer::new(source).get_lexems()?;
    trace!("tokenized {} tokens", tokens.len());
    Ok(tokens)
}

// The only failure possible during lexing is an unrecognized character, and lexing stops there.
// Therefore, at most one error can occur at any given time.
pub type LexResult<A> = Result<A, LexError>;

const EOF_LEXEME: &str = "EndOfFile";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    Number,
    Identifier,
    Equals,
    Let,
    OpenParen,
    CloseParen,
    BinaryOperator,
    EndOfFile,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub r#type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new<S: Into<String>>(r#type: TokenType, lexeme: S, line: usize, column: usize) -> Self {
        Token { r#type, lexeme: lexeme.into(), line, column }
    }
    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenType::EndOfFile, EOF_LEXEME, line, column)
    }
    pub fn get_type(&self) -> TokenType { self.r#type }

    pub fn error_info(&self) -> ErrorInfo {
        ErrorInfo { line: self.line, column: self.column }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.r#type {
            TokenType::EndOfFile => f.write_str(EOF_LEXEME),
            t => write!(f, "{} '{}'", t, self.lexeme),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexError {
    #[error("{info} Error: Unrecognized character '{character}'")]
    UnrecognizedCharacter { character: char, info: ErrorInfo },
}

impl ExprError for LexError {
    fn get_info(&self) -> Option<ErrorInfo> {
        match self {
            LexError::UnrecognizedCharacter { info, .. } => Some(*info),
        }
    }

    fn get_message(&self) -> String {
        match self {
            LexError::UnrecognizedCharacter { character, .. } =>
                format!("Unrecognized character '{}'", character),
        }
    }

    fn kind(&self) -> ErrorKind { ErrorKind::UnrecognizedCharacter }
}

struct Lexer {
    source: Vec<char>,
    current: usize,
    start: usize,
    line: usize,
    column: usize,
    start_column: usize,
    lexems: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            current: 0,
            start: 0,
            line: 1,
            column: 1,
            start_column: 1,
            lexems: Vec::new(),
        }
    }

    pub fn get_lexems(mut self) -> LexResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            self.scan_token()?;
        }
        self.lexems.push(Token::eof(self.line, self.column));
        Ok(self.lexems)
    }

    fn is_at_end(&self) -> bool { self.current >= self.source.len() }

    fn add_token_type(&mut self, tt: TokenType) {
        let token = Token::new(tt, self.current_lexeme(), self.line, self.start_column);
        trace!("lexed {:?}", token);
        self.lexems.push(token);
    }

    fn scan_token(&mut self) -> LexResult<()> {
        let c = self.advance();
        match c {
            '(' => Ok(self.add_token_type(TokenType::OpenParen)),
            ')' => Ok(self.add_token_type(TokenType::CloseParen)),
            '+' | '-' | '*' | '/' | '%' => Ok(self.add_token_type(TokenType::BinaryOperator)),
            '=' => Ok(self.add_token_type(TokenType::Equals)),
            ' ' | '\t' => Ok(()),
            '\n' => {
                self.line += 1;
                self.column = 1;
                Ok(())
            }
            c =>
                if c.is_ascii_digit() {
                    self.read_number_literal();
                    Ok(self.add_token_type(TokenType::Number))
                } else if is_cased_letter(c) {
                    let ident = self.read_identifier();
                    Ok(self.add_token_type(ident))
                } else {
                    Err(LexError::UnrecognizedCharacter {
                        character: c,
                        info: ErrorInfo { line: self.line, column: self.start_column },
                    })
                }
        }
    }

    fn advance(&mut self) -> char {
        let result = self.source[self.current];
        self.current += 1;
        self.column += 1;
        result
    }

    fn peek_test<F: Fn(char) -> bool>(&self, f: F) -> bool {
        self.source.get(self.current).map(|e| f(*e)).unwrap_or(false)
    }

    fn read_number_literal(&mut self) {
        while self.peek_test(|e| e.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> TokenType {
        while self.peek_test(is_cased_letter) {
            self.advance();
        }
        Lexer::get_keyword(&self.current_lexeme()).unwrap_or(TokenType::Identifier)
    }

    fn current_lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn get_keyword(word: &str) -> Option<TokenType> {
        match word {
            "let" => Some(TokenType::Let),
            _ => None,
        }
    }
}

// A letter with distinct upper and lower case forms. Scripts without case, such as CJK, are
// not identifier characters.
fn is_cased_letter(c: char) -> bool {
    !c.to_uppercase().eq(c.to_lowercase())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::exprl::common::tests::{token_types, unsafe_tokenize};

    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(
            unsafe_tokenize(vec!["foo"]),
            vec!(
                Token::new(TokenType::Identifier, "foo", 1, 1),
                Token::eof(1, 4),
            ),
        )
    }

    #[test]
    fn test_basic_example() {
        assert_eq!(
            unsafe_tokenize(vec!["let x = 45"]),
            vec!(
                Token::new(TokenType::Let, "let", 1, 1),
                Token::new(TokenType::Identifier, "x", 1, 5),
                Token::new(TokenType::Equals, "=", 1, 7),
                Token::new(TokenType::Number, "45", 1, 9),
                Token::eof(1, 11),
            ),
        )
    }

    #[test]
    fn test_basic_expression() {
        assert_eq!(
            unsafe_tokenize(vec!["(x + 42) % 7"]),
            vec!(
                Token::new(TokenType::OpenParen, "(", 1, 1),
                Token::new(TokenType::Identifier, "x", 1, 2),
                Token::new(TokenType::BinaryOperator, "+", 1, 4),
                Token::new(TokenType::Number, "42", 1, 6),
                Token::new(TokenType::CloseParen, ")", 1, 8),
                Token::new(TokenType::BinaryOperator, "%", 1, 10),
                Token::new(TokenType::Number, "7", 1, 12),
                Token::eof(1, 13),
            ),
        )
    }

    #[test]
    fn multiline_positions() {
        assert_eq!(
            unsafe_tokenize(vec!["1 *", "\t2"]),
            vec!(
                Token::new(TokenType::Number, "1", 1, 1),
                Token::new(TokenType::BinaryOperator, "*", 1, 3),
                Token::new(TokenType::Number, "2", 2, 2),
                Token::eof(2, 3),
            ),
        )
    }

    #[test]
    fn adjacent_runs_split_on_class_change() {
        assert_eq!(
            token_types("12ab3"),
            vec![TokenType::Number, TokenType::Identifier, TokenType::Number, TokenType::EndOfFile],
        );
        assert_eq!(unsafe_tokenize(vec!["12ab3"])[1].lexeme, "ab");
    }

    #[test]
    fn keywords_are_case_sensitive_and_whole_words() {
        assert_eq!(
            token_types("let Let letter"),
            vec![
                TokenType::Let,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::EndOfFile,
            ],
        );
    }

    #[test]
    fn cased_letters_are_identifiers() {
        assert_eq!(unsafe_tokenize(vec!["café"])[0], Token::new(TokenType::Identifier, "café", 1, 1));
        assert_eq!(unsafe_tokenize(vec!["é"])[0], Token::new(TokenType::Identifier, "é", 1, 1));
        assert_eq!(unsafe_tokenize(vec!["Ωmega"])[0].get_type(), TokenType::Identifier);
    }

    #[test]
    fn uncased_letters_are_unrecognized() {
        assert_eq!(
            tokenize("中"),
            Err(LexError::UnrecognizedCharacter { character: '中', info: ErrorInfo { line: 1, column: 1 } }),
        );
        match tokenize("ab中") {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::UnrecognizedCharacter);
                assert_eq!(e.get_info(), Some(ErrorInfo { line: 1, column: 3 }));
            }
            other => panic!("Expected a lex error, got {:?}", other),
        }
    }

    #[test]
    fn unrecognized_character() {
        assert_eq!(
            tokenize("3 + #").unwrap_err(),
            LexError::UnrecognizedCharacter { character: '#', info: ErrorInfo { line: 1, column: 5 } },
        );
    }

    #[test]
    fn underscore_and_carriage_return_are_rejected() {
        for (source, c) in vec![("a_b", '_'), ("1\r\n", '\r'), ("2.5", '.')] {
            match tokenize(source) {
                Err(LexError::UnrecognizedCharacter { character, .. }) => assert_eq!(character, c),
                other => panic!("expected a lex error for {:?}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn empty_source() {
        assert_eq!(tokenize("").unwrap(), vec![Token::eof(1, 1)]);
    }

    proptest! {
        #[test]
        fn digit_runs_are_single_numbers(s in "[0-9]{1,40}") {
            let tokens = tokenize(&s).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(tokens[0].get_type(), TokenType::Number);
            prop_assert_eq!(&tokens[0].lexeme, &s);
            prop_assert_eq!(tokens[1].get_type(), TokenType::EndOfFile);
        }

        #[test]
        fn whitespace_yields_only_eof(s in "[ \t\n]{0,40}") {
            let tokens = tokenize(&s).unwrap();
            prop_assert_eq!(token_types_of(&tokens), vec![TokenType::EndOfFile]);
        }

        #[test]
        fn always_ends_in_single_eof(s in "[0-9a-z()+*/%= \n-]{0,60}") {
            let tokens = tokenize(&s).unwrap();
            let eofs = tokens.iter().filter(|t| t.get_type() == TokenType::EndOfFile).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(Token::get_type), Some(TokenType::EndOfFile));
        }
    }

    fn token_types_of(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(Token::get_type).collect()
    }
}
