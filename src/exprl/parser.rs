use log::trace;
use num_traits::FromPrimitive;

use crate::exprl::ast::{BinaryOperator, Expression, Program, Statement};
use crate::exprl::common::error::{ParserError, PipelineResult};
use crate::exprl::common::lexer::{Token, TokenType, tokenize};

pub fn parse(source: &str) -> PipelineResult<Program> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(&tokens)?)
}

pub fn parse_tokens(tokens: &[Token]) -> ParserResult<Program> {
    Parser::new(tokens).program()
}

pub type ParserResult<A> = Result<A, ParserError>;

/// How many groupings may be open at once. Each one costs a few native stack frames, so deeper
/// input is rejected rather than parsed.
pub const MAX_NESTING: usize = 256;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, FromPrimitive)]
enum Precedence {
    Additive /* + - */,
    Multiplicative /* * / % */,
    Primary,
}

impl Precedence {
    fn next(&self) -> Option<Self> {
        FromPrimitive::from_u8(*self as u8 + 1)
    }

    fn lowest() -> Self { Precedence::Additive }
}

impl From<BinaryOperator> for Precedence {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Plus | BinaryOperator::Minus => Precedence::Additive,
            BinaryOperator::Mult | BinaryOperator::Div | BinaryOperator::Mod =>
                Precedence::Multiplicative,
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    // Returned once the cursor runs past the buffer, so a buffer without a trailing EndOfFile
    // still parses as if it had one.
    eof: Token,
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let eof = tokens.last()
            .map(|t| Token::eof(t.line, t.column + t.lexeme.chars().count()))
            .unwrap_or_else(|| Token::eof(1, 1));
        Parser { tokens, eof, current: 0, depth: 0 }
    }

    fn program(&mut self) -> ParserResult<Program> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            let statement = self.statement()?;
            body.push(statement);
            trace!("parsed statement {} ending at token {}", body.len(), self.current);
        }
        Ok(Program::new(body))
    }

    fn statement(&mut self) -> ParserResult<Statement> {
        self.expression().map(Statement::Expression)
    }

    fn expression(&mut self) -> ParserResult<Expression> {
        self.binary(Precedence::lowest())
    }

    // Left-associative: the loop keeps folding onto `expr` instead of recursing on the left.
    fn binary(&mut self, precedence: Precedence) -> ParserResult<Expression> {
        let next = match precedence.next() {
            Some(next) => next,
            None => return self.primary(),
        };
        let mut expr = self.binary(next)?;
        while let Some(operator) = self.matches_operator(precedence) {
            let right = self.binary(next)?;
            expr = Expression::binary(operator, expr, right);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> ParserResult<Expression> {
        let token = self.peek().clone();
        match token.get_type() {
            TokenType::Identifier => {
                self.advance();
                Ok(Expression::identifier(token.lexeme))
            }
            TokenType::Number => {
                self.advance();
                token.lexeme.parse::<f64>()
                    .map(Expression::NumericLiteral)
                    .map_err(|_| ParserError::InvalidNumber { token })
            }
            TokenType::OpenParen => {
                if self.depth >= MAX_NESTING {
                    return Err(ParserError::NestingTooDeep { token, limit: MAX_NESTING });
                }
                self.advance();
                self.depth += 1;
                let expr = self.expression()?;
                self.depth -= 1;
                self.consume(TokenType::CloseParen)?;
                Ok(expr)
            }
            _ => Err(ParserError::UnexpectedToken { found: token }),
        }
    }

    fn matches_operator(&mut self, precedence: Precedence) -> Option<BinaryOperator> {
        let token = self.peek();
        if token.get_type() != TokenType::BinaryOperator {
            return None;
        }
        let result = BinaryOperator::from_symbol(&token.lexeme)
            .filter(|op| Precedence::from(*op) == precedence);
        if result.is_some() {
            self.advance();
        }
        result
    }

    fn consume(&mut self, expected: TokenType) -> ParserResult<&Token> {
        if self.peek().get_type() != expected {
            Err(ParserError::ExpectedToken { expected, found: self.peek().clone() })
        } else {
            Ok(self.advance())
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().get_type() == TokenType::EndOfFile
    }
    fn previous(&self) -> &Token {
        self.tokens.get(self.current.wrapping_sub(1)).unwrap_or(&self.eof)
    }
    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }
}
