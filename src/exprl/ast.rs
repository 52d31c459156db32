use std::fmt;
use std::fmt::{Display, Formatter};
use std::mem;

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self { Program { body } }
}

// Every statement in this grammar is an expression; the wrapper keeps the two roles apart.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Expression(Expression),
}

impl Statement {
    pub fn pretty_print(&self) -> String {
        match self {
            Statement::Expression(e) => e.pretty_print(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    NumericLiteral(f64),
    Identifier(String),
    NullLiteral,
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
}

impl Expression {
    // Walks with an explicit stack: a long left-associative chain is as deep as it is long.
    pub fn pretty_print(&self) -> String {
        enum Piece<'a> {
            Node(&'a Expression, usize),
            Text(&'static str),
        }
        let mut result = String::new();
        let mut pending = vec![Piece::Node(self, 0)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(s) => result.push_str(s),
                Piece::Node(e, depth) => {
                    result.push_str(&"\t".repeat(depth));
                    match e {
                        Expression::NumericLiteral(n) => result.push_str(&n.to_string()),
                        Expression::Identifier(name) => result.push_str(name),
                        Expression::NullLiteral => result.push_str("null"),
                        Expression::Binary(op, e1, e2) => {
                            result.push_str(op.symbol());
                            result.push_str("(\n");
                            pending.push(Piece::Text(")"));
                            pending.push(Piece::Node(e2, depth + 1));
                            pending.push(Piece::Text(",\n"));
                            pending.push(Piece::Node(e1, depth + 1));
                        }
                    }
                }
            }
        }
        result
    }

    pub fn identifier<S: Into<String>>(str: S) -> Self { Expression::Identifier(str.into()) }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }
}

// The derived drop glue recurses once per nested box, so deep trees are torn down by hand.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        detach_operands(self, &mut detached);
        while let Some(mut e) = detached.pop() {
            detach_operands(&mut e, &mut detached);
        }
    }
}

fn detach_operands(e: &mut Expression, into: &mut Vec<Expression>) {
    if let Expression::Binary(_, e1, e2) = e {
        into.push(mem::replace(&mut **e1, Expression::NullLiteral));
        into.push(mem::replace(&mut **e2, Expression::NullLiteral));
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Plus),
            "-" => Some(BinaryOperator::Minus),
            "*" => Some(BinaryOperator::Mult),
            "/" => Some(BinaryOperator::Div),
            "%" => Some(BinaryOperator::Mod),
            _ => None,
        }
    }

    pub fn apply(&self, n1: f64, n2: f64) -> f64 {
        match self {
            BinaryOperator::Plus => n1 + n2,
            BinaryOperator::Minus => n1 - n2,
            BinaryOperator::Mult => n1 * n2,
            BinaryOperator::Div => n1 / n2,
            // Rust's `%` on floats is fmod: the result takes the sign of the dividend.
            BinaryOperator::Mod => n1 % n2,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_nests_operands() {
        let expr = Expression::binary(
            BinaryOperator::Mult,
            Expression::binary(
                BinaryOperator::Plus,
                Expression::identifier("x"),
                Expression::NumericLiteral(3.0),
            ),
            Expression::NullLiteral,
        );
        assert_eq!(expr.pretty_print(), "*(\n\t+(\n\t\tx,\n\t\t3),\n\tnull)");
    }

    #[test]
    fn symbols_round_trip_through_from_symbol() {
        for op in vec![
            BinaryOperator::Plus,
            BinaryOperator::Minus,
            BinaryOperator::Mult,
            BinaryOperator::Div,
            BinaryOperator::Mod,
        ] {
            assert_eq!(BinaryOperator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOperator::from_symbol("="), None);
    }

    #[test]
    fn remainder_follows_dividend_sign() {
        assert_eq!(BinaryOperator::Mod.apply(-7.0, 3.0), -1.0);
        assert_eq!(BinaryOperator::Mod.apply(7.0, -3.0), 1.0);
        assert!(BinaryOperator::Mod.apply(7.0, 0.0).is_nan());
        assert_eq!(BinaryOperator::Div.apply(1.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn deep_trees_drop_without_recursing() {
        let mut expr = Expression::NumericLiteral(0.0);
        for _ in 0..200_000 {
            expr = Expression::binary(BinaryOperator::Plus, expr, Expression::NullLiteral);
        }
        drop(expr);
    }

    #[test]
    fn pretty_print_handles_deep_trees() {
        let mut expr = Expression::NumericLiteral(1.0);
        for _ in 0..20_000 {
            expr = Expression::binary(BinaryOperator::Minus, expr, Expression::NumericLiteral(1.0));
        }
        let printed = expr.pretty_print();
        assert!(printed.starts_with("-(\n\t-(\n"));
        assert_eq!(printed.matches('-').count(), 20_000);
    }
}
