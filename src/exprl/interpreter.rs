use log::trace;

use crate::exprl::ast::{BinaryOperator, Expression, Program, Statement};
use crate::exprl::interpreter::result::{EvalError, EvalResult};
use crate::exprl::interpreter::runtime_value::RuntimeValue;

pub mod result;
pub mod runtime_value;

/// Evaluates every statement in order; the program's value is that of its last statement, or
/// `Null` for an empty program.
pub fn evaluate(program: &Program) -> EvalResult<RuntimeValue> {
    let mut last_evaluated = RuntimeValue::Null;
    for statement in &program.body {
        last_evaluated = evaluate_statement(statement)?;
    }
    Ok(last_evaluated)
}

fn evaluate_statement(statement: &Statement) -> EvalResult<RuntimeValue> {
    match statement {
        Statement::Expression(e) => evaluate_expression(e),
    }
}

// Operands are walked with an explicit stack: a chain of n terms nests n deep.
enum Frame<'a> {
    Visit(&'a Expression),
    Apply(BinaryOperator),
}

pub fn evaluate_expression(expression: &Expression) -> EvalResult<RuntimeValue> {
    let mut frames = vec![Frame::Visit(expression)];
    let mut values: Vec<RuntimeValue> = Vec::new();
    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Visit(e) => match e {
                Expression::NumericLiteral(n) => values.push(RuntimeValue::Number(*n)),
                Expression::NullLiteral => values.push(RuntimeValue::Null),
                Expression::Binary(op, e1, e2) => {
                    // Left strictly before right.
                    frames.push(Frame::Apply(*op));
                    frames.push(Frame::Visit(e2));
                    frames.push(Frame::Visit(e1));
                }
                // No environment exists, so there is nothing to resolve a name against.
                Expression::Identifier(_) => return Err(EvalError::UnsupportedNode(e.clone())),
            },
            Frame::Apply(op) => {
                let (x2, x1) = match (values.pop(), values.pop()) {
                    (Some(x2), Some(x1)) => (x2, x1),
                    _ => panic!("Operator {} applied with fewer than two operands", op),
                };
                let result = evaluate_binary(&op, &x1, &x2);
                trace!("{} {} {} = {}", x1, op, x2, result);
                values.push(result);
            }
        }
    }
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        _ => panic!("Evaluation did not leave exactly one value"),
    }
}

// Division and modulus by zero are deliberately left to IEEE-754 (inf / NaN).
fn evaluate_binary(op: &BinaryOperator, v1: &RuntimeValue, v2: &RuntimeValue) -> RuntimeValue {
    match (v1.as_number(), v2.as_number()) {
        (Some(n1), Some(n2)) => RuntimeValue::Number(op.apply(n1, n2)),
        _ => RuntimeValue::Null,
    }
}
