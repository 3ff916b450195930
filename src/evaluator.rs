use crate::ast::{Expr, Program, Stmt};
use crate::error::SiskinError;
use crate::lexer::{Token, TokenType};
use crate::value::Value;

/// Tree-walking evaluator. Carries no state of its own: the language has
/// no bindings yet, so every evaluation depends only on the tree it is
/// given.
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Executes statements in order, stopping at the first runtime error.
    pub fn evaluate_program(&self, program: &Program) -> Result<(), SiskinError> {
        for statement in &program.statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    pub fn execute_statement(&self, statement: &Stmt) -> Result<(), SiskinError> {
        match statement {
            Stmt::Expression { expr } => {
                self.evaluate_expression(expr)?;
                Ok(())
            }
            Stmt::Print { expr } => {
                let value = self.evaluate_expression(expr)?;
                println!("{}", value);
                Ok(())
            }
        }
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, SiskinError> {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expr } => self.evaluate_expression(expr),
            Expr::Unary { operator, operand } => {
                let operand_value = self.evaluate_expression(operand)?;
                self.evaluate_unary_op(operator, operand_value)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate_expression(left)?;
                let right_value = self.evaluate_expression(right)?;
                self.evaluate_binary_op(operator, left_value, right_value)
            }
        }
    }

    fn evaluate_unary_op(&self, operator: &Token, operand: Value) -> Result<Value, SiskinError> {
        match operator.token_type {
            TokenType::Bang => Ok(Value::Bool(!operand.is_truthy())),
            TokenType::Minus => {
                let n = self.number_operand(operator, operand)?;
                Ok(Value::Number(-n))
            }
            _ => unreachable!("parser only builds unary nodes for '!' and '-'"),
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: &Token,
        left: Value,
        right: Value,
    ) -> Result<Value, SiskinError> {
        match operator.token_type {
            TokenType::Minus => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Number(l - r))
            }
            TokenType::Star => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Number(l * r))
            }
            TokenType::Slash => {
                // IEEE-754 division: dividing by zero yields infinity or NaN.
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Number(l / r))
            }
            TokenType::Plus => match (left, right) {
                (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
                (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
                (left, right) => Err(SiskinError::runtime_error_with_help(
                    operator,
                    "Operands must be two numbers or two strings.".to_string(),
                    format!(
                        "Addition works on two numbers or two strings, but got {} and {}.",
                        left.type_name(),
                        right.type_name()
                    ),
                )),
            },
            TokenType::Greater => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Bool(l > r))
            }
            TokenType::GreaterEqual => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Bool(l >= r))
            }
            TokenType::Less => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Bool(l < r))
            }
            TokenType::LessEqual => {
                let (l, r) = self.number_operands(operator, left, right)?;
                Ok(Value::Bool(l <= r))
            }
            TokenType::BangEqual => Ok(Value::Bool(!self.is_equal(&left, &right))),
            TokenType::EqualEqual => Ok(Value::Bool(self.is_equal(&left, &right))),
            _ => unreachable!("parser only builds binary nodes for binary operators"),
        }
    }

    fn number_operand(&self, operator: &Token, operand: Value) -> Result<f64, SiskinError> {
        match operand {
            Value::Number(n) => Ok(n),
            operand => Err(SiskinError::runtime_error_with_help(
                operator,
                "Operand must be a number.".to_string(),
                format!("Negation works on numbers, but got {}.", operand.type_name()),
            )),
        }
    }

    fn number_operands(
        &self,
        operator: &Token,
        left: Value,
        right: Value,
    ) -> Result<(f64, f64), SiskinError> {
        match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok((l, r)),
            (left, right) => Err(SiskinError::runtime_error_with_help(
                operator,
                "Operands must be numbers.".to_string(),
                format!(
                    "The '{}' operator expects numbers, but got {} and {}.",
                    operator.lexeme,
                    left.type_name(),
                    right.type_name()
                ),
            )),
        }
    }

    /// Values of different kinds are never equal; there is no coercion.
    fn is_equal(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            _ => false,
        }
    }
}
