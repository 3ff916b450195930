use crate::lexer::Token;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression { expr: Expr },
    Print { expr: Expr },
}

/// Unary and binary nodes keep the token that produced them, so a runtime
/// error can point back at the operator's source line.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal {
        value: Value,
    },
    Grouping {
        expr: Box<Expr>,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
}
