// Siskin Language Interpreter Library
//
// Core library for the Siskin interpreter: a lexer, a recursive-descent
// parser with syntax error recovery, and a tree-walking evaluator for a
// small dynamically typed expression language.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{Expr, Program, Stmt};
pub use error::{ErrorKind, ErrorLocation, SiskinError, Span};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Literal, Token, TokenType};
pub use parser::Parser;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, Outcome};
