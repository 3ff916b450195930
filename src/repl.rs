use crate::ast::Stmt;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, Write};

pub fn start(pretty: bool) {
    println!("Siskin Interpreter v0.1.0");
    println!("Type 'exit' or press Ctrl+C to quit");
    println!();

    let evaluator = Evaluator::new();

    loop {
        print!("> ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                // Each line is an independent cycle; errors never end the
                // session.
                run_line(line, &evaluator, pretty);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn run_line(source: &str, evaluator: &Evaluator, pretty: bool) {
    let mut lexer = Lexer::new(source.to_string());
    let tokens = match lexer.scan_tokens() {
        Ok(tokens) => tokens,
        Err(error) => {
            error.emit(source, None, pretty);
            return;
        }
    };

    let mut parser = Parser::new(tokens);
    let (program, errors) = parser.parse();
    if !errors.is_empty() {
        for error in &errors {
            error.emit(source, None, pretty);
        }
        return;
    }

    // A lone expression is echoed back, so `1 + 2;` answers without print.
    if let [Stmt::Expression { expr }] = program.statements.as_slice() {
        match evaluator.evaluate_expression(expr) {
            Ok(value) => println!("{}", value),
            Err(error) => error.emit(source, None, pretty),
        }
        return;
    }

    if let Err(error) = evaluator.evaluate_program(&program) {
        error.emit(source, None, pretty);
    }
}
