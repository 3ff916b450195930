use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// How one parse-and-evaluate cycle ended. Replaces process-wide error
/// flags: the driver turns this into an exit code, the REPL just moves on
/// to the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    SyntaxError,
    RuntimeError,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::SyntaxError => 65,
            Outcome::RuntimeError => 70,
        }
    }
}

/// Runs a source string through the full pipeline. Every collected syntax
/// error is emitted before giving up; evaluation only starts on a clean
/// parse.
pub fn run(source: &str, filename: Option<&str>, pretty: bool) -> Outcome {
    // Lexical analysis
    let mut lexer = Lexer::new(source.to_string());
    let tokens = match lexer.scan_tokens() {
        Ok(tokens) => tokens,
        Err(error) => {
            error.emit(source, filename, pretty);
            return Outcome::SyntaxError;
        }
    };

    // Parsing
    let mut parser = Parser::new(tokens);
    let (program, errors) = parser.parse();
    if !errors.is_empty() {
        for error in &errors {
            error.emit(source, filename, pretty);
        }
        return Outcome::SyntaxError;
    }

    // Evaluation
    let evaluator = Evaluator::new();
    if let Err(error) = evaluator.evaluate_program(&program) {
        error.emit(source, filename, pretty);
        return Outcome::RuntimeError;
    }

    Outcome::Ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_conventional_exit_codes() {
        assert_eq!(Outcome::Ok.exit_code(), 0);
        assert_eq!(Outcome::SyntaxError.exit_code(), 65);
        assert_eq!(Outcome::RuntimeError.exit_code(), 70);
    }
}
