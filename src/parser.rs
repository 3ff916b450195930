// statement  → "print" expression ";" | expression ";" ;
//
// expression → equality ;
// equality   → comparison ( ( "!=" | "==" ) comparison )* ;
// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
// term       → factor ( ( "-" | "+" ) factor )* ;
// factor     → unary ( ( "/" | "*" ) unary )* ;
// unary      → ( "!" | "-" ) unary | primary ;
// primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")" ;

use crate::ast::{Expr, Program, Stmt};
use crate::error::SiskinError;
use crate::lexer::{Literal, Token, TokenType};
use crate::value::Value;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parses the whole token stream in one pass. A syntax error abandons
    /// only the statement it occurred in: the error is collected, the
    /// cursor resynchronizes at the next statement boundary, and parsing
    /// continues, so every malformed statement in the source reports its
    /// own error.
    pub fn parse(&mut self) -> (Program, Vec<SiskinError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            let checkpoint = self.current;
            match self.statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    errors.push(error);
                    // Errors leave the offending token unconsumed. Step past
                    // it when nothing else was consumed, so recovery always
                    // makes progress.
                    if self.current == checkpoint {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }

        (Program { statements }, errors)
    }

    fn statement(&mut self) -> Result<Stmt, SiskinError> {
        if self.match_types(&[TokenType::Print]) {
            self.print_statement()
        } else {
            self.expression_statement()
        }
    }

    fn print_statement(&mut self) -> Result<Stmt, SiskinError> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print { expr })
    }

    fn expression_statement(&mut self) -> Result<Stmt, SiskinError> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression { expr })
    }

    fn expression(&mut self) -> Result<Expr, SiskinError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr, SiskinError> {
        let mut expr = self.comparison()?;

        while self.match_types(&[TokenType::BangEqual, TokenType::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, SiskinError> {
        let mut expr = self.term()?;

        while self.match_types(&[
            TokenType::Greater,
            TokenType::GreaterEqual,
            TokenType::Less,
            TokenType::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.term()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, SiskinError> {
        let mut expr = self.factor()?;

        while self.match_types(&[TokenType::Minus, TokenType::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, SiskinError> {
        let mut expr = self.unary()?;

        while self.match_types(&[TokenType::Slash, TokenType::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, SiskinError> {
        if self.match_types(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            let operand = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, SiskinError> {
        if self.match_types(&[TokenType::False]) {
            return Ok(Expr::Literal {
                value: Value::Bool(false),
            });
        }
        if self.match_types(&[TokenType::True]) {
            return Ok(Expr::Literal {
                value: Value::Bool(true),
            });
        }
        if self.match_types(&[TokenType::Nil]) {
            return Ok(Expr::Literal { value: Value::Nil });
        }

        if self.match_types(&[TokenType::Number, TokenType::String]) {
            let value = match &self.previous().literal {
                Some(Literal::Number(n)) => Value::Number(*n),
                Some(Literal::String(s)) => Value::String(s.clone()),
                None => unreachable!("number and string tokens always carry a literal"),
            };
            return Ok(Expr::Literal { value });
        }

        if self.match_types(&[TokenType::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping {
                expr: Box::new(expr),
            });
        }

        Err(SiskinError::syntax_error(
            self.peek(),
            "Expect expression.".to_string(),
        ))
    }

    /// Discards tokens up to a likely statement boundary: just past a `;`,
    /// or just before a keyword that starts a statement.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.previous().token_type == TokenType::Semicolon {
                return;
            }

            match self.peek().token_type {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => {}
            }

            self.advance();
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            &self.peek().token_type == token_type
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<&Token, SiskinError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(SiskinError::syntax_error(self.peek(), message.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorLocation;
    use crate::lexer::Lexer;

    fn parse_source(source: &str) -> (Program, Vec<SiskinError>) {
        let mut lexer = Lexer::new(source.to_string());
        let tokens = lexer.scan_tokens().unwrap();
        Parser::new(tokens).parse()
    }

    fn parse_stmt(source: &str) -> Stmt {
        let (program, errors) = parse_source(source);
        assert!(errors.is_empty(), "unexpected syntax errors: {:?}", errors);
        assert_eq!(program.statements.len(), 1);
        program.statements.into_iter().next().unwrap()
    }

    fn parse_expr(source: &str) -> Expr {
        match parse_stmt(source) {
            Stmt::Expression { expr } => expr,
            Stmt::Print { expr } => expr,
        }
    }

    fn literal_number(expr: &Expr) -> f64 {
        match expr {
            Expr::Literal {
                value: Value::Number(n),
            } => *n,
            other => panic!("expected a number literal, got {:?}", other),
        }
    }

    #[test]
    fn literal_expression_statement() {
        match parse_stmt("42;") {
            Stmt::Expression {
                expr: Expr::Literal { value },
            } => assert_eq!(value, Value::Number(42.0)),
            other => panic!("expected a literal expression statement, got {:?}", other),
        }
    }

    #[test]
    fn print_statement() {
        match parse_stmt("print \"hi\";") {
            Stmt::Print {
                expr: Expr::Literal { value },
            } => assert_eq!(value, Value::String("hi".to_string())),
            other => panic!("expected a print statement, got {:?}", other),
        }
    }

    #[test]
    fn binary_operators_fold_left() {
        // 1 - 2 - 3 parses as (1 - 2) - 3
        match parse_expr("1 - 2 - 3;") {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                assert_eq!(operator.token_type, TokenType::Minus);
                assert_eq!(literal_number(&right), 3.0);
                match *left {
                    Expr::Binary {
                        left,
                        operator,
                        right,
                    } => {
                        assert_eq!(operator.token_type, TokenType::Minus);
                        assert_eq!(literal_number(&left), 1.0);
                        assert_eq!(literal_number(&right), 2.0);
                    }
                    other => panic!("expected a binary node on the left, got {:?}", other),
                }
            }
            other => panic!("expected a binary expression, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match parse_expr("1 + 2 * 3;") {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                assert_eq!(operator.token_type, TokenType::Plus);
                assert_eq!(literal_number(&left), 1.0);
                match *right {
                    Expr::Binary {
                        left,
                        operator,
                        right,
                    } => {
                        assert_eq!(operator.token_type, TokenType::Star);
                        assert_eq!(literal_number(&left), 2.0);
                        assert_eq!(literal_number(&right), 3.0);
                    }
                    other => panic!("expected a binary node on the right, got {:?}", other),
                }
            }
            other => panic!("expected a binary expression, got {:?}", other),
        }
    }

    #[test]
    fn grouping_overrides_precedence() {
        // (1 + 2) * 3 keeps the grouped addition on the left
        match parse_expr("(1 + 2) * 3;") {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                assert_eq!(operator.token_type, TokenType::Star);
                assert_eq!(literal_number(&right), 3.0);
                match *left {
                    Expr::Grouping { expr } => match *expr {
                        Expr::Binary { operator, .. } => {
                            assert_eq!(operator.token_type, TokenType::Plus);
                        }
                        other => panic!("expected an addition inside the grouping, got {:?}", other),
                    },
                    other => panic!("expected a grouping on the left, got {:?}", other),
                }
            }
            other => panic!("expected a binary expression, got {:?}", other),
        }
    }

    #[test]
    fn unary_operators_nest() {
        match parse_expr("!!true;") {
            Expr::Unary { operator, operand } => {
                assert_eq!(operator.token_type, TokenType::Bang);
                assert!(matches!(*operand, Expr::Unary { .. }));
            }
            other => panic!("expected a unary expression, got {:?}", other),
        }
    }

    #[test]
    fn equality_is_lower_precedence_than_comparison() {
        // 1 < 2 == true parses as (1 < 2) == true
        match parse_expr("1 < 2 == true;") {
            Expr::Binary { left, operator, .. } => {
                assert_eq!(operator.token_type, TokenType::EqualEqual);
                assert!(matches!(
                    *left,
                    Expr::Binary { ref operator, .. } if operator.token_type == TokenType::Less
                ));
            }
            other => panic!("expected a binary expression, got {:?}", other),
        }
    }

    #[test]
    fn missing_semicolon_recovers_at_the_next_statement() {
        let (program, errors) = parse_source("1 + 2\nprint 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect ';' after expression.");
        assert_eq!(errors[0].line, 2);
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Stmt::Print { .. }));
    }

    #[test]
    fn each_malformed_statement_reports_one_error() {
        let (program, errors) = parse_source("1 +;\n2 +;\nprint 3;");
        assert_eq!(errors.len(), 2);
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Stmt::Print { .. }));
    }

    #[test]
    fn unclosed_grouping_reports_the_missing_paren() {
        let (_, errors) = parse_source("(1 + 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect ')' after expression.");
    }

    #[test]
    fn errors_at_end_of_input_say_at_end() {
        let (_, errors) = parse_source("1 +");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, ErrorLocation::AtEnd);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at end: Expect expression."
        );
    }

    #[test]
    fn errors_name_the_offending_lexeme() {
        let (_, errors) = parse_source("print ;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at ';': Expect expression."
        );
    }

    #[test]
    fn print_requires_a_terminating_semicolon() {
        let (_, errors) = parse_source("print 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect ';' after value.");
    }

    #[test]
    fn stray_reserved_keywords_do_not_stall_recovery() {
        // var is reserved ahead of its grammar; a stray one is an ordinary
        // syntax error and the statement after it still parses.
        let (program, errors) = parse_source("var x;\nprint 1;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect expression.");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn empty_source_parses_to_an_empty_program() {
        let (program, errors) = parse_source("");
        assert!(program.statements.is_empty());
        assert!(errors.is_empty());
    }
}
