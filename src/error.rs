use crate::lexer::{Token, TokenType};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Runtime,
}

/// The `<location>` clause of the canonical error line: empty, " at end",
/// or " at '<lexeme>'".
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLocation {
    Plain,
    AtEnd,
    At(String),
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorLocation::Plain => Ok(()),
            ErrorLocation::AtEnd => write!(f, " at end"),
            ErrorLocation::At(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiskinError {
    pub kind: ErrorKind,
    pub line: usize,
    pub location: ErrorLocation,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl SiskinError {
    pub fn scan_error(line: usize, span: Span, message: String) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            line,
            location: ErrorLocation::Plain,
            span,
            message,
            help: None,
        }
    }

    pub fn syntax_error(token: &Token, message: String) -> Self {
        let location = if token.token_type == TokenType::Eof {
            ErrorLocation::AtEnd
        } else {
            ErrorLocation::At(token.lexeme.clone())
        };

        Self {
            kind: ErrorKind::Syntax,
            line: token.line,
            location,
            span: token.span.clone(),
            message,
            help: None,
        }
    }

    pub fn syntax_error_with_help(token: &Token, message: String, help: String) -> Self {
        Self {
            help: Some(help),
            ..Self::syntax_error(token, message)
        }
    }

    pub fn runtime_error(token: &Token, message: String) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            line: token.line,
            location: ErrorLocation::Plain,
            span: token.span.clone(),
            message,
            help: None,
        }
    }

    pub fn runtime_error_with_help(token: &Token, message: String, help: String) -> Self {
        Self {
            help: Some(help),
            ..Self::runtime_error(token, message)
        }
    }

    /// Writes the error to stderr: the canonical one-line form by default,
    /// or an annotated source report when `pretty` is set.
    pub fn emit(&self, source: &str, filename: Option<&str>, pretty: bool) {
        if pretty {
            self.report(source, filename);
        } else {
            eprintln!("{}", self);
        }
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::Syntax => Color::Yellow,
            ErrorKind::Runtime => Color::Magenta,
        };

        let kind_str = match self.kind {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Runtime => "Runtime Error",
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
            .unwrap();
    }
}

impl fmt::Display for SiskinError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

impl std::error::Error for SiskinError {}
