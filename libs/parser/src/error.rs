//! Error types for the markup parser

use crate::tokenizer::TokenSpan;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseErrors>;

/// Parse error with location
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("stray '<' at {span:?}: does not open a tag")]
    LexError { span: TokenSpan },

    #[error("malformed tag at {span:?}: {message}")]
    MalformedTag { span: TokenSpan, message: String },
}

impl ParseError {
    pub fn span(&self) -> TokenSpan {
        match self {
            ParseError::LexError { span } => *span,
            ParseError::MalformedTag { span, .. } => *span,
        }
    }
}

/// Collection of errors from a parse attempt
#[derive(Debug, Default)]
pub struct ParseErrors {
    pub errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Pretty-print errors with source context using ariadne
pub fn format_errors(source: &str, filename: &str, errors: &ParseErrors) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();

    for error in &errors.errors {
        let span = error.span();

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_color(Color::Red)
                    .with_message(match error {
                        ParseError::LexError { .. } => "not a valid tag".to_string(),
                        ParseError::MalformedTag { message, .. } => message.clone(),
                    }),
            )
            .finish();

        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            break;
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}
