use logos::Logos;
use std::fmt;

/// Byte span of a token in the source string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl From<std::ops::Range<usize>> for TokenSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Coarse markup tokens
///
/// Tags are lexed as whole slices (`<div class="a">`, `</div>`); the
/// tree builder scans attributes out of the open-tag slice. Comments,
/// doctypes, and processing instructions are skipped. A raw `>` inside
/// an attribute value is not supported; authored exports escape it.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"<!--([^-]|-[^-]|--[^>])*-->")]
#[logos(skip r"<![^>]*>")]
#[logos(skip r"<\?[^>]*>")]
pub enum Token<'src> {
    #[regex(r"</[a-zA-Z][^>]*>", |lex| lex.slice())]
    CloseTag(&'src str),

    #[regex(r"<[a-zA-Z][^>]*>", |lex| lex.slice())]
    OpenTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::CloseTag(s) => write!(f, "close tag {}", s),
            Token::OpenTag(s) => write!(f, "open tag {}", s),
            Token::Text(s) => write!(f, "text {:?}", s),
        }
    }
}

use crate::error::{ParseError, ParseErrors};

/// Tokenize a source string
///
/// The only failure is a stray `<` that opens no tag; everything else
/// lexes as tags or text.
pub fn tokenize(source: &str) -> Result<Vec<(Token<'_>, TokenSpan)>, ParseErrors> {
    let mut tokens = Vec::new();
    let mut errors = ParseErrors::new();

    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span.into())),
            Err(_) => errors.push(ParseError::LexError { span: span.into() }),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_and_text() {
        let source = "<div class=\"a\">hello</div>";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, Token::OpenTag("<div class=\"a\">"));
        assert_eq!(tokens[1].0, Token::Text("hello"));
        assert_eq!(tokens[2].0, Token::CloseTag("</div>"));
    }

    #[test]
    fn test_comments_skipped() {
        let source = "<!-- a > b --><p>x</p>";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens[0].0, Token::OpenTag("<p>"));
    }

    #[test]
    fn test_doctype_skipped() {
        let tokens = tokenize("<!DOCTYPE html><main></main>").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_stray_angle_is_error() {
        assert!(tokenize("a < b").is_err());
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "<p>x</p>";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens[0].1, TokenSpan { start: 0, end: 3 });
        assert_eq!(tokens[2].1, TokenSpan { start: 4, end: 8 });
    }
}
