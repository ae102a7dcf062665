//! Lenient markup front end
//!
//! Parses authored markup documents (the block and table surface
//! encodings) into the `exmark_proto::dom` tree. Parsing is best-effort:
//! mismatched close tags recover, unclosed tags auto-close at end of
//! input. Only genuinely unlexable input (a stray `<` that opens no tag)
//! is reported as an error.

pub mod error;
pub mod parser;
pub mod tokenizer;

pub use error::{format_errors, ParseError, ParseErrors, ParseResult};
pub use parser::parse;
pub use tokenizer::{tokenize, Token, TokenSpan};
