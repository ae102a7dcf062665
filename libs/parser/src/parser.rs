//! Stack-based tree builder over the coarse token stream
//!
//! Recovery rules:
//! - a close tag with no matching open tag is ignored
//! - a close tag matching a non-top open tag closes everything above it
//! - open tags remaining at end of input are closed implicitly
//! - void elements (`br`, `img`, ...) never go on the stack

use exmark_proto::dom::{Document, Element, Node};

use crate::error::{ParseError, ParseErrors, ParseResult};
use crate::tokenizer::{tokenize, Token};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parse a markup string into a document tree
pub fn parse(source: &str) -> ParseResult<Document> {
    let tokens = tokenize(source)?;

    let mut errors = ParseErrors::new();
    let mut root = Document::default();
    let mut stack: Vec<Element> = Vec::new();

    for (token, span) in tokens {
        match token {
            Token::OpenTag(slice) => match scan_open_tag(slice) {
                Ok((element, self_closing)) => {
                    if self_closing || VOID_TAGS.contains(&element.tag.as_str()) {
                        attach(&mut stack, &mut root, Node::Element(element));
                    } else {
                        stack.push(element);
                    }
                }
                Err(message) => errors.push(ParseError::MalformedTag { span, message }),
            },
            Token::CloseTag(slice) => {
                let tag = scan_close_tag(slice);
                close_tag(&mut stack, &mut root, &tag);
            }
            Token::Text(text) => {
                attach(&mut stack, &mut root, Node::Text(decode_entities(text)));
            }
        }
    }

    // Implicitly close whatever is still open
    while let Some(element) = stack.pop() {
        attach(&mut stack, &mut root, Node::Element(element));
    }

    if errors.is_empty() {
        Ok(root)
    } else {
        Err(errors)
    }
}

fn attach(stack: &mut Vec<Element>, root: &mut Document, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.children.push(node),
    }
}

fn close_tag(stack: &mut Vec<Element>, root: &mut Document, tag: &str) {
    let Some(pos) = stack.iter().rposition(|el| el.tag == tag) else {
        return;
    };
    while stack.len() > pos {
        if let Some(element) = stack.pop() {
            attach(stack, root, Node::Element(element));
        }
    }
}

/// Scan `<tag attr="value" ...>` into an element plus self-closing flag
fn scan_open_tag(slice: &str) -> Result<(Element, bool), String> {
    let body = &slice[1..slice.len() - 1];
    let (body, self_closing) = match body.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (body, false),
    };

    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let tag = body[..name_end].to_ascii_lowercase();
    let attributes = scan_attributes(&body[name_end..])?;

    let mut element = Element::new(tag);
    element.attributes = attributes;
    Ok((element, self_closing))
}

/// Scan `</tag>` into the lower-cased tag name
fn scan_close_tag(slice: &str) -> String {
    let body = &slice[2..slice.len() - 1];
    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    body[..name_end].to_ascii_lowercase()
}

fn scan_attributes(input: &str) -> Result<Vec<(String, String)>, String> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < len {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            break;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = input[name_start..i].to_ascii_lowercase();
        if name.is_empty() {
            return Err("attribute name missing before '='".to_string());
        }

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let value = if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < len && bytes[i] != quote {
                    i += 1;
                }
                if i >= len {
                    return Err(format!("unterminated value for attribute '{}'", name));
                }
                let raw = &input[value_start..i];
                i += 1;
                decode_entities(raw)
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                decode_entities(&input[value_start..i])
            };
            attrs.push((name, value));
        } else {
            // bare attribute
            attrs.push((name, String::new()));
        }
    }

    Ok(attrs)
}

/// Decode the entities authored exports actually emit; unknown entities
/// pass through literally
pub(crate) fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let mut decoded = None;
        if let Some(end) = rest.find(';') {
            if end > 1 && end <= 10 {
                decoded = decode_entity(&rest[1..end]).map(|ch| (ch, end + 1));
            }
        }

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
