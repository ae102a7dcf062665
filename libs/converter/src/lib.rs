//! Row/table document to custom-element converter
//!
//! Converts a parsed authoring document - component instances expressed
//! as nested block rows or as tables - into a normalized custom-element
//! tree: tag, attributes, merged style variables, and slotted children.
//! Both surface encodings normalize through the row model adapter, so
//! one pipeline handles discovery, root selection, classification, and
//! assembly.
//!
//! The conversion is a total function: every degraded case (nameless
//! component, unresolved reference, no components at all, ambiguous
//! root) produces a best-effort result instead of an error.

pub mod assemble;
pub mod classify;
pub mod config;
pub mod context;
pub mod discover;
pub mod refs;
pub mod rows;
pub mod serialize;

use exmark_proto::dom::Document;
use exmark_proto::virt::VNode;
use serde::{Deserialize, Serialize};

pub use classify::RowKind;
pub use config::{ConvertConfig, GENERIC_MARKER};
pub use context::ConvertContext;
pub use discover::ComponentDecl;
pub use rows::{Encoding, Row};
pub use serialize::serialize;

/// Outcome of one conversion. Passthrough marks the degraded paths
/// (nothing convertible was found); callers treat both uniformly but
/// can observe the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConversionResult {
    Converted(VNode),
    Passthrough(VNode),
}

impl ConversionResult {
    pub fn node(&self) -> &VNode {
        match self {
            ConversionResult::Converted(node) => node,
            ConversionResult::Passthrough(node) => node,
        }
    }

    pub fn into_node(self) -> VNode {
        match self {
            ConversionResult::Converted(node) => node,
            ConversionResult::Passthrough(node) => node,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, ConversionResult::Passthrough(_))
    }
}

/// Convert a document to its root element structure
pub fn convert_to_element(doc: &Document, config: &ConvertConfig) -> ConversionResult {
    let mut decls = discover::discover(doc, config);
    if decls.is_empty() {
        return assemble::passthrough_document(&doc.children);
    }

    discover::assign_identifiers(&mut decls);
    let index = discover::build_index(&decls);
    let Some(root) = discover::select_root(&decls) else {
        return assemble::passthrough_document(&doc.children);
    };

    let mut ctx = ConvertContext::new(config, decls, index);
    assemble::convert_decl(&mut ctx, root)
}

/// Convert a document and serialize the root element to markup text
pub fn convert_to_markup(doc: &Document, config: &ConvertConfig) -> String {
    serialize(convert_to_element(doc, config).node())
}
