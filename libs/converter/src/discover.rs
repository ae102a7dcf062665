//! Component discovery, identifier assignment, and root selection
//!
//! Discovery walks the document in order and records maximal component
//! regions without descending into them; components never nest
//! structurally, nesting is expressed through references. Identifiers
//! are `{name}-{n}` with a per-name counter in document order. The root
//! is the component no other component references, with documented
//! tie-breaks for the degenerate cases.

use std::collections::{HashMap, HashSet};

use exmark_proto::dom::{Document, Element, Node};
use tracing::debug;

use crate::config::{ConvertConfig, GENERIC_MARKER};
use crate::refs::parse_references;
use crate::rows::{rows_of, table_has_marker, Encoding, Row};

/// One discovered component region. Read-only after identifier
/// assignment.
#[derive(Debug, Clone)]
pub struct ComponentDecl<'a> {
    pub source: &'a Element,
    pub encoding: Encoding,
    /// Lower-cased element name; None degrades to passthrough
    pub name: Option<String>,
    /// Class tokens on the region (block encoding only), lower-cased
    pub marker_tokens: Vec<String>,
    /// `{name}-{n}`, assigned in document order
    pub identifier: Option<String>,
}

impl<'a> ComponentDecl<'a> {
    pub fn new(source: &'a Element, encoding: Encoding, config: &ConvertConfig) -> Self {
        let marker_tokens: Vec<String> = match encoding {
            Encoding::Block => source
                .class_list()
                .iter()
                .map(|token| token.to_ascii_lowercase())
                .collect(),
            Encoding::Table => Vec::new(),
        };
        let name = resolve_name(source, encoding, &marker_tokens, config);

        Self {
            source,
            encoding,
            name,
            marker_tokens,
            identifier: None,
        }
    }

    pub fn rows(&self) -> Vec<Row<'a>> {
        rows_of(self.source, self.encoding)
    }
}

/// Element name: an `element-name` row wins; block regions fall back to
/// the first hyphenated non-vanilla class token besides the generic
/// marker
fn resolve_name(
    source: &Element,
    encoding: Encoding,
    marker_tokens: &[String],
    config: &ConvertConfig,
) -> Option<String> {
    let named_row = rows_of(source, encoding)
        .into_iter()
        .find(|row| row.label_key().as_deref() == Some("element-name"))
        .map(|row| row.text().to_ascii_lowercase())
        .filter(|name| !name.is_empty());

    named_row.or_else(|| {
        marker_tokens
            .iter()
            .find(|token| {
                token.as_str() != GENERIC_MARKER
                    && token.contains('-')
                    && !config.is_vanilla(token.as_str())
            })
            .cloned()
    })
}

/// Classify an element as a region boundary, if it is one
pub fn region_encoding(el: &Element, config: &ConvertConfig) -> Option<Encoding> {
    if el.tag == "table" {
        return table_has_marker(el).then_some(Encoding::Table);
    }
    el.class_list()
        .iter()
        .any(|token| config.is_component_marker(token))
        .then_some(Encoding::Block)
}

/// Walk the document in order, collecting component regions without
/// descending into them
pub fn discover<'a>(doc: &'a Document, config: &ConvertConfig) -> Vec<ComponentDecl<'a>> {
    let mut decls = Vec::new();
    visit_children(&doc.children, config, &mut decls);
    debug!(count = decls.len(), "discovered component regions");
    decls
}

fn visit_children<'a>(
    children: &'a [Node],
    config: &ConvertConfig,
    decls: &mut Vec<ComponentDecl<'a>>,
) {
    for child in children {
        let Node::Element(el) = child else { continue };
        match region_encoding(el, config) {
            Some(encoding) => decls.push(ComponentDecl::new(el, encoding, config)),
            None => visit_children(&el.children, config, decls),
        }
    }
}

/// Assign `{name}-{n}` identifiers in document order. Idempotent:
/// reassigning an unchanged list yields identical identifiers.
pub fn assign_identifiers(decls: &mut [ComponentDecl]) {
    let mut counters: HashMap<String, usize> = HashMap::new();
    for decl in decls.iter_mut() {
        let Some(name) = &decl.name else {
            decl.identifier = None;
            continue;
        };
        let counter = counters.entry(name.clone()).or_insert(0);
        *counter += 1;
        decl.identifier = Some(format!("{}-{}", name, counter));
    }
}

/// Identifier → declaration index lookup
pub fn build_index(decls: &[ComponentDecl]) -> HashMap<String, usize> {
    decls
        .iter()
        .enumerate()
        .filter_map(|(idx, decl)| decl.identifier.clone().map(|id| (id, idx)))
        .collect()
}

/// Pick the conversion entry point:
/// 1. a sole component is the root
/// 2. otherwise the one identifier no component references
/// 3. several unreferenced → the last in document order
/// 4. none unreferenced → the last discovered overall
pub fn select_root(decls: &[ComponentDecl]) -> Option<usize> {
    if decls.is_empty() {
        return None;
    }
    if decls.len() == 1 {
        return Some(0);
    }

    let referenced: HashSet<String> = decls
        .iter()
        .flat_map(|decl| parse_references(&decl.source.text_content()))
        .collect();

    let unreferenced: Vec<usize> = decls
        .iter()
        .enumerate()
        .filter(|(_, decl)| {
            decl.identifier
                .as_ref()
                .is_some_and(|id| !referenced.contains(id))
        })
        .map(|(idx, _)| idx)
        .collect();

    let root = match unreferenced.as_slice() {
        [] => decls.len() - 1,
        [only] => *only,
        rest => rest[rest.len() - 1],
    };
    debug!(
        root = root,
        identifier = decls[root].identifier.as_deref().unwrap_or("<unnamed>"),
        "selected root component"
    );
    Some(root)
}
