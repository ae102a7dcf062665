//! Element assembler
//!
//! Walks a component's rows through the classifier and materializes the
//! output element: tag from the element name, leftover marker tokens as
//! boolean attributes, style variables merged into one attribute, and
//! children attached with their slot annotations. Recurses through the
//! reference resolver and into nested components.

use exmark_proto::dom::Node;
use exmark_proto::virt::{VElement, VNode};
use tracing::debug;

use crate::classify::{classify_row, RowKind};
use crate::config::GENERIC_MARKER;
use crate::context::ConvertContext;
use crate::discover::ComponentDecl;
use crate::ConversionResult;

/// Convert a discovered component by index, guarding against reference
/// cycles
pub fn convert_decl(ctx: &mut ConvertContext<'_>, idx: usize) -> ConversionResult {
    if ctx.is_in_progress(idx) {
        debug!(idx, "reference cycle; emitting passthrough copy");
        let source = ctx.decls[idx].source;
        return ConversionResult::Passthrough(VNode::Element(VElement::from_dom(source)));
    }

    let decl = ctx.decls[idx].clone();
    ctx.enter(idx);
    let result = assemble(ctx, &decl);
    ctx.leave(idx);
    result
}

/// Convert a component declaration that may or may not be registered in
/// the index (nested regions inside row content are not)
pub fn assemble(ctx: &mut ConvertContext<'_>, decl: &ComponentDecl<'_>) -> ConversionResult {
    let Some(name) = &decl.name else {
        // no resolvable element name: defined degraded path
        return ConversionResult::Passthrough(VNode::Element(VElement::from_dom(decl.source)));
    };

    let mut element = VElement::new(name.clone());

    // leftover marker tokens become boolean variant-flag attributes
    for token in &decl.marker_tokens {
        if token != GENERIC_MARKER && token != name {
            element.set_attribute(token.clone(), "");
        }
    }

    for row in decl.rows() {
        match classify_row(&row, ctx.config) {
            RowKind::Skip => {}
            RowKind::StyleVar { name, value } => {
                element.set_style_var(name, value);
            }
            RowKind::References { slot, identifiers } => {
                for identifier in identifiers {
                    let Some(target) = ctx.resolve(&identifier) else {
                        // missing references are dropped, not errors
                        debug!(identifier = %identifier, "unresolved reference dropped");
                        continue;
                    };
                    let mut child = convert_decl(ctx, target).into_node();
                    if let Some(slot) = &slot {
                        child.set_slot(slot);
                    }
                    element.children.push(child);
                }
            }
            RowKind::PreSlotted => {
                // content was slotted upstream; re-parent unchanged
                for child in &row.content.children {
                    element.children.push(VNode::from_dom(child));
                }
            }
            RowKind::Unlabeled { unwrap_paragraph } => {
                let source_children = if unwrap_paragraph {
                    match row.content.element_children().next() {
                        Some(wrapper) => &wrapper.children,
                        None => &row.content.children,
                    }
                } else {
                    &row.content.children
                };
                for child in source_children {
                    element.children.push(VNode::from_dom(child));
                }
            }
            RowKind::ForcedSlot { slot } => {
                let mut span = VElement::new("span");
                span.slot = Some(slot);
                span.children = row
                    .content
                    .children
                    .iter()
                    .map(VNode::from_dom)
                    .collect();
                element.children.push(VNode::Element(span));
            }
            RowKind::NestedComponent {
                slot,
                region,
                encoding,
            } => {
                let nested = ComponentDecl::new(region, encoding, ctx.config);
                let mut child = assemble(ctx, &nested).into_node();
                if let Some(slot) = &slot {
                    child.set_slot(slot);
                }
                element.children.push(child);
            }
            RowKind::SlotContent { slot } => {
                for child in &row.content.children {
                    if child.is_blank_text() {
                        continue;
                    }
                    let mut copied = VNode::from_dom(child);
                    if let Some(slot) = &slot {
                        copied.set_slot(slot);
                    }
                    element.children.push(copied);
                }
            }
            RowKind::Attribute { name, value } => {
                element.set_attribute(name, value);
            }
        }
    }

    ConversionResult::Converted(VNode::Element(element))
}

/// Passthrough for documents with no discoverable components
pub fn passthrough_document(children: &[Node]) -> ConversionResult {
    ConversionResult::Passthrough(VNode::Fragment(
        children.iter().map(VNode::from_dom).collect(),
    ))
}
