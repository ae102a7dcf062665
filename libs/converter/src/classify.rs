//! Row classifier
//!
//! Decides once per row what the row encodes. The rules form a strict
//! precedence list; the first match wins:
//!
//! 1. `element-name` label - already consumed by discovery
//! 2. `style-*` label - style variable
//! 3. reference-only content - expand through the identifier index
//! 4. content already carries slot annotations - re-parent unchanged
//! 5. no label - unwrap content
//! 6. bolded label - force a slotted wrapper
//! 7. rich content - nested component or slotted markup
//! 8. anything else - plain attribute

use exmark_proto::dom::Element;

use crate::config::ConvertConfig;
use crate::discover::region_encoding;
use crate::refs::{is_reference_only, parse_references};
use crate::rows::{is_plain_paragraph, Encoding, Row};

/// What one row contributes to the output element
#[derive(Debug, Clone)]
pub enum RowKind<'a> {
    /// Consumed elsewhere, contributes nothing
    Skip,
    /// `--{name}: {value}` on the merged style attribute
    StyleVar { name: String, value: String },
    /// Expand identifiers into converted child elements
    References {
        slot: Option<String>,
        identifiers: Vec<String>,
    },
    /// Content children were pre-slotted upstream; re-parent unchanged
    PreSlotted,
    /// Unlabeled content; re-parent, optionally unwrapping a paragraph
    Unlabeled { unwrap_paragraph: bool },
    /// Bolded label: wrap content in an inline container with this slot
    ForcedSlot { slot: String },
    /// A component region nested inside the row content
    NestedComponent {
        slot: Option<String>,
        region: &'a Element,
        encoding: Encoding,
    },
    /// Rich markup content, cloned and slot-annotated
    SlotContent { slot: Option<String> },
    /// Plain text value
    Attribute { name: String, value: String },
}

/// The `children` label is a sentinel meaning "default slot": children
/// attach without a slot annotation
const DEFAULT_SLOT_LABEL: &str = "children";

pub fn classify_row<'a>(row: &Row<'a>, config: &ConvertConfig) -> RowKind<'a> {
    let label_key = row.label_key();

    // 1. element name was consumed during discovery
    if label_key.as_deref() == Some("element-name") {
        return RowKind::Skip;
    }

    // 2. style variable; the prefix matches case-insensitively but the
    // variable name keeps the authored spelling
    if let Some(var_name) = row.label.as_deref().and_then(strip_style_prefix) {
        return RowKind::StyleVar {
            name: var_name.to_string(),
            value: row.text(),
        };
    }

    // 3. reference-only row
    let text = row.content.text_content();
    let identifiers = parse_references(&text);
    if !identifiers.is_empty() && is_reference_only(&text) {
        let slot = row
            .label
            .clone()
            .filter(|_| label_key.as_deref() != Some(DEFAULT_SLOT_LABEL));
        return RowKind::References { slot, identifiers };
    }

    // 4. pre-slotted content
    if row
        .content
        .element_children()
        .any(|child| child.attr("slot").is_some())
    {
        return RowKind::PreSlotted;
    }

    // 5. unlabeled row
    if row.label.is_none() {
        return RowKind::Unlabeled {
            unwrap_paragraph: is_plain_paragraph(row.content),
        };
    }

    // 6. bolded label forces slot treatment
    if row.emphasized {
        return RowKind::ForcedSlot {
            slot: row.label.clone().unwrap_or_default(),
        };
    }

    // 7. rich content
    if row.content.has_element_children() && !is_plain_paragraph(row.content) {
        let slot = row.label.clone();
        if let Some((region, encoding)) = find_nested_region(row.content, config) {
            return RowKind::NestedComponent {
                slot,
                region,
                encoding,
            };
        }
        return RowKind::SlotContent { slot };
    }

    // 8. plain attribute; `attr-type` avoids colliding with the
    // component's own type indicator
    let name = match label_key.as_deref() {
        Some("attr-type") => "type".to_string(),
        _ => row.label.clone().unwrap_or_default(),
    };
    RowKind::Attribute {
        name,
        value: row.text(),
    }
}

fn strip_style_prefix(label: &str) -> Option<&str> {
    let prefix = label.get(.."style-".len())?;
    prefix
        .eq_ignore_ascii_case("style-")
        .then(|| &label["style-".len()..])
}

/// First component region nested inside a content cell, document order
fn find_nested_region<'a>(
    content: &'a Element,
    config: &ConvertConfig,
) -> Option<(&'a Element, Encoding)> {
    for child in content.element_children() {
        if let Some(encoding) = region_encoding(child, config) {
            return Some((child, encoding));
        }
        if let Some(found) = find_nested_region(child, config) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use exmark_parser::parse;
    use exmark_proto::dom::Node;

    fn cell(source: &str) -> Element {
        parse(source)
            .unwrap()
            .children
            .into_iter()
            .find_map(|node| match node {
                Node::Element(el) => Some(el),
                Node::Text(_) => None,
            })
            .expect("expected an element")
    }

    fn row<'a>(label: Option<&str>, content: &'a Element, emphasized: bool) -> Row<'a> {
        Row {
            label: label.map(str::to_string),
            content,
            emphasized,
        }
    }

    #[test]
    fn test_element_name_skipped() {
        let content = cell("<div>paywall-card</div>");
        let kind = classify_row(&row(Some("Element-Name"), &content, false), &ConvertConfig::default());
        assert!(matches!(kind, RowKind::Skip));
    }

    #[test]
    fn test_style_label_becomes_variable() {
        let content = cell("<div> #fff </div>");
        let kind = classify_row(
            &row(Some("style-bg-color"), &content, false),
            &ConvertConfig::default(),
        );
        match kind {
            RowKind::StyleVar { name, value } => {
                assert_eq!(name, "bg-color");
                assert_eq!(value, "#fff");
            }
            other => panic!("expected StyleVar, got {:?}", other),
        }
    }

    #[test]
    fn test_style_prefix_case_insensitive_name_keeps_spelling() {
        let content = cell("<div>#333</div>");
        let kind = classify_row(
            &row(Some("Style-BG-Color"), &content, false),
            &ConvertConfig::default(),
        );
        match kind {
            RowKind::StyleVar { name, value } => {
                assert_eq!(name, "BG-Color");
                assert_eq!(value, "#333");
            }
            other => panic!("expected StyleVar, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_only_row() {
        let content = cell("<div>→ ee-media-1, → ee-media-2</div>");
        let kind = classify_row(&row(Some("media"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::References { slot, identifiers } => {
                assert_eq!(slot.as_deref(), Some("media"));
                assert_eq!(identifiers, vec!["ee-media-1", "ee-media-2"]);
            }
            other => panic!("expected References, got {:?}", other),
        }
    }

    #[test]
    fn test_children_label_is_unslotted_sentinel() {
        let content = cell("<div>→ ee-media-1</div>");
        let kind = classify_row(&row(Some("Children"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::References { slot, .. } => assert_eq!(slot, None),
            other => panic!("expected References, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_text_and_reference_is_not_reference_row() {
        let content = cell("<div>see → ee-media-1</div>");
        let kind = classify_row(&row(Some("note"), &content, false), &ConvertConfig::default());
        assert!(matches!(kind, RowKind::Attribute { .. }));
    }

    #[test]
    fn test_pre_slotted_content() {
        let content = cell(r#"<div><span slot="title">Hi</span></div>"#);
        let kind = classify_row(&row(Some("title"), &content, false), &ConvertConfig::default());
        assert!(matches!(kind, RowKind::PreSlotted));
    }

    #[test]
    fn test_unlabeled_paragraph_unwraps() {
        let content = cell("<div><p>body text</p></div>");
        let kind = classify_row(&row(None, &content, false), &ConvertConfig::default());
        assert!(matches!(
            kind,
            RowKind::Unlabeled {
                unwrap_paragraph: true
            }
        ));
    }

    #[test]
    fn test_emphasized_label_forces_slot() {
        let content = cell("<div>Firefly Standard</div>");
        let kind = classify_row(&row(Some("plan-name"), &content, true), &ConvertConfig::default());
        match kind {
            RowKind::ForcedSlot { slot } => assert_eq!(slot, "plan-name"),
            other => panic!("expected ForcedSlot, got {:?}", other),
        }
    }

    #[test]
    fn test_rich_content_without_nested_component() {
        let content = cell(r#"<div><ul><li>a</li><li>b</li></ul></div>"#);
        let kind = classify_row(&row(Some("items"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::SlotContent { slot } => assert_eq!(slot.as_deref(), Some("items")),
            other => panic!("expected SlotContent, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_component_detected() {
        let content = cell(r#"<div><div class="ee-media"><div><div>src</div><div>a.png</div></div></div></div>"#);
        let kind = classify_row(&row(Some("media"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::NestedComponent { slot, region, encoding } => {
                assert_eq!(slot.as_deref(), Some("media"));
                assert_eq!(region.class_list(), vec!["ee-media"]);
                assert_eq!(encoding, Encoding::Block);
            }
            other => panic!("expected NestedComponent, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_becomes_attribute() {
        let content = cell("<div> Firefly Standard </div>");
        let kind = classify_row(&row(Some("plan-name"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::Attribute { name, value } => {
                assert_eq!(name, "plan-name");
                assert_eq!(value, "Firefly Standard");
            }
            other => panic!("expected Attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_attr_type_remapped() {
        let content = cell("<div>promo</div>");
        let kind = classify_row(&row(Some("attr-type"), &content, false), &ConvertConfig::default());
        match kind {
            RowKind::Attribute { name, value } => {
                assert_eq!(name, "type");
                assert_eq!(value, "promo");
            }
            other => panic!("expected Attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_wrapped_text_with_label_is_attribute() {
        let content = cell("<div><p>Firefly Standard</p></div>");
        let kind = classify_row(&row(Some("plan-name"), &content, false), &ConvertConfig::default());
        assert!(matches!(kind, RowKind::Attribute { .. }));
    }
}
