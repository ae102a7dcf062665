//! Markup serializer for the output element tree

use exmark_proto::virt::{VElement, VNode};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize a converted node to markup text
pub fn serialize(node: &VNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &VNode) {
    match node {
        VNode::Text(text) => out.push_str(&escape_text(text)),
        VNode::Fragment(children) => {
            for child in children {
                write_node(out, child);
            }
        }
        VNode::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &VElement) {
    out.push('<');
    out.push_str(&el.tag);

    for (name, value) in &el.attributes {
        // the merged style attribute and the slot annotation win over
        // plain attributes of the same name
        if name == "style" && !el.style_vars.is_empty() {
            continue;
        }
        if name == "slot" && el.slot.is_some() {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }

    if let Some(style) = el.style_attribute() {
        out.push_str(" style=\"");
        out.push_str(&escape_attr(&style));
        out.push('"');
    }

    if let Some(slot) = &el.slot {
        out.push_str(" slot=\"");
        out.push_str(&escape_attr(slot));
        out.push('"');
    }

    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }

    for child in &el.children {
        write_node(out, child);
    }

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
