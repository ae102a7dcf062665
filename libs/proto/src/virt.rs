//! Virtual element definitions for converted output
//!
//! This is what the converter produces - a normalized custom-element tree
//! that can be:
//! 1. Serialized back into markup text for splicing into a page
//! 2. Handed to an embedder as an in-memory structure

use crate::dom;
use serde::{Deserialize, Serialize};

/// Virtual output node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VNode {
    Element(VElement),
    Text(String),
    Fragment(Vec<VNode>),
}

/// Converted element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VElement {
    /// Lower-cased element name
    pub tag: String,

    /// Plain attributes, insertion order
    pub attributes: Vec<(String, String)>,

    /// Style variables, first-seen order; serialized into one `style`
    /// attribute as `--name: value` pairs joined by `; `
    pub style_vars: Vec<(String, String)>,

    /// Named insertion point on the parent, if any
    pub slot: Option<String>,

    /// Child nodes
    pub children: Vec<VNode>,
}

impl VNode {
    /// Clone a parsed subtree into the output model unchanged. Used for
    /// every passthrough path (no components, nameless component,
    /// pre-slotted content, reference cycles).
    pub fn from_dom(node: &dom::Node) -> VNode {
        match node {
            dom::Node::Text(text) => VNode::Text(text.clone()),
            dom::Node::Element(el) => VNode::Element(VElement::from_dom(el)),
        }
    }

    /// Annotate this node with a slot name, if it can carry one.
    /// Text and fragments cannot; they are attached unannotated.
    pub fn set_slot(&mut self, slot: &str) {
        if let VNode::Element(el) = self {
            el.slot = Some(slot.to_string());
        }
    }
}

impl VElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            style_vars: Vec::new(),
            slot: None,
            children: Vec::new(),
        }
    }

    pub fn from_dom(el: &dom::Element) -> VElement {
        VElement {
            tag: el.tag.clone(),
            attributes: el.attributes.clone(),
            style_vars: Vec::new(),
            slot: None,
            children: el.children.iter().map(VNode::from_dom).collect(),
        }
    }

    /// Set an attribute, replacing any previous value for the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Record a style variable. Last write wins; the variable keeps the
    /// position of its first occurrence.
    pub fn set_style_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.style_vars.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.style_vars.push((name, value));
        }
    }

    /// Merged `style` attribute value, or None when no variables were set
    pub fn style_attribute(&self) -> Option<String> {
        if self.style_vars.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .style_vars
            .iter()
            .map(|(name, value)| format!("--{}: {}", name, value))
            .collect();
        Some(pairs.join("; "))
    }
}
