//! Marker classification configuration
//!
//! Deciding whether a class token or table marker names a component is
//! pure data: the generic marker always does, and any hyphenated token
//! does unless the allow-list says it is a vanilla formatting class.

use std::collections::HashSet;

/// The generic class token / table marker that always denotes a
/// component region, independent of the element name
pub const GENERIC_MARKER: &str = "experience-element";

/// Formatting class tokens that contain hyphens but never denote a
/// component. Authoring templates emit these on ordinary rich text.
const DEFAULT_VANILLA_TAGS: &[&str] = &[
    "sub-heading",
    "pull-quote",
    "drop-cap",
    "small-caps",
    "block-quote",
    "code-block",
    "image-caption",
    "text-align-left",
    "text-align-center",
    "text-align-right",
    "line-through",
];

/// Read-only conversion configuration. Shared freely across calls;
/// all per-call state lives in the conversion context.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    vanilla_tags: HashSet<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            vanilla_tags: DEFAULT_VANILLA_TAGS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}

impl ConvertConfig {
    /// Build a config with a caller-supplied vanilla allow-list
    pub fn with_vanilla_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vanilla_tags: tags
                .into_iter()
                .map(|tag| tag.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Add one vanilla tag to the allow-list
    pub fn allow(&mut self, tag: impl Into<String>) {
        self.vanilla_tags.insert(tag.into().to_ascii_lowercase());
    }

    pub fn is_vanilla(&self, name: &str) -> bool {
        self.vanilla_tags.contains(&name.to_ascii_lowercase())
    }

    /// True when `name` marks a component region: the generic marker,
    /// or any hyphenated token outside the vanilla allow-list
    pub fn is_component_marker(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        name == GENERIC_MARKER || (name.contains('-') && !self.vanilla_tags.contains(&name))
    }
}
