//! Experience markup data model
//!
//! This crate defines the core data structures for:
//! - The parsed input document tree (block or table encoding)
//! - The converted virtual element tree (tags, attributes, slots, style vars)

pub mod dom;
pub mod virt;

pub use dom::*;
pub use virt::*;
