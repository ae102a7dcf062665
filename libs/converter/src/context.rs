//! Per-call conversion state
//!
//! One context is built fresh for every top-level conversion; nothing
//! in here outlives the call. Concurrent conversions each own their
//! context, so identifier counters never cross-talk.

use std::collections::HashMap;

use crate::config::ConvertConfig;
use crate::discover::ComponentDecl;

pub struct ConvertContext<'a> {
    pub config: &'a ConvertConfig,
    /// Discovered components in document order, identifiers assigned
    pub decls: Vec<ComponentDecl<'a>>,
    /// Identifier → decl index
    pub index: HashMap<String, usize>,
    /// Decl indices currently being assembled; a reference back into
    /// this set is a cycle and degrades to a passthrough copy
    in_progress: Vec<usize>,
}

impl<'a> ConvertContext<'a> {
    pub fn new(
        config: &'a ConvertConfig,
        decls: Vec<ComponentDecl<'a>>,
        index: HashMap<String, usize>,
    ) -> Self {
        Self {
            config,
            decls,
            index,
            in_progress: Vec::new(),
        }
    }

    pub fn resolve(&self, identifier: &str) -> Option<usize> {
        self.index.get(identifier).copied()
    }

    pub fn is_in_progress(&self, idx: usize) -> bool {
        self.in_progress.contains(&idx)
    }

    pub fn enter(&mut self, idx: usize) {
        self.in_progress.push(idx);
    }

    pub fn leave(&mut self, idx: usize) {
        if let Some(pos) = self.in_progress.iter().rposition(|&i| i == idx) {
            self.in_progress.remove(pos);
        }
    }
}
