//! Mount points declared by a host screen.

use std::collections::HashSet;

/// The set of container ids a host page offers for tables.
///
/// A table can only be constructed into a declared container.
#[derive(Debug, Clone, Default)]
pub struct MountPoints {
    ids: HashSet<String>,
}

impl MountPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`declare`](Self::declare).
    pub fn with(mut self, id: impl Into<String>) -> Self {
        self.declare(id);
        self
    }

    pub fn declare(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}
