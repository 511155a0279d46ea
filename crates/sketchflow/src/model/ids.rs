//! Fresh id allocation for nodes and edges.

use sketchflow_core::identifier::Id;

/// Hands out ids that are not yet taken.
///
/// Node ids are `node_<n>` with a monotonically increasing counter. Edge ids
/// are `e<source>-<target>`, disambiguated with a numeric suffix when the
/// pair is connected more than once.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_node: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next free `node_<n>` id.
    pub fn node_id(&mut self, is_taken: impl Fn(Id) -> bool) -> Id {
        loop {
            self.next_node += 1;
            let id = Id::new(&format!("node_{}", self.next_node));
            if !is_taken(id) {
                return id;
            }
        }
    }

    /// Returns a free edge id for `source -> target`.
    pub fn edge_id(&self, source: Id, target: Id, is_taken: impl Fn(Id) -> bool) -> Id {
        let base = Id::new(&format!("e{source}-{target}"));
        if !is_taken(base) {
            return base;
        }
        (1..)
            .map(|n| base.with_suffix(n))
            .find(|id| !is_taken(*id))
            .unwrap_or(base)
    }
}
