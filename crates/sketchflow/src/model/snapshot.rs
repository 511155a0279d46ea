//! Point-in-time copies of the Diagram Model.

use serde::{Deserialize, Serialize};

use super::{Viewport, edge::Edge, node::Node};

/// An immutable copy of the nodes, edges and viewport.
///
/// This is the structured snapshot file format:
/// `{ "nodes": [...], "edges": [...], "viewport": {"x", "y", "zoom"} }`.
/// Missing arrays and a missing viewport take empty and identity defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    viewport: Viewport,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, viewport: Viewport) -> Self {
        Self {
            nodes,
            edges,
            viewport,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub(crate) fn into_parts(self) -> (Vec<Node>, Vec<Edge>, Viewport) {
        (self.nodes, self.edges, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.nodes().is_empty());
        assert!(snapshot.edges().is_empty());
        assert_eq!(snapshot.viewport().zoom(), 1.0);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_string(&Snapshot::default()).unwrap();
        assert_eq!(
            json,
            r#"{"nodes":[],"edges":[],"viewport":{"x":0.0,"y":0.0,"zoom":1.0}}"#
        );
    }
}
