//! The Diagram Model: nodes, edges and the viewport.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use sketchflow_core::{geometry::Point, identifier::Id};

use super::{
    EdgeStylePatch, IdAllocator, NodeStylePatch, Snapshot, Viewport,
    edge::Edge,
    node::{Node, NodeData},
};
use crate::{config::ViewportConfig, error::ModelError};

/// Result of a label update that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelUpdate {
    /// The trimmed text replaced the previous label.
    Applied,
    /// The text was empty after trimming; the previous label was kept.
    Discarded,
}

/// The ids actually removed by [`Diagram::remove_entities`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    nodes: Vec<Id>,
    edges: Vec<Id>,
}

impl Removal {
    pub fn nodes(&self) -> &[Id] {
        &self.nodes
    }

    /// Removed edges, both requested and cascaded
    pub fn edges(&self) -> &[Id] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Ids assigned to the entities of an inserted fragment, in fragment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertedFragment {
    nodes: Vec<Id>,
    edges: Vec<Id>,
}

impl InsertedFragment {
    pub fn nodes(&self) -> &[Id] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Id] {
        &self.edges
    }
}

/// The canonical set of nodes and edges plus the current viewport.
///
/// Every edge references two existing nodes at all times. Node and edge ids
/// are unique within their own set. Iteration follows insertion order, which
/// is also the paint order of nodes.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: IndexMap<Id, Node>,
    edges: IndexMap<Id, Edge>,
    viewport: Viewport,
    ids: IdAllocator,
}

impl Diagram {
    /// Creates an empty diagram with the given zoom limits.
    pub fn new(limits: ViewportConfig) -> Self {
        Self {
            viewport: Viewport::default().with_limits(limits),
            ..Self::default()
        }
    }

    /// Builds a diagram from a snapshot, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if two nodes or two edges share an
    /// id and [`ModelError::InvalidReference`] if an edge names a missing
    /// node. Nothing is partially imported.
    pub fn from_snapshot(snapshot: Snapshot, limits: ViewportConfig) -> Result<Self, ModelError> {
        let (nodes, edges, viewport) = snapshot.into_parts();
        let mut diagram = Self::new(limits);
        diagram.viewport = viewport.with_limits(limits);

        for node in nodes {
            diagram.add_node(node)?;
        }
        for edge in edges {
            diagram.add_edge(edge)?;
        }

        debug!(
            nodes = diagram.node_count(),
            edges = diagram.edge_count();
            "Diagram loaded from snapshot"
        );
        Ok(diagram)
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: Id) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, id: Id) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl DoubleEndedIterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Allocates a node id that is not in use.
    pub fn next_node_id(&mut self) -> Id {
        let nodes = &self.nodes;
        self.ids.node_id(|id| nodes.contains_key(&id))
    }

    /// Allocates an edge id for `source -> target` that is not in use.
    pub fn next_edge_id(&self, source: Id, target: Id) -> Id {
        self.ids
            .edge_id(source, target, |id| self.edges.contains_key(&id))
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if the id is already used by a node.
    pub fn add_node(&mut self, node: Node) -> Result<Id, ModelError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(ModelError::DuplicateId(id));
        }
        self.nodes.insert(id, node);
        debug!(node_id:% = id; "Node added");
        Ok(id)
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidReference`] if either endpoint is missing
    /// and [`ModelError::DuplicateId`] if the id is already used by an edge.
    /// The model is unchanged on error.
    pub fn add_edge(&mut self, edge: Edge) -> Result<Id, ModelError> {
        let id = edge.id();
        if let Some(missing) = [edge.source(), edge.target()]
            .into_iter()
            .find(|node_id| !self.nodes.contains_key(node_id))
        {
            warn!(edge_id:% = id, node_id:% = missing; "Rejected edge with missing endpoint");
            return Err(ModelError::InvalidReference {
                edge_id: id,
                node_id: missing,
            });
        }
        if self.edges.contains_key(&id) {
            return Err(ModelError::DuplicateId(id));
        }
        debug!(
            edge_id:% = id,
            source:% = edge.source(),
            target:% = edge.target();
            "Edge added"
        );
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Replaces a node's label with the trimmed `text`.
    ///
    /// Empty or whitespace-only text is discarded and the previous label kept.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn update_node_label(&mut self, id: Id, text: &str) -> Result<LabelUpdate, ModelError> {
        let node = self.nodes.get_mut(&id).ok_or(ModelError::UnknownNode(id))?;
        let text = text.trim();
        if text.is_empty() {
            debug!(node_id:% = id; "Discarded empty node label");
            return Ok(LabelUpdate::Discarded);
        }
        node.data_mut().set_label(text.to_string());
        debug!(node_id:% = id, label = text; "Node label updated");
        Ok(LabelUpdate::Applied)
    }

    /// Replaces an edge's label with the trimmed `text`, with the same
    /// discard rule as [`Diagram::update_node_label`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEdge`] if the edge does not exist.
    pub fn update_edge_label(&mut self, id: Id, text: &str) -> Result<LabelUpdate, ModelError> {
        let edge = self.edges.get_mut(&id).ok_or(ModelError::UnknownEdge(id))?;
        let text = text.trim();
        if text.is_empty() {
            debug!(edge_id:% = id; "Discarded empty edge label");
            return Ok(LabelUpdate::Discarded);
        }
        edge.data_mut().set_label(text.to_string());
        debug!(edge_id:% = id, label = text; "Edge label updated");
        Ok(LabelUpdate::Applied)
    }

    /// Moves a node's top-left corner to `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn move_node(&mut self, id: Id, position: Point) -> Result<(), ModelError> {
        let node = self.nodes.get_mut(&id).ok_or(ModelError::UnknownNode(id))?;
        node.set_position(position);
        trace!(node_id:% = id, position:?; "Node moved");
        Ok(())
    }

    /// Applies a style patch to a node.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn update_node_style(&mut self, id: Id, patch: &NodeStylePatch) -> Result<(), ModelError> {
        let node = self.nodes.get_mut(&id).ok_or(ModelError::UnknownNode(id))?;
        patch.apply(node.data_mut());
        debug!(node_id:% = id; "Node style updated");
        Ok(())
    }

    /// Applies a style patch to an edge.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEdge`] if the edge does not exist.
    pub fn update_edge_style(&mut self, id: Id, patch: &EdgeStylePatch) -> Result<(), ModelError> {
        let edge = self.edges.get_mut(&id).ok_or(ModelError::UnknownEdge(id))?;
        patch.apply(edge.data_mut());
        debug!(edge_id:% = id; "Edge style updated");
        Ok(())
    }

    /// Removes the given nodes and edges plus every edge touching a removed
    /// node, in one step.
    ///
    /// Ids that do not exist are ignored. Runs in O(N + E).
    pub fn remove_entities(&mut self, node_ids: &[Id], edge_ids: &[Id]) -> Removal {
        let doomed_nodes: HashSet<Id> = node_ids
            .iter()
            .copied()
            .filter(|id| self.nodes.contains_key(id))
            .collect();
        let requested_edges: HashSet<Id> = edge_ids.iter().copied().collect();

        let mut removal = Removal::default();
        self.edges.retain(|id, edge| {
            let doomed = requested_edges.contains(id)
                || doomed_nodes.contains(&edge.source())
                || doomed_nodes.contains(&edge.target());
            if doomed {
                removal.edges.push(*id);
            }
            !doomed
        });
        self.nodes.retain(|id, _| {
            let doomed = doomed_nodes.contains(id);
            if doomed {
                removal.nodes.push(*id);
            }
            !doomed
        });

        if !removal.is_empty() {
            debug!(
                nodes = removal.nodes.len(),
                edges = removal.edges.len();
                "Entities removed"
            );
        }
        removal
    }

    /// Inserts a fragment with fresh ids, shifting node positions by
    /// `offset` and remapping edge endpoints to the new node ids.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidReference`] if a fragment edge names a
    /// node outside the fragment. The diagram is unchanged on error.
    pub fn insert_fragment(
        &mut self,
        fragment: &Snapshot,
        offset: Point,
    ) -> Result<InsertedFragment, ModelError> {
        let fragment_nodes: HashSet<Id> = fragment.nodes().iter().map(Node::id).collect();
        if let Some((edge, missing)) = fragment.edges().iter().find_map(|edge| {
            [edge.source(), edge.target()]
                .into_iter()
                .find(|id| !fragment_nodes.contains(id))
                .map(|missing| (edge, missing))
        }) {
            warn!(edge_id:% = edge.id(), node_id:% = missing; "Rejected fragment with dangling edge");
            return Err(ModelError::InvalidReference {
                edge_id: edge.id(),
                node_id: missing,
            });
        }

        let mut inserted = InsertedFragment::default();
        let mut remap: HashMap<Id, Id> = HashMap::new();
        for node in fragment.nodes() {
            if remap.contains_key(&node.id()) {
                continue;
            }
            let id = self.next_node_id();
            let mut node = node.clone();
            remap.insert(node.id(), id);
            node.set_id(id);
            node.set_position(node.position().add_point(offset));
            self.nodes.insert(id, node);
            inserted.nodes.push(id);
        }

        for edge in fragment.edges() {
            let (Some(&source), Some(&target)) = (remap.get(&edge.source()), remap.get(&edge.target()))
            else {
                continue;
            };
            let id = self.next_edge_id(source, target);
            let mut edge = edge.clone();
            edge.set_id(id);
            edge.set_endpoints(source, target);
            self.edges.insert(id, edge);
            inserted.edges.push(id);
        }

        debug!(
            nodes = inserted.nodes.len(),
            edges = inserted.edges.len();
            "Fragment inserted"
        );
        Ok(inserted)
    }

    /// Creates and adds a node at `position` with a fresh id.
    pub fn create_node(&mut self, position: Point, data: NodeData) -> Id {
        let id = self.next_node_id();
        self.nodes.insert(id, Node::new(id, position, data));
        debug!(node_id:% = id; "Node created");
        id
    }

    /// An immutable copy of the current nodes, edges and viewport.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.nodes.values().cloned().collect(),
            self.edges.values().cloned().collect(),
            self.viewport,
        )
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::EdgeData;
    use sketchflow_core::shape::ShapeKind;

    #[derive(Debug, Clone)]
    enum Op {
        AddNode(u8),
        AddEdge(u8, u8),
        Remove(Vec<u8>, Vec<u8>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8).prop_map(Op::AddNode),
            (0u8..8, 0u8..8).prop_map(|(s, t)| Op::AddEdge(s, t)),
            (
                prop::collection::vec(0u8..8, 0..3),
                prop::collection::vec(0u8..16, 0..3)
            )
                .prop_map(|(n, e)| Op::Remove(n, e)),
        ]
    }

    fn node_id(n: u8) -> Id {
        Id::new(&format!("n{n}"))
    }

    fn edge_id(n: u8) -> Id {
        Id::new(&format!("e{n}"))
    }

    fn check_referential_integrity(diagram: &Diagram) {
        let snapshot = diagram.snapshot();
        let nodes: HashSet<Id> = snapshot.nodes().iter().map(Node::id).collect();
        for edge in snapshot.edges() {
            assert!(nodes.contains(&edge.source()), "dangling source");
            assert!(nodes.contains(&edge.target()), "dangling target");
        }
    }

    proptest! {
        #[test]
        fn prop_referential_integrity(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut diagram = Diagram::default();
            let mut next_edge = 0u8;
            for op in ops {
                match op {
                    Op::AddNode(n) => {
                        let _ = diagram.add_node(Node::new(
                            node_id(n),
                            Point::default(),
                            NodeData::for_kind(ShapeKind::Circle, "n"),
                        ));
                    }
                    Op::AddEdge(s, t) => {
                        let id = edge_id(next_edge % 16);
                        next_edge = next_edge.wrapping_add(1);
                        let _ = diagram.add_edge(Edge::new(
                            id,
                            node_id(s),
                            node_id(t),
                            EdgeData::new(),
                        ));
                    }
                    Op::Remove(nodes, edges) => {
                        let nodes: Vec<Id> = nodes.into_iter().map(node_id).collect();
                        let edges: Vec<Id> = edges.into_iter().map(edge_id).collect();
                        diagram.remove_entities(&nodes, &edges);
                    }
                }
                check_referential_integrity(&diagram);
            }
        }
    }
}
