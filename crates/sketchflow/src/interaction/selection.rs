//! Selected node and edge ids.

use indexmap::IndexSet;

use sketchflow_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::model::{Diagram, Viewport};

/// The current selection, in the order entities were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: IndexSet<Id>,
    edges: IndexSet<Id>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes.iter().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = Id> + '_ {
        self.edges.iter().copied()
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_edge(&self, id: Id) -> bool {
        self.edges.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Selects a node. Without `additive` the previous selection is replaced.
    pub fn select_node(&mut self, id: Id, additive: bool) {
        if !additive {
            self.clear();
        }
        self.nodes.insert(id);
    }

    /// Selects an edge. Without `additive` the previous selection is replaced.
    pub fn select_edge(&mut self, id: Id, additive: bool) {
        if !additive {
            self.clear();
        }
        self.edges.insert(id);
    }

    /// Flips a node's membership, as on modifier-click.
    pub fn toggle_node(&mut self, id: Id) {
        if !self.nodes.shift_remove(&id) {
            self.nodes.insert(id);
        }
    }

    /// Flips an edge's membership, as on modifier-click.
    pub fn toggle_edge(&mut self, id: Id) {
        if !self.edges.shift_remove(&id) {
            self.edges.insert(id);
        }
    }

    pub fn extend_nodes(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.nodes.extend(ids);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Drops ids that no longer exist in `diagram`.
    pub(crate) fn retain_existing(&mut self, diagram: &Diagram) {
        self.nodes.retain(|id| diagram.contains_node(*id));
        self.edges.retain(|id| diagram.contains_edge(*id));
    }
}

/// A rubber-band rectangle dragged in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    origin: Point,
    current: Point,
    additive: bool,
}

impl Marquee {
    /// Starts a marquee at `origin`. An `additive` marquee extends the
    /// existing selection instead of replacing it.
    pub fn new(origin: Point, additive: bool) -> Self {
        Self {
            origin,
            current: origin,
            additive,
        }
    }

    pub fn update(&mut self, pointer: Point) {
        self.current = pointer;
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }

    /// The rectangle in screen space
    pub fn screen_bounds(&self) -> Bounds {
        Bounds::from_corners(self.origin, self.current)
    }

    /// The rectangle mapped into diagram space
    pub fn diagram_bounds(&self, viewport: &Viewport) -> Bounds {
        Bounds::from_corners(
            viewport.screen_to_diagram(self.origin),
            viewport.screen_to_diagram(self.current),
        )
    }

    /// Nodes whose footprint intersects the rectangle, in paint order.
    pub fn hits(&self, diagram: &Diagram) -> Vec<Id> {
        let area = self.diagram_bounds(diagram.viewport());
        diagram
            .nodes()
            .filter(|node| node.footprint().intersects(&area))
            .map(|node| node.id())
            .collect()
    }
}
