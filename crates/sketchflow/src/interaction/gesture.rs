//! Modal pointer gestures.
//!
//! At most one gesture runs at a time. Starting another while one is active
//! is rejected with [`InteractionError::GestureConflict`](crate::InteractionError).

use std::fmt;

use sketchflow_core::{geometry::Point, identifier::Id};

use super::{connection::ConnectionDrag, selection::Marquee};

/// The active gesture and its state.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Connection(ConnectionDrag),
    Marquee(Marquee),
    /// A palette item is being dragged; carries the shape token.
    ShapeDrag(String),
    NodeDrag(NodeDrag),
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Connection(_) => GestureKind::Connection,
            Self::Marquee(_) => GestureKind::Marquee,
            Self::ShapeDrag(_) => GestureKind::ShapeDrag,
            Self::NodeDrag(_) => GestureKind::NodeDrag,
        }
    }
}

/// Names a gesture without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Connection,
    Marquee,
    ShapeDrag,
    NodeDrag,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connection => "connection drag",
            Self::Marquee => "marquee selection",
            Self::ShapeDrag => "shape drag",
            Self::NodeDrag => "node drag",
        })
    }
}

/// A node being moved with the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDrag {
    node: Id,
    grab_offset: Point,
}

impl NodeDrag {
    /// `grab_offset` is the pointer position relative to the node's
    /// top-left corner, in diagram space.
    pub fn new(node: Id, grab_offset: Point) -> Self {
        Self { node, grab_offset }
    }

    pub fn node(&self) -> Id {
        self.node
    }

    /// The node position that keeps the grab point under `pointer`.
    pub fn position_for(&self, pointer: Point) -> Point {
        pointer.sub_point(self.grab_offset)
    }
}
