//! Drag-to-connect.
//!
//! A pointer-down on a source anchor starts a [`ConnectionDrag`]. While it is
//! active the floating end follows the pointer and a preview path is
//! available. Releasing over an anchor connects; releasing anywhere else
//! aborts without touching the model.

use sketchflow_core::{
    edge_path::{self, EdgePath, PathType},
    geometry::Point,
    identifier::Id,
    shape::AnchorId,
};

/// Where a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// An edge with this id was added.
    Connected(Id),
    /// The drag ended without creating an edge.
    Aborted(AbortReason),
}

/// Why a connection drag was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Released away from every anchor.
    NoTarget,
    /// Released on the source node while self-loops are rejected.
    SelfLoop,
    /// The source or target node no longer exists.
    MissingNode,
    /// No connection drag was active.
    NotDragging,
}

/// An in-progress connection from a source anchor to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionDrag {
    source: Id,
    source_anchor: AnchorId,
    origin: Point,
    pointer: Point,
}

impl ConnectionDrag {
    /// Starts a drag at `origin`, the source anchor in diagram space.
    pub fn new(source: Id, source_anchor: AnchorId, origin: Point) -> Self {
        Self {
            source,
            source_anchor,
            origin,
            pointer: origin,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn source_anchor(&self) -> AnchorId {
        self.source_anchor
    }

    /// The source anchor position in diagram space
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The floating endpoint in diagram space
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn update(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// The connection line drawn while dragging.
    ///
    /// Uses smoothstep routing and enters the pointer from the side facing
    /// the source anchor.
    pub fn preview_path(&self) -> EdgePath {
        let side = self.source_anchor.side();
        edge_path::compute_path(
            PathType::Smoothstep,
            self.origin,
            side,
            self.pointer,
            side.opposite(),
        )
    }
}
