//! The Diagram Model.
//!
//! [`Diagram`] owns every [`Node`] and [`Edge`] together with the
//! [`Viewport`]. All mutations go through its methods, which keep ids unique
//! and every edge attached to two existing nodes. Readers work from a
//! [`Snapshot`].

mod diagram;
mod edge;
mod ids;
mod node;
mod patch;
mod snapshot;
mod viewport;

pub use diagram::{Diagram, InsertedFragment, LabelUpdate, Removal};
pub use edge::{DEFAULT_EDGE_COLOR, DEFAULT_EDGE_WIDTH, Edge, EdgeData};
pub use ids::IdAllocator;
pub use node::{
    DEFAULT_BORDER_RADIUS, DEFAULT_BORDER_WIDTH, DEFAULT_FONT_SIZE, DEFAULT_OPACITY,
    DEFAULT_ROTATION, Node, NodeData,
};
pub use patch::{EdgeStylePatch, NodeStylePatch};
pub use snapshot::Snapshot;
pub use viewport::Viewport;
