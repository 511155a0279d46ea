//! Drawing layer: turns shape geometry and edge routes into layered SVG.
//!
//! Everything here implements or supports [`Drawable`], which renders into a
//! [`LayeredOutput`] so callers can combine nodes, edges and labels in any
//! order and still get edges beneath nodes and labels on top.

mod edge;
mod layer;
mod shape;
mod stroke;
mod text;

pub use edge::{EdgeDefinition, EdgeDrawer, MarkerKind};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{Shape, ShapeDefinition, ShapeWithText};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{FontWeight, Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can render itself into layered SVG.
pub trait Drawable: std::fmt::Debug {
    /// Renders at `position`. What the position denotes (center or top-left)
    /// is up to the implementor.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The footprint of the drawable.
    fn size(&self) -> Size;
}
