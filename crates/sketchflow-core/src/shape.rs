//! Shape geometry renderer.
//!
//! Turns an abstract shape kind and a size into a concrete [`Outline`] plus a
//! fixed set of connection [`Anchors`], all in local coordinates with the
//! origin at the top-left corner of the shape's box.
//!
//! Rendering is pure and total: every kind, including tags that name no known
//! kind, yields a geometry. Dispatch goes through a [`ShapeRegistry`] strategy
//! table that is validated to cover every [`ShapeKind`] when it is built.
//!
//! # Example
//!
//! ```
//! # use sketchflow_core::shape::{render_shape, ShapeKind, ShapeStyle, AnchorId};
//! # use sketchflow_core::geometry::{Point, Size};
//! let geometry = render_shape(ShapeKind::Circle, Size::new(120.0, 80.0), &ShapeStyle::default());
//!
//! // Circles force a 1:1 box
//! assert_eq!(geometry.size(), Size::new(80.0, 80.0));
//! assert_eq!(geometry.anchors().get(AnchorId::Bottom), Some(Point::new(40.0, 80.0)));
//! ```

mod anchor;
mod catalog;
mod outline;
mod registry;

pub use anchor::{AnchorId, Anchors};
pub use outline::Outline;
pub use registry::{GeometryFn, RegistryError, ShapeRegistry, ShapeRegistryBuilder};

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::{Bounds, Point, Size};

/// Default box for a node that carries no explicit size
pub const DEFAULT_NODE_SIZE: Size = Size::new(100.0, 50.0);

/// The enumerated set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Diamond,
    Triangle,
    Hexagon,
    Star,
    Pentagon,
    Parallelogram,
    Database,
    Cloud,
    Document,
    Terminator,
    Heart,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Text,
    Image,
    MindmapNode,
}

impl ShapeKind {
    /// Every kind, in palette order
    pub const ALL: [ShapeKind; 20] = [
        Self::Rectangle,
        Self::Circle,
        Self::Diamond,
        Self::Triangle,
        Self::Hexagon,
        Self::Star,
        Self::Pentagon,
        Self::Parallelogram,
        Self::Database,
        Self::Cloud,
        Self::Document,
        Self::Terminator,
        Self::Heart,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::Text,
        Self::Image,
        Self::MindmapNode,
    ];

    /// The canonical tag for this kind
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
            Self::Hexagon => "hexagon",
            Self::Star => "star",
            Self::Pentagon => "pentagon",
            Self::Parallelogram => "parallelogram",
            Self::Database => "database",
            Self::Cloud => "cloud",
            Self::Document => "document",
            Self::Terminator => "terminator",
            Self::Heart => "heart",
            Self::ArrowUp => "arrow-up",
            Self::ArrowDown => "arrow-down",
            Self::ArrowLeft => "arrow-left",
            Self::ArrowRight => "arrow-right",
            Self::Text => "text",
            Self::Image => "image",
            Self::MindmapNode => "mindmap-node",
        }
    }

    /// Resolves a tag or one of its aliases, or `None` for unknown tags.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let alias = match tag.as_str() {
            "process" | "task" | "branch-topic" => Some(Self::Rectangle),
            "decision" | "gateway" => Some(Self::Diamond),
            "central-topic" => Some(Self::Circle),
            "data" => Some(Self::Parallelogram),
            _ => None,
        };
        alias.or_else(|| Self::ALL.into_iter().find(|kind| kind.tag() == tag))
    }

    /// Resolves a tag, falling back to [`ShapeKind::Rectangle`]
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    /// Canonical box used when a node has no explicit width or height
    pub fn default_size(self) -> Size {
        let (w, h) = match self {
            Self::Rectangle => (100.0, 50.0),
            Self::Circle => (96.0, 96.0),
            Self::Diamond | Self::Star => (100.0, 100.0),
            Self::Triangle | Self::Hexagon | Self::Image => (100.0, 80.0),
            Self::Pentagon => (100.0, 95.0),
            Self::Parallelogram => (120.0, 60.0),
            Self::Database => (100.0, 70.0),
            Self::Cloud => (120.0, 80.0),
            Self::Document => (100.0, 60.0),
            Self::Terminator | Self::MindmapNode => (120.0, 50.0),
            Self::Heart => (100.0, 90.0),
            Self::ArrowUp | Self::ArrowDown => (60.0, 100.0),
            Self::ArrowLeft | Self::ArrowRight => (100.0, 60.0),
            Self::Text => (100.0, 40.0),
        };
        Size::new(w, h)
    }

    /// Rectangle-family kinds expose the extra `top-right` and `bottom-left` anchors
    pub fn is_rectangle_family(self) -> bool {
        matches!(
            self,
            Self::Rectangle | Self::Terminator | Self::Text | Self::Image | Self::MindmapNode
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A shape tag as written in a document.
///
/// The tag text is preserved verbatim so unknown or aliased tags survive a
/// save and reload; [`ShapeTag::kind`] resolves it for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeTag(Box<str>);

impl ShapeTag {
    pub fn new(tag: &str) -> Self {
        Self(tag.into())
    }

    /// The tag text as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The kind this tag renders as
    pub fn kind(&self) -> ShapeKind {
        ShapeKind::from_tag(&self.0)
    }

    /// Returns `true` when the tag names a known kind or alias
    pub fn is_known(&self) -> bool {
        ShapeKind::parse(&self.0).is_some()
    }
}

impl Default for ShapeTag {
    fn default() -> Self {
        ShapeKind::default().into()
    }
}

impl From<ShapeKind> for ShapeTag {
    fn from(kind: ShapeKind) -> Self {
        Self::new(kind.tag())
    }
}

impl FromStr for ShapeTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShapeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShapeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// Presentation hints that influence the outline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeStyle {
    corner_radius: Option<f32>,
}

impl ShapeStyle {
    /// Overrides the corner radius of rounded rectangle kinds
    pub fn with_corner_radius(mut self, radius: Option<f32>) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn corner_radius(&self) -> Option<f32> {
        self.corner_radius
    }
}

/// A rendered shape: outline, anchors and label position in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    kind: ShapeKind,
    size: Size,
    outline: Outline,
    anchors: Anchors,
    label_center: Point,
}

impl ShapeGeometry {
    pub fn new(
        kind: ShapeKind,
        size: Size,
        outline: Outline,
        anchors: Anchors,
        label_center: Point,
    ) -> Self {
        Self {
            kind,
            size,
            outline,
            anchors,
            label_center,
        }
    }

    /// The kind that produced this geometry
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The footprint of the shape; circles and diamonds are square
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// Where the label text is centered
    pub fn label_center(&self) -> Point {
        self.label_center
    }

    /// The footprint as bounds at the local origin
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.size)
    }
}

/// Renders `kind` at `size` using the standard registry.
///
/// Non-finite or non-positive dimensions are replaced by the kind's default
/// size, so the call never fails.
pub fn render_shape(kind: ShapeKind, size: Size, style: &ShapeStyle) -> ShapeGeometry {
    ShapeRegistry::standard().render(kind, size, style)
}

/// Renders a free-form tag using the standard registry; unknown tags take
/// the registry's fallback entry.
pub fn render_tag(tag: &str, size: Size, style: &ShapeStyle) -> ShapeGeometry {
    ShapeRegistry::standard().render_tag(tag, size, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_tags() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::parse(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ShapeKind::parse("process"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::parse("task"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::parse("branch-topic"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::parse("decision"), Some(ShapeKind::Diamond));
        assert_eq!(ShapeKind::parse("gateway"), Some(ShapeKind::Diamond));
        assert_eq!(ShapeKind::parse("central-topic"), Some(ShapeKind::Circle));
        assert_eq!(ShapeKind::parse(" Circle "), Some(ShapeKind::Circle));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_rectangle() {
        assert_eq!(ShapeKind::parse("blob"), None);
        assert_eq!(ShapeKind::from_tag("blob"), ShapeKind::Rectangle);
        assert_eq!(ShapeKind::from_tag(""), ShapeKind::Rectangle);
    }

    #[test]
    fn test_shape_tag_preserves_text() {
        let tag = ShapeTag::new("process");
        assert_eq!(tag.as_str(), "process");
        assert_eq!(tag.kind(), ShapeKind::Rectangle);
        assert!(tag.is_known());

        let unknown = ShapeTag::new("squiggle");
        assert_eq!(unknown.kind(), ShapeKind::Rectangle);
        assert!(!unknown.is_known());

        let json = serde_json::to_string(&unknown).unwrap();
        assert_eq!(json, "\"squiggle\"");
        let back: ShapeTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unknown);
    }

    #[test]
    fn test_rectangle_family() {
        assert!(ShapeKind::Rectangle.is_rectangle_family());
        assert!(ShapeKind::Terminator.is_rectangle_family());
        assert!(!ShapeKind::Circle.is_rectangle_family());
        assert!(!ShapeKind::Diamond.is_rectangle_family());
    }

    #[test]
    fn test_default_node_size() {
        assert_eq!(DEFAULT_NODE_SIZE, Size::new(100.0, 50.0));
        assert_eq!(ShapeKind::Rectangle.default_size(), DEFAULT_NODE_SIZE);
    }

    #[test]
    fn test_render_tag_unknown_matches_rectangle() {
        let size = Size::new(100.0, 50.0);
        let style = ShapeStyle::default();
        let unknown = render_tag("not-a-shape", size, &style);
        let rect = render_shape(ShapeKind::Rectangle, size, &style);
        assert_eq!(unknown.outline(), rect.outline());
        assert_eq!(unknown.anchors(), rect.anchors());
    }
}
