//! Nodes and their persisted display data.

use serde::{Deserialize, Serialize};

use sketchflow_core::{
    color::Color,
    draw::FontWeight,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    shape::{self, AnchorId, ShapeGeometry, ShapeKind, ShapeStyle, ShapeTag},
};

use crate::palette::{self, StyleDefaults};

pub const DEFAULT_BORDER_WIDTH: f32 = 2.0;
pub const DEFAULT_BORDER_RADIUS: f32 = 8.0;
pub const DEFAULT_ROTATION: f32 = 0.0;
pub const DEFAULT_OPACITY: f32 = 1.0;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// The renderer type written into every exported node and edge.
pub(crate) const CUSTOM_TYPE: &str = "custom";

pub(crate) fn custom_type() -> String {
    CUSTOM_TYPE.to_string()
}

/// A labeled shape placed in diagram space.
///
/// Serializes as `{id, type, position, data}`; `position` is the top-left
/// corner of the node's box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    #[serde(rename = "type", default = "custom_type")]
    node_type: String,
    position: Point,
    #[serde(default)]
    data: NodeData,
}

impl Node {
    pub fn new(id: Id, position: Point, data: NodeData) -> Self {
        Self {
            id,
            node_type: custom_type(),
            position,
            data,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    /// The node's box in diagram space.
    pub fn footprint(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.geometry().size())
    }

    /// Renders the node's outline in local coordinates.
    pub fn geometry(&self) -> ShapeGeometry {
        let style = ShapeStyle::default().with_corner_radius(self.data.border_radius);
        shape::render_tag(self.data.shape.as_str(), self.data.size(), &style)
    }

    /// Absolute position of an anchor in diagram space.
    pub fn anchor_point(&self, anchor: AnchorId) -> Point {
        self.position
            .add_point(self.geometry().anchors().resolve(anchor))
    }
}

/// Display properties of a node.
///
/// Optional properties are omitted from the serialized form until set; their
/// getters return the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    label: String,
    shape: ShapeTag,
    color: Color,
    border_color: Color,
    text_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locked: Option<bool>,
}

impl NodeData {
    /// Creates node data with the given colors and no optional properties.
    pub fn new(label: impl Into<String>, shape: ShapeTag, defaults: &StyleDefaults) -> Self {
        Self {
            label: label.into(),
            shape,
            color: defaults.fill().clone(),
            border_color: defaults.border().clone(),
            text_color: defaults.text().clone(),
            font_size: None,
            font_weight: None,
            width: None,
            height: None,
            border_width: None,
            border_radius: None,
            opacity: None,
            rotation: None,
            locked: None,
        }
    }

    /// Creates node data styled with the palette defaults for `kind`.
    pub fn for_kind(kind: ShapeKind, label: impl Into<String>) -> Self {
        Self::new(label, kind.into(), &palette::kind_defaults(kind))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &ShapeTag {
        &self.shape
    }

    /// Fill color
    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn border_color(&self) -> &Color {
        &self.border_color
    }

    pub fn text_color(&self) -> &Color {
        &self.text_color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight.unwrap_or_default()
    }

    /// Explicit width/height, with missing dimensions taken from the
    /// shape kind's default box.
    pub fn size(&self) -> Size {
        let fallback = self.shape.kind().default_size();
        Size::new(
            self.width.unwrap_or(fallback.width()),
            self.height.unwrap_or(fallback.height()),
        )
        .sanitized(fallback)
    }

    pub fn border_width(&self) -> f32 {
        self.border_width.unwrap_or(DEFAULT_BORDER_WIDTH)
    }

    pub fn border_radius(&self) -> f32 {
        self.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.unwrap_or(DEFAULT_OPACITY)
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation.unwrap_or(DEFAULT_ROTATION)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_shape(&mut self, shape: ShapeTag) {
        self.shape = shape;
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub(crate) fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub(crate) fn set_font_size(&mut self, size: f32) {
        self.font_size = Some(size);
    }

    pub(crate) fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = Some(weight);
    }

    pub(crate) fn set_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    pub(crate) fn set_height(&mut self, height: f32) {
        self.height = Some(height);
    }

    pub(crate) fn set_border_width(&mut self, width: f32) {
        self.border_width = Some(width);
    }

    pub(crate) fn set_border_radius(&mut self, radius: f32) {
        self.border_radius = Some(radius);
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
    }

    pub(crate) fn set_rotation(&mut self, degrees: f32) {
        self.rotation = Some(degrees);
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = Some(locked);
    }
}

impl Default for NodeData {
    fn default() -> Self {
        Self::for_kind(ShapeKind::Rectangle, "")
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_shape() {
        let node = Node::new(
            Id::new("n1"),
            Point::new(140.0, 60.0),
            NodeData::for_kind(ShapeKind::Circle, "Start"),
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "n1",
                "type": "custom",
                "position": {"x": 140.0, "y": 60.0},
                "data": {
                    "label": "Start",
                    "shape": "circle",
                    "color": "#10b981",
                    "borderColor": "#059669",
                    "textColor": "#ffffff"
                }
            })
        );
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let node: Node = serde_json::from_value(json!({
            "id": "a",
            "position": {"x": 1.0, "y": 2.0},
            "data": {"label": "A", "shape": "diamond"}
        }))
        .unwrap();

        let data = node.data();
        assert_eq!(data.shape().kind(), ShapeKind::Diamond);
        assert_approx_eq!(f32, data.border_width(), 2.0);
        assert_approx_eq!(f32, data.border_radius(), 8.0);
        assert_approx_eq!(f32, data.rotation(), 0.0);
        assert_approx_eq!(f32, data.opacity(), 1.0);
        assert_approx_eq!(f32, data.font_size(), 14.0);
        assert_eq!(data.font_weight(), FontWeight::NORMAL);
        assert!(!data.is_locked());
        assert_eq!(data.size(), ShapeKind::Diamond.default_size());
    }

    #[test]
    fn test_unknown_shape_survives_round_trip() {
        let node: Node = serde_json::from_value(json!({
            "id": "a",
            "type": "custom",
            "position": {"x": 0.0, "y": 0.0},
            "data": {"label": "A", "shape": "teleporter"}
        }))
        .unwrap();
        assert_eq!(node.data().shape().kind(), ShapeKind::Rectangle);

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["data"]["shape"], "teleporter");
    }

    #[test]
    fn test_partial_size_uses_kind_default() {
        let mut data = NodeData::for_kind(ShapeKind::Rectangle, "A");
        data.set_width(180.0);
        assert_eq!(data.size(), Size::new(180.0, 50.0));
    }

    #[test]
    fn test_anchor_points_are_absolute() {
        let node = Node::new(
            Id::new("r"),
            Point::new(100.0, 200.0),
            NodeData::for_kind(ShapeKind::Rectangle, "R"),
        );
        assert_eq!(node.anchor_point(AnchorId::Top), Point::new(150.0, 200.0));
        assert_eq!(
            node.anchor_point(AnchorId::Bottom),
            Point::new(150.0, 250.0)
        );
        assert_eq!(
            node.footprint(),
            Bounds::new_from_top_left(Point::new(100.0, 200.0), Size::new(100.0, 50.0))
        );
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut data = NodeData::default();
        data.set_opacity(1.5);
        assert_approx_eq!(f32, data.opacity(), 1.0);
    }
}
