//! Edges and their persisted display data.

use serde::{Deserialize, Serialize};

use sketchflow_core::{
    color::Color,
    draw::{MarkerKind, StrokeStyle},
    edge_path::PathType,
    identifier::Id,
    shape::AnchorId,
};

use super::node::custom_type;

pub const DEFAULT_EDGE_COLOR: &str = "#6366f1";
pub const DEFAULT_EDGE_WIDTH: f32 = 2.0;

/// A directed connection between two nodes.
///
/// The anchor handles are optional in the serialized form; an edge without
/// them leaves from the source's bottom anchor and enters the target's top
/// anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    id: Id,
    source: Id,
    target: Id,
    #[serde(rename = "type", default = "custom_type")]
    edge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_handle: Option<AnchorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_handle: Option<AnchorId>,
    #[serde(default)]
    data: EdgeData,
}

impl Edge {
    pub fn new(id: Id, source: Id, target: Id, data: EdgeData) -> Self {
        Self {
            id,
            source,
            target,
            edge_type: custom_type(),
            source_handle: None,
            target_handle: None,
            data,
        }
    }

    /// Records the anchors the edge was connected through.
    pub fn with_handles(mut self, source: Option<AnchorId>, target: Option<AnchorId>) -> Self {
        self.source_handle = source;
        self.target_handle = target;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns `true` if either endpoint is `node_id`.
    pub fn touches(&self, node_id: Id) -> bool {
        self.source == node_id || self.target == node_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The anchor the edge leaves through, `bottom` when unset.
    pub fn source_handle(&self) -> AnchorId {
        self.source_handle.unwrap_or(AnchorId::Bottom)
    }

    /// The anchor the edge enters through, `top` when unset.
    pub fn target_handle(&self) -> AnchorId {
        self.target_handle.unwrap_or(AnchorId::Top)
    }

    pub fn data(&self) -> &EdgeData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut EdgeData {
        &mut self.data
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    pub(crate) fn set_endpoints(&mut self, source: Id, target: Id) {
        self.source = source;
        self.target = target;
    }
}

/// Display properties of an edge. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_style: Option<StrokeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_type: Option<PathType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    animated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker_start: Option<MarkerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker_end: Option<MarkerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_bg_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locked: Option<bool>,
}

impl EdgeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data for a freshly connected edge: stroke color, width and path type
    /// set explicitly and a closed arrow at the target.
    pub fn connected(color: Color, stroke_width: f32, path_type: PathType) -> Self {
        Self {
            color: Some(color),
            stroke_width: Some(stroke_width),
            path_type: Some(path_type),
            marker_end: Some(MarkerKind::ArrowClosed),
            ..Self::default()
        }
    }

    /// The label, if it has visible text
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.trim().is_empty())
    }

    pub fn color(&self) -> Color {
        self.color
            .clone()
            .unwrap_or_else(|| Color::new(DEFAULT_EDGE_COLOR).expect("default edge color is valid"))
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
            .filter(|width| width.is_finite() && *width > 0.0)
            .unwrap_or(DEFAULT_EDGE_WIDTH)
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style.unwrap_or_default()
    }

    pub fn path_type(&self) -> PathType {
        self.path_type.unwrap_or_default()
    }

    pub fn is_animated(&self) -> bool {
        self.animated.unwrap_or(false)
    }

    pub fn marker_start(&self) -> Option<MarkerKind> {
        self.marker_start
    }

    pub fn marker_end(&self) -> Option<MarkerKind> {
        self.marker_end
    }

    /// Badge background, white when unset
    pub fn label_bg_color(&self) -> Color {
        self.label_bg_color
            .clone()
            .unwrap_or_else(|| Color::new("#ffffff").expect("white is a valid color"))
    }

    /// Label text color, the stroke color when unset
    pub fn label_text_color(&self) -> Color {
        self.label_text_color.clone().unwrap_or_else(|| self.color())
    }

    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = Some(label);
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub(crate) fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = Some(width);
    }

    pub(crate) fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.stroke_style = Some(style);
    }

    pub(crate) fn set_path_type(&mut self, path_type: PathType) {
        self.path_type = Some(path_type);
    }

    pub(crate) fn set_animated(&mut self, animated: bool) {
        self.animated = Some(animated);
    }

    pub(crate) fn set_marker_start(&mut self, marker: Option<MarkerKind>) {
        self.marker_start = marker;
    }

    pub(crate) fn set_marker_end(&mut self, marker: Option<MarkerKind>) {
        self.marker_end = marker;
    }

    pub(crate) fn set_label_bg_color(&mut self, color: Color) {
        self.label_bg_color = Some(color);
    }

    pub(crate) fn set_label_text_color(&mut self, color: Color) {
        self.label_text_color = Some(color);
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = Some(locked);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_connected_edge_serialization() {
        let edge = Edge::new(
            Id::new("ea-b"),
            Id::new("a"),
            Id::new("b"),
            EdgeData::connected(
                Color::new("#6366f1").unwrap(),
                2.0,
                PathType::Smoothstep,
            ),
        )
        .with_handles(Some(AnchorId::Right), Some(AnchorId::Left));

        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({
                "id": "ea-b",
                "source": "a",
                "target": "b",
                "type": "custom",
                "sourceHandle": "right",
                "targetHandle": "left",
                "data": {
                    "color": "#6366f1",
                    "strokeWidth": 2.0,
                    "pathType": "smoothstep",
                    "markerEnd": "arrowclosed"
                }
            })
        );
    }

    #[test]
    fn test_minimal_edge_defaults() {
        let edge: Edge =
            serde_json::from_value(json!({"id": "e1", "source": "a", "target": "b"})).unwrap();
        assert_eq!(edge.source_handle(), AnchorId::Bottom);
        assert_eq!(edge.target_handle(), AnchorId::Top);

        let data = edge.data();
        assert_eq!(data.color().to_string(), "#6366f1");
        assert_eq!(data.stroke_width(), 2.0);
        assert_eq!(data.stroke_style(), StrokeStyle::Solid);
        assert_eq!(data.path_type(), PathType::Smoothstep);
        assert!(!data.is_animated());
        assert_eq!(data.marker_end(), None);
        assert_eq!(data.label(), None);
        assert_eq!(data.label_text_color(), data.color());
    }

    #[test]
    fn test_simple_bezier_alias() {
        let data: EdgeData = serde_json::from_value(json!({"pathType": "simple-bezier"})).unwrap();
        assert_eq!(data.path_type(), PathType::SimpleBezier);
    }

    #[test]
    fn test_self_loop() {
        let edge = Edge::new(Id::new("e"), Id::new("a"), Id::new("a"), EdgeData::new());
        assert!(edge.is_self_loop());
        assert!(edge.touches(Id::new("a")));
        assert!(!edge.touches(Id::new("b")));
    }
}
