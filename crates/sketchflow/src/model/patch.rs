//! Partial property updates for nodes and edges.
//!
//! A patch carries only the properties being changed. Applying it leaves
//! every other property untouched. Values that cannot be represented, such
//! as a non-positive width, are skipped.

use log::debug;

use sketchflow_core::{
    color::Color,
    draw::{FontWeight, MarkerKind, StrokeStyle},
    edge_path::PathType,
    shape::ShapeTag,
};

use super::{edge::EdgeData, node::NodeData};

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Style changes for a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStylePatch {
    shape: Option<ShapeTag>,
    color: Option<Color>,
    border_color: Option<Color>,
    text_color: Option<Color>,
    font_size: Option<f32>,
    font_weight: Option<FontWeight>,
    width: Option<f32>,
    height: Option<f32>,
    border_width: Option<f32>,
    border_radius: Option<f32>,
    opacity: Option<f32>,
    rotation: Option<f32>,
    locked: Option<bool>,
}

impl NodeStylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: ShapeTag) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = Some(width);
        self
    }

    pub fn with_border_radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Opacity in `[0, 1]`; out-of-range values are clamped when applied.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Rotation in degrees
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(&self, data: &mut NodeData) {
        if let Some(shape) = &self.shape {
            data.set_shape(shape.clone());
        }
        if let Some(color) = &self.color {
            data.set_color(color.clone());
        }
        if let Some(color) = &self.border_color {
            data.set_border_color(color.clone());
        }
        if let Some(color) = &self.text_color {
            data.set_text_color(color.clone());
        }
        if let Some(weight) = self.font_weight {
            data.set_font_weight(weight);
        }
        if let Some(locked) = self.locked {
            data.set_locked(locked);
        }

        let numeric: [(Option<f32>, fn(f32) -> bool, fn(&mut NodeData, f32), &str); 7] = [
            (self.font_size, positive, NodeData::set_font_size, "font_size"),
            (self.width, positive, NodeData::set_width, "width"),
            (self.height, positive, NodeData::set_height, "height"),
            (
                self.border_width,
                non_negative,
                NodeData::set_border_width,
                "border_width",
            ),
            (
                self.border_radius,
                non_negative,
                NodeData::set_border_radius,
                "border_radius",
            ),
            (self.opacity, f32::is_finite, NodeData::set_opacity, "opacity"),
            (self.rotation, f32::is_finite, NodeData::set_rotation, "rotation"),
        ];
        for (value, valid, set, property) in numeric {
            match value {
                Some(value) if valid(value) => set(data, value),
                Some(value) => debug!(property, value; "Skipping invalid node property"),
                None => {}
            }
        }
    }
}

/// Style changes for an edge.
///
/// Markers use a nested option so a patch can clear an arrowhead:
/// `with_marker_end(None)` removes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStylePatch {
    color: Option<Color>,
    stroke_width: Option<f32>,
    stroke_style: Option<StrokeStyle>,
    path_type: Option<PathType>,
    animated: Option<bool>,
    marker_start: Option<Option<MarkerKind>>,
    marker_end: Option<Option<MarkerKind>>,
    label_bg_color: Option<Color>,
    label_text_color: Option<Color>,
    locked: Option<bool>,
}

impl EdgeStylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = Some(style);
        self
    }

    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = Some(path_type);
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = Some(animated);
        self
    }

    pub fn with_marker_start(mut self, marker: Option<MarkerKind>) -> Self {
        self.marker_start = Some(marker);
        self
    }

    pub fn with_marker_end(mut self, marker: Option<MarkerKind>) -> Self {
        self.marker_end = Some(marker);
        self
    }

    pub fn with_label_bg_color(mut self, color: Color) -> Self {
        self.label_bg_color = Some(color);
        self
    }

    pub fn with_label_text_color(mut self, color: Color) -> Self {
        self.label_text_color = Some(color);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(&self, data: &mut EdgeData) {
        if let Some(color) = &self.color {
            data.set_color(color.clone());
        }
        match self.stroke_width {
            Some(width) if positive(width) => data.set_stroke_width(width),
            Some(width) => debug!(width; "Skipping invalid stroke width"),
            None => {}
        }
        if let Some(style) = self.stroke_style {
            data.set_stroke_style(style);
        }
        if let Some(path_type) = self.path_type {
            data.set_path_type(path_type);
        }
        if let Some(animated) = self.animated {
            data.set_animated(animated);
        }
        if let Some(marker) = self.marker_start {
            data.set_marker_start(marker);
        }
        if let Some(marker) = self.marker_end {
            data.set_marker_end(marker);
        }
        if let Some(color) = &self.label_bg_color {
            data.set_label_bg_color(color.clone());
        }
        if let Some(color) = &self.label_text_color {
            data.set_label_text_color(color.clone());
        }
        if let Some(locked) = self.locked {
            data.set_locked(locked);
        }
    }
}
