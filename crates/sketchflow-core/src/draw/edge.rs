//! Edge drawing and SVG marker generation.
//!
//! [`EdgeDrawer`] draws routed edges and remembers which marker kinds and
//! colors were referenced, so a single `<defs>` block with one marker per
//! combination can be emitted afterwards.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    edge_path::EdgePath,
};

/// Duration of one dash-offset cycle on animated edges
const DASH_ANIMATION_DURATION: &str = "0.5s";

/// Arrowhead drawn at an edge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Open chevron
    Arrow,
    /// Filled triangle
    #[serde(alias = "arrow-closed")]
    ArrowClosed,
}

impl MarkerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::ArrowClosed => "arrowclosed",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Arrow),
            "arrowclosed" | "arrow-closed" => Ok(Self::ArrowClosed),
            _ => Err(format!("invalid marker `{s}`, valid values: arrow, arrowclosed")),
        }
    }
}

/// Which end of the path a marker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerEnd {
    Start,
    End,
}

impl MarkerEnd {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Stroke and arrowheads of an edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeDefinition {
    stroke: StrokeDefinition,
    marker_start: Option<MarkerKind>,
    marker_end: Option<MarkerKind>,
}

impl EdgeDefinition {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            marker_start: None,
            marker_end: None,
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn marker_start(&self) -> Option<MarkerKind> {
        self.marker_start
    }

    pub fn marker_end(&self) -> Option<MarkerKind> {
        self.marker_end
    }

    pub fn set_marker_start(&mut self, marker: Option<MarkerKind>) {
        self.marker_start = marker;
    }

    pub fn set_marker_end(&mut self, marker: Option<MarkerKind>) {
        self.marker_end = marker;
    }
}

/// Draws edges and collects the markers they reference.
#[derive(Debug, Default)]
pub struct EdgeDrawer {
    // Keyed by marker id so the definitions come out in a stable order
    markers: BTreeMap<String, (MarkerKind, MarkerEnd, Color)>,
}

impl EdgeDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `path` with the definition's stroke and registers its markers.
    pub fn draw_edge(&mut self, definition: &EdgeDefinition, path: &EdgePath) -> SvgNode {
        let stroke = definition.stroke();
        let element = svg_element::Path::new()
            .set("d", path.to_svg_data())
            .set("fill", "none");
        let mut element = crate::apply_stroke!(element, stroke);

        if let Some(kind) = definition.marker_start() {
            let id = self.register(kind, MarkerEnd::Start, stroke.color());
            element = element.set("marker-start", format!("url(#{id})"));
        }
        if let Some(kind) = definition.marker_end() {
            let id = self.register(kind, MarkerEnd::End, stroke.color());
            element = element.set("marker-end", format!("url(#{id})"));
        }

        if stroke.animated() {
            // Scrolls the dashes from source to target
            let animation = svg_element::Animate::new()
                .set("attributeName", "stroke-dashoffset")
                .set("from", stroke.dash_period())
                .set("to", 0)
                .set("dur", DASH_ANIMATION_DURATION)
                .set("repeatCount", "indefinite");
            element = element.add(animation);
        }

        Box::new(element)
    }

    /// Returns `true` when no drawn edge referenced a marker.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Emits a `<defs>` block with every registered marker.
    pub fn draw_marker_definitions(&self) -> SvgNode {
        let mut defs = svg_element::Definitions::new();
        for (id, (kind, end, color)) in &self.markers {
            defs = defs.add(create_marker(id, *kind, *end, color));
        }
        Box::new(defs)
    }

    fn register(&mut self, kind: MarkerKind, end: MarkerEnd, color: &Color) -> String {
        let id = marker_id(kind, end, color);
        self.markers
            .entry(id.clone())
            .or_insert_with(|| (kind, end, color.clone()));
        id
    }
}

fn marker_id(kind: MarkerKind, end: MarkerEnd, color: &Color) -> String {
    format!("{kind}-{}-{}", end.as_str(), color.to_id_safe_string())
}

fn create_marker(id: &str, kind: MarkerKind, end: MarkerEnd, color: &Color) -> svg_element::Marker {
    // Drawn pointing right for the end marker and left for the start marker
    let (d, ref_x) = match (kind, end) {
        (MarkerKind::ArrowClosed, MarkerEnd::End) => ("M 0 0 L 10 5 L 0 10 z", 9),
        (MarkerKind::ArrowClosed, MarkerEnd::Start) => ("M 10 0 L 0 5 L 10 10 z", 1),
        (MarkerKind::Arrow, MarkerEnd::End) => ("M 1 1 L 9 5 L 1 9", 9),
        (MarkerKind::Arrow, MarkerEnd::Start) => ("M 9 1 L 1 5 L 9 9", 1),
    };

    let path = svg_element::Path::new().set("d", d);
    let path = match kind {
        MarkerKind::ArrowClosed => path
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha()),
        MarkerKind::Arrow => path
            .set("fill", "none")
            .set("stroke", color.to_string())
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", 1.5)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round"),
    };

    svg_element::Marker::new()
        .set("id", id)
        .set("viewBox", "0 0 10 10")
        .set("refX", ref_x)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::StrokeStyle,
        edge_path::{PathType, compute_path},
        geometry::{Point, Side},
    };

    fn sample_path() -> EdgePath {
        compute_path(
            PathType::Straight,
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(100.0, 0.0),
            Side::Left,
        )
    }

    fn indigo() -> Color {
        Color::new("#6366f1").unwrap()
    }

    #[test]
    fn test_marker_kind_parse() {
        assert_eq!("arrow".parse::<MarkerKind>(), Ok(MarkerKind::Arrow));
        assert_eq!("arrowclosed".parse::<MarkerKind>(), Ok(MarkerKind::ArrowClosed));
        assert!("diamond".parse::<MarkerKind>().is_err());
        let parsed: MarkerKind = serde_json::from_str("\"arrowclosed\"").unwrap();
        assert_eq!(parsed, MarkerKind::ArrowClosed);
    }

    #[test]
    fn test_draw_edge_without_markers() {
        let mut drawer = EdgeDrawer::new();
        let definition = EdgeDefinition::new(StrokeDefinition::new(indigo(), 2.0));
        let svg = drawer.draw_edge(&definition, &sample_path()).to_string();
        assert!(svg.contains("d=\"M0,0 L100,0\""));
        assert!(!svg.contains("marker-end"));
        assert!(drawer.is_empty());
    }

    #[test]
    fn test_markers_are_shared_per_color() {
        let mut drawer = EdgeDrawer::new();
        let mut definition = EdgeDefinition::new(StrokeDefinition::new(indigo(), 2.0));
        definition.set_marker_end(Some(MarkerKind::ArrowClosed));

        let first = drawer.draw_edge(&definition, &sample_path()).to_string();
        let second = drawer.draw_edge(&definition, &sample_path()).to_string();
        assert!(first.contains("marker-end=\"url(#arrowclosed-end-hex6366f1)\""));
        assert_eq!(first, second);

        let defs = drawer.draw_marker_definitions().to_string();
        assert_eq!(defs.matches("<marker").count(), 1);
        assert!(defs.contains("id=\"arrowclosed-end-hex6366f1\""));
        assert!(defs.contains("refX=\"9\""));
    }

    #[test]
    fn test_start_and_end_markers() {
        let mut drawer = EdgeDrawer::new();
        let mut definition = EdgeDefinition::new(StrokeDefinition::new(indigo(), 2.0));
        definition.set_marker_start(Some(MarkerKind::Arrow));
        definition.set_marker_end(Some(MarkerKind::Arrow));
        drawer.draw_edge(&definition, &sample_path());

        let defs = drawer.draw_marker_definitions().to_string();
        assert_eq!(defs.matches("<marker").count(), 2);
        assert!(defs.contains("arrow-start-hex6366f1"));
        assert!(defs.contains("arrow-end-hex6366f1"));
    }

    #[test]
    fn test_animated_edge_has_dash_animation() {
        let mut drawer = EdgeDrawer::new();
        let mut stroke = StrokeDefinition::new(indigo(), 2.0);
        stroke.set_style(StrokeStyle::Dotted);
        stroke.set_animated(true);
        let definition = EdgeDefinition::new(stroke);

        let svg = drawer.draw_edge(&definition, &sample_path()).to_string();
        assert!(svg.contains("stroke-dasharray=\"4,2\""));
        assert!(svg.contains("attributeName=\"stroke-dashoffset\""));
        assert!(svg.contains("from=\"6\""));
    }
}
