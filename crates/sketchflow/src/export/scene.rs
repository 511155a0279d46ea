//! SVG scene rendering.
//!
//! The scene is re-derived from a [`Snapshot`] alone: node outlines come
//! from the Shape Geometry Renderer and edge routes from the Edge Path
//! Engine. Nothing is read back from a live view.

use std::collections::HashMap;

use log::{debug, warn};
use svg::{Document, node::element as svg_element};

use sketchflow_core::{
    color::Color,
    draw::{
        Drawable as _, EdgeDefinition, EdgeDrawer, FontWeight, LayeredOutput, RenderLayer, Shape,
        ShapeDefinition, ShapeWithText, StrokeDefinition, Text, TextDefinition,
    },
    edge_path,
    geometry::Insets,
    identifier::Id,
};

use crate::{
    config::ExportConfig,
    model::{Edge, Node, Snapshot},
};

const EDGE_LABEL_FONT_SIZE: f32 = 12.0;

/// Coordinate space a scene is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSpace {
    /// Diagram coordinates, ignoring pan and zoom. Used for vector export.
    Diagram,
    /// Through the snapshot's viewport, as the canvas shows it. Used for
    /// bitmap capture.
    Screen,
}

/// Renders snapshots into fixed-size SVG documents.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    width: u32,
    height: u32,
    background: Color,
}

impl SceneRenderer {
    /// Creates a renderer using the canvas size and background of `config`.
    ///
    /// An unparsable background color falls back to white.
    pub fn new(config: &ExportConfig) -> Self {
        let background = config.background().unwrap_or_else(|err| {
            warn!(err:%; "Invalid export background, using white");
            Color::new("#ffffff").expect("white is a valid color")
        });
        Self {
            width: config.width(),
            height: config.height(),
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Renders the snapshot in the given coordinate space.
    ///
    /// Edges whose source or target is missing are skipped.
    pub fn render(&self, snapshot: &Snapshot, space: SceneSpace) -> Document {
        let nodes: HashMap<Id, &Node> = snapshot
            .nodes()
            .iter()
            .map(|node| (node.id(), node))
            .collect();

        let mut edge_drawer = EdgeDrawer::new();
        let mut output = LayeredOutput::new();
        for edge in snapshot.edges() {
            if let Some(edge_output) = self.render_edge(edge, &nodes, &mut edge_drawer) {
                output.merge(edge_output);
            }
        }
        for node in snapshot.nodes() {
            output.merge(self.render_node(node));
        }

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .set("xmlns:xlink", "http://www.w3.org/1999/xlink");
        let mut doc = self.add_background(doc);

        if !edge_drawer.is_empty() {
            doc = doc.add(edge_drawer.draw_marker_definitions());
        }

        let mut main_group = svg_element::Group::new();
        if space == SceneSpace::Screen {
            main_group = main_group.set("transform", snapshot.viewport().to_svg_transform());
        }
        for layer in output.render() {
            main_group = main_group.add(layer);
        }

        debug!(
            nodes = snapshot.nodes().len(),
            edges = snapshot.edges().len();
            "Scene rendered"
        );
        doc.add(main_group)
    }

    /// Renders the snapshot and serializes it to SVG text.
    pub fn render_to_string(&self, snapshot: &Snapshot, space: SceneSpace) -> String {
        self.render(snapshot, space).to_string()
    }

    fn add_background(&self, doc: Document) -> Document {
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", self.background.to_string())
            .set("fill-opacity", self.background.alpha())
            .set("data-layer", RenderLayer::Background.name());
        doc.add(background)
    }

    fn render_node(&self, node: &Node) -> LayeredOutput {
        let data = node.data();

        let stroke = StrokeDefinition::new(data.border_color().clone(), data.border_width());
        let mut shape_definition = ShapeDefinition::new(data.color().clone(), stroke);
        shape_definition.set_corner_radius(Some(data.border_radius()));
        shape_definition.set_opacity(data.opacity());
        shape_definition.set_rotation(data.rotation());

        let mut text_definition = TextDefinition::new();
        text_definition.set_font_size(data.font_size());
        text_definition.set_font_weight(data.font_weight());
        text_definition.set_color(Some(data.text_color().clone()));

        let shape = Shape::new(&shape_definition, data.shape().as_str(), data.size());
        let label = data.label();
        let text = (!label.trim().is_empty()).then(|| Text::new(&text_definition, label));

        ShapeWithText::new(shape, text).render_to_layers(node.position())
    }

    fn render_edge(
        &self,
        edge: &Edge,
        nodes: &HashMap<Id, &Node>,
        edge_drawer: &mut EdgeDrawer,
    ) -> Option<LayeredOutput> {
        let (Some(source), Some(target)) = (nodes.get(&edge.source()), nodes.get(&edge.target()))
        else {
            debug!(edge_id:% = edge.id(); "Skipping edge with a missing endpoint");
            return None;
        };

        let data = edge.data();
        let source_handle = edge.source_handle();
        let target_handle = edge.target_handle();
        let path = edge_path::compute_path(
            data.path_type(),
            source.anchor_point(source_handle),
            source_handle.side(),
            target.anchor_point(target_handle),
            target_handle.side(),
        );

        let color = data.color();
        let mut stroke = StrokeDefinition::new(color.clone(), data.stroke_width());
        stroke.set_style(data.stroke_style());
        stroke.set_animated(data.is_animated());
        let mut definition = EdgeDefinition::new(stroke);
        definition.set_marker_start(data.marker_start());
        definition.set_marker_end(data.marker_end());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Edge, edge_drawer.draw_edge(&definition, &path));

        if let Some(label) = data.label().filter(|label| !label.trim().is_empty()) {
            let mut badge = TextDefinition::new();
            badge.set_font_size(EDGE_LABEL_FONT_SIZE);
            badge.set_font_weight(FontWeight::MEDIUM);
            badge.set_color(Some(data.label_text_color()));
            badge.set_background_color(Some(data.label_bg_color()));
            badge.set_border_color(Some(color));
            badge.set_padding(Insets::symmetric(4.0, 8.0));
            output.merge(Text::new(&badge, label).render_to_layers(path.label_point()));
        }

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeData, NodeData, Viewport};
    use sketchflow_core::{geometry::Point, shape::ShapeKind};

    fn node(id: &str, x: f32, kind: ShapeKind) -> Node {
        Node::new(Id::new(id), Point::new(x, 40.0), NodeData::for_kind(kind, id))
    }

    fn render(snapshot: &Snapshot) -> String {
        SceneRenderer::new(&ExportConfig::default()).render_to_string(snapshot, SceneSpace::Screen)
    }

    #[test]
    fn test_fixed_canvas_size() {
        let svg = render(&Snapshot::default());
        assert!(svg.contains("viewBox=\"0 0 1024 768\""));
        assert!(svg.contains("width=\"1024\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_nodes_and_edges_are_drawn() {
        let snapshot = Snapshot::new(
            vec![node("a", 0.0, ShapeKind::Rectangle), node("b", 300.0, ShapeKind::Circle)],
            vec![Edge::new(
                Id::new("e"),
                Id::new("a"),
                Id::new("b"),
                EdgeData::connected(Color::new("#6366f1").unwrap(), 2.0, Default::default()),
            )],
            Viewport::default(),
        );
        let svg = render(&snapshot);
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("marker-end"));
        assert!(svg.contains("<marker"));
        // Edge group precedes the node group
        let edge_at = svg.find("data-layer=\"edge\"").unwrap();
        let node_at = svg.find("data-layer=\"node\"").unwrap();
        assert!(edge_at < node_at);
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let snapshot = Snapshot::new(
            vec![node("a", 0.0, ShapeKind::Rectangle)],
            vec![Edge::new(Id::new("e"), Id::new("a"), Id::new("ghost"), EdgeData::new())],
            Viewport::default(),
        );
        let svg = render(&snapshot);
        assert!(!svg.contains("data-layer=\"edge\""));
        assert!(!svg.contains("<marker"));
    }

    #[test]
    fn test_viewport_transform_applied() {
        let snapshot = Snapshot::new(
            vec![node("a", 0.0, ShapeKind::Diamond)],
            Vec::new(),
            Viewport::new(25.0, -10.0, 2.0),
        );
        assert!(render(&snapshot).contains(&Viewport::new(25.0, -10.0, 2.0).to_svg_transform()));
    }

    #[test]
    fn test_diagram_space_ignores_viewport() {
        let viewport = Viewport::new(-5000.0, -5000.0, 0.5);
        let snapshot = Snapshot::new(
            vec![node("a", 0.0, ShapeKind::Diamond)],
            Vec::new(),
            viewport,
        );
        let svg = SceneRenderer::new(&ExportConfig::default())
            .render_to_string(&snapshot, SceneSpace::Diagram);
        assert!(!svg.contains(&viewport.to_svg_transform()));
        assert!(!svg.contains("transform=\"translate(-5000"));
        assert!(svg.contains("data-layer=\"node\""));
    }

    #[test]
    fn test_invalid_background_falls_back() {
        let config = ExportConfig::new(640, 480, 1.0, "not a color", 297.0);
        let renderer = SceneRenderer::new(&config);
        let svg = renderer.render_to_string(&Snapshot::default(), SceneSpace::Diagram);
        assert!(svg.contains("fill=\"#ffffff\""));
        assert_eq!((renderer.width(), renderer.height()), (640, 480));
    }
}
