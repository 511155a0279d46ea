//! Node outline drawing.
//!
//! [`Shape`] renders a [`ShapeGeometry`] with fill, border, opacity and
//! rotation. [`ShapeWithText`] adds a centered label. Both treat the render
//! position as the top-left corner of the node box.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, SvgNode, Text},
    geometry::{Point, Size},
    shape::{Outline, ShapeGeometry, ShapeStyle, render_tag},
};

/// Fill, border and transform of a node outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    fill_color: Color,
    stroke: StrokeDefinition,
    corner_radius: Option<f32>,
    opacity: f32,
    rotation: f32,
}

impl ShapeDefinition {
    pub fn new(fill_color: Color, stroke: StrokeDefinition) -> Self {
        Self {
            fill_color,
            stroke,
            ..Self::default()
        }
    }

    pub fn fill_color(&self) -> &Color {
        &self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Overrides the corner radius of rounded-rectangle kinds.
    pub fn set_corner_radius(&mut self, radius: Option<f32>) {
        self.corner_radius = radius;
    }

    /// Sets the opacity, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Sets the clockwise rotation in degrees around the box center.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn shape_style(&self) -> ShapeStyle {
        ShapeStyle::default().with_corner_radius(self.corner_radius)
    }
}

impl Default for ShapeDefinition {
    fn default() -> Self {
        Self {
            fill_color: Color::new("#ffffff").expect("'#ffffff' is a valid CSS color"),
            stroke: StrokeDefinition::new(Color::default(), 2.0),
            corner_radius: None,
            opacity: 1.0,
            rotation: 0.0,
        }
    }
}

/// A node outline ready to draw.
#[derive(Debug, Clone)]
pub struct Shape<'a> {
    definition: &'a ShapeDefinition,
    geometry: ShapeGeometry,
}

impl<'a> Shape<'a> {
    /// Renders the geometry for `tag`; unknown tags draw as rectangles.
    pub fn new(definition: &'a ShapeDefinition, tag: &str, size: Size) -> Self {
        let geometry = render_tag(tag, size, &definition.shape_style());
        Self {
            definition,
            geometry,
        }
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// The `transform` attribute placing local coordinates at `position`.
    fn transform(&self, position: Point) -> String {
        let mut transform = format!("translate({},{})", position.x(), position.y());
        if self.definition.rotation() != 0.0 {
            let center = self.geometry.size().center();
            transform.push_str(&format!(
                " rotate({},{},{})",
                self.definition.rotation(),
                center.x(),
                center.y()
            ));
        }
        transform
    }

    fn outline_nodes(&self) -> Vec<SvgNode> {
        let definition = self.definition;
        let fill = definition.fill_color();
        let stroke = definition.stroke();

        macro_rules! paint {
            ($element:expr) => {{
                let element = $element;
                let element = if fill.is_transparent() {
                    element.set("fill", "none")
                } else {
                    element
                        .set("fill", fill.to_string())
                        .set("fill-opacity", fill.alpha())
                };
                if stroke.width() > 0.0 && !stroke.color().is_transparent() {
                    crate::apply_stroke!(element, stroke)
                } else {
                    element.set("stroke", "none")
                }
            }};
        }

        let body: SvgNode = match self.geometry.outline() {
            Outline::Polygon(points) => Box::new(paint!(
                svg_element::Polygon::new().set("points", Outline::polygon_points_attr(points))
            )),
            Outline::Circle { center, radius } => Box::new(paint!(
                svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius)
            )),
            Outline::RoundedRect { size, radius } => Box::new(paint!(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", *radius)
                    .set("ry", *radius)
            )),
            Outline::Compound { body, .. } => Box::new(paint!(
                svg_element::Path::new().set("d", body.to_svg_data())
            )),
        };

        let mut nodes = vec![body];
        if let Outline::Compound {
            accents: Some(accents),
            ..
        } = self.geometry.outline()
        {
            let accent = svg_element::Path::new()
                .set("d", accents.to_svg_data())
                .set("fill", "none");
            nodes.push(Box::new(crate::apply_stroke!(accent, stroke)) as SvgNode);
        }
        nodes
    }
}

impl Drawable for Shape<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut group = svg_element::Group::new().set("transform", self.transform(position));
        if self.definition.opacity() < 1.0 {
            group = group.set("opacity", self.definition.opacity());
        }
        for node in self.outline_nodes() {
            group = group.add(node);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(group));
        output
    }

    fn size(&self) -> Size {
        self.geometry.size()
    }
}

/// A node outline with an optional label centered on the shape's label point.
#[derive(Debug, Clone)]
pub struct ShapeWithText<'a> {
    shape: Shape<'a>,
    text: Option<Text<'a>>,
}

impl<'a> ShapeWithText<'a> {
    pub fn new(shape: Shape<'a>, text: Option<Text<'a>>) -> Self {
        Self { shape, text }
    }

    pub fn shape(&self) -> &Shape<'a> {
        &self.shape
    }

    /// Absolute label center for a node drawn at `position`, following the
    /// node's rotation.
    pub fn label_position(&self, position: Point) -> Point {
        let geometry = self.shape.geometry();
        let local = geometry.label_center();
        let rotation = self.shape.definition.rotation();
        let local = if rotation == 0.0 {
            local
        } else {
            let center = geometry.size().center();
            let (sin, cos) = rotation.to_radians().sin_cos();
            let offset = local.sub_point(center);
            center.add_point(Point::new(
                offset.x() * cos - offset.y() * sin,
                offset.x() * sin + offset.y() * cos,
            ))
        };
        position.add_point(local)
    }
}

impl Drawable for ShapeWithText<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = self.shape.render_to_layers(position);
        if let Some(text) = &self.text {
            output.merge(text.render_to_layers(self.label_position(position)));
        }
        output
    }

    fn size(&self) -> Size {
        self.shape.size()
    }
}
