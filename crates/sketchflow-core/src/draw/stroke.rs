//! Stroke and line-style definitions.
//!
//! [`StrokeDefinition`] bundles everything needed to outline a node or draw
//! an edge: color, width, dash style, the animated flag, cap and join. The
//! [`apply_stroke!`](crate::apply_stroke!) macro writes all of it onto an SVG
//! element at once.
//!
//! # Dash patterns
//!
//! Dash lengths scale with the stroke width `w`:
//!
//! | Style | `stroke-dasharray` |
//! |-------|--------------------|
//! | solid | none |
//! | dashed | `w*4,w*2` |
//! | dotted | `w,w` |
//! | animated (any style) | `w*2,w` |
//!
//! ```
//! use sketchflow_core::draw::{StrokeDefinition, StrokeStyle};
//! use sketchflow_core::color::Color;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("#6366f1").unwrap(), 2.0);
//! stroke.set_style(StrokeStyle::Dashed);
//! assert_eq!(stroke.dasharray().as_deref(), Some("8,4"));
//!
//! stroke.set_animated(true);
//! assert_eq!(stroke.dasharray().as_deref(), Some("4,2"));
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Line pattern of an edge or border.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }

    /// Returns the `stroke-dasharray` for a line of `width`, or `None` for a
    /// continuous line. Animation overrides the style with a short repeating
    /// dash.
    pub fn dasharray(self, width: f32, animated: bool) -> Option<String> {
        if animated {
            return Some(format!("{},{}", width * 2.0, width));
        }
        match self {
            Self::Solid => None,
            Self::Dashed => Some(format!("{},{}", width * 4.0, width * 2.0)),
            Self::Dotted => Some(format!("{width},{width}")),
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Defines how line corners are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke for node borders and edge paths.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    animated: bool,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid, non-animated stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// The `stroke-dasharray` derived from style, width and animation.
    pub fn dasharray(&self) -> Option<String> {
        self.style.dasharray(self.width, self.animated)
    }

    /// Length of one dash period, used as the scroll distance of the
    /// animated dash offset. Zero for continuous lines.
    pub fn dash_period(&self) -> f32 {
        if self.animated {
            self.width * 3.0
        } else {
            match self.style {
                StrokeStyle::Solid => 0.0,
                StrokeStyle::Dashed => self.width * 6.0,
                StrokeStyle::Dotted => self.width * 2.0,
            }
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            animated: false,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width, cap, join and, for patterned or animated
/// strokes, the dash array.
///
/// ```
/// use sketchflow_core::draw::StrokeDefinition;
/// use sketchflow_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new().set("width", 100).set("height", 50);
/// let rect = sketchflow_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
