//! Edge path engine.
//!
//! Computes the route between two anchors given the side each anchor sits on.
//! Every route starts exactly at the source anchor and ends exactly at the
//! target anchor, and carries a point where the edge label is placed.

mod bezier;
mod smoothstep;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Side},
    path::PathData,
};

pub use smoothstep::{SMOOTHSTEP_BORDER_RADIUS, SMOOTHSTEP_OFFSET};

/// The routing style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Orthogonal routing with rounded corners
    #[default]
    Smoothstep,
    Bezier,
    Straight,
    #[serde(alias = "simple-bezier")]
    SimpleBezier,
}

impl PathType {
    pub const ALL: [PathType; 4] = [
        Self::Smoothstep,
        Self::Bezier,
        Self::Straight,
        Self::SimpleBezier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smoothstep => "smoothstep",
            Self::Bezier => "bezier",
            Self::Straight => "straight",
            Self::SimpleBezier => "simplebezier",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smoothstep" => Ok(Self::Smoothstep),
            "bezier" | "default" => Ok(Self::Bezier),
            "straight" => Ok(Self::Straight),
            "simplebezier" | "simple-bezier" => Ok(Self::SimpleBezier),
            other => Err(format!("unknown path type `{other}`")),
        }
    }
}

/// A computed edge route.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    data: PathData,
    label_point: Point,
}

impl EdgePath {
    pub fn new(data: PathData, label_point: Point) -> Self {
        Self { data, label_point }
    }

    pub fn data(&self) -> &PathData {
        &self.data
    }

    /// Where the edge label is centered
    pub fn label_point(&self) -> Point {
        self.label_point
    }

    /// The SVG `d` attribute for this route
    pub fn to_svg_data(&self) -> String {
        self.data.to_svg_data()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.data.start_point()
    }

    pub fn end_point(&self) -> Option<Point> {
        self.data.end_point()
    }
}

/// Computes the route from `source` to `target`.
///
/// `source_side` and `target_side` are the outward sides of the anchors; the
/// curved and orthogonal styles leave and enter along those directions.
///
/// # Example
///
/// ```
/// # use sketchflow_core::edge_path::{compute_path, PathType};
/// # use sketchflow_core::geometry::{Point, Side};
/// let path = compute_path(
///     PathType::Straight,
///     Point::new(0.0, 0.0),
///     Side::Right,
///     Point::new(100.0, 0.0),
///     Side::Left,
/// );
/// assert_eq!(path.to_svg_data(), "M0,0 L100,0");
/// assert_eq!(path.label_point(), Point::new(50.0, 0.0));
/// ```
pub fn compute_path(
    path_type: PathType,
    source: Point,
    source_side: Side,
    target: Point,
    target_side: Side,
) -> EdgePath {
    match path_type {
        PathType::Straight => straight(source, target),
        PathType::Bezier => bezier::bezier(source, source_side, target, target_side),
        PathType::SimpleBezier => bezier::simple_bezier(source, source_side, target),
        PathType::Smoothstep => smoothstep::smoothstep(source, source_side, target, target_side),
    }
}

fn straight(source: Point, target: Point) -> EdgePath {
    let data = PathData::new().move_to(source).line_to(target);
    EdgePath::new(data, source.midpoint(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_type_serde() {
        assert_eq!(serde_json::to_string(&PathType::SimpleBezier).unwrap(), "\"simplebezier\"");
        let parsed: PathType = serde_json::from_str("\"simple-bezier\"").unwrap();
        assert_eq!(parsed, PathType::SimpleBezier);
        let parsed: PathType = serde_json::from_str("\"smoothstep\"").unwrap();
        assert_eq!(parsed, PathType::Smoothstep);
    }

    #[test]
    fn test_path_type_from_str() {
        assert_eq!("Bezier".parse::<PathType>(), Ok(PathType::Bezier));
        assert_eq!("simple-bezier".parse::<PathType>(), Ok(PathType::SimpleBezier));
        assert!("zigzag".parse::<PathType>().is_err());
        assert_eq!(PathType::default(), PathType::Smoothstep);
    }

    #[test]
    fn test_straight_path() {
        let path = compute_path(
            PathType::Straight,
            Point::new(10.0, 20.0),
            Side::Bottom,
            Point::new(30.0, 60.0),
            Side::Top,
        );
        assert_eq!(path.start_point(), Some(Point::new(10.0, 20.0)));
        assert_eq!(path.end_point(), Some(Point::new(30.0, 60.0)));
        assert_eq!(path.label_point(), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_coincident_anchors() {
        let p = Point::new(5.0, 5.0);
        for path_type in PathType::ALL {
            let path = compute_path(path_type, p, Side::Right, p, Side::Left);
            assert_eq!(path.start_point(), Some(p), "{path_type}");
            assert_eq!(path.end_point(), Some(p), "{path_type}");
            assert!(path.label_point().is_finite(), "{path_type}");
        }
    }
}
