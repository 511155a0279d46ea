//! Declarative outline primitives produced by the shape renderer.

use crate::{
    geometry::{Bounds, Point, Size},
    path::PathData,
};

/// The silhouette of a shape in local coordinates.
///
/// Outlines are plain data; drawing them is the job of the
/// [`draw`](crate::draw) module.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// A closed polygon through the given vertices.
    Polygon(Vec<Point>),
    /// A circle; the renderer always produces a 1:1 box for it.
    Circle { center: Point, radius: f32 },
    /// A rectangle at the origin with rounded corners.
    RoundedRect { size: Size, radius: f32 },
    /// A filled body path plus optional stroke-only detail lines, such as the
    /// front rim of a database cylinder or the folded corner of a document.
    Compound {
        body: PathData,
        accents: Option<PathData>,
    },
}

impl Outline {
    /// Bounding box of the outline.
    ///
    /// Compound bodies report their control-point box, which contains the
    /// curve itself.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Polygon(points) => Bounds::from_points(points.iter().copied())
                .unwrap_or_default(),
            Self::Circle { center, radius } => {
                center.to_bounds(Size::square(radius * 2.0))
            }
            Self::RoundedRect { size, .. } => Bounds::new_from_top_left(Point::default(), *size),
            Self::Compound { body, .. } => body.control_bounds().unwrap_or_default(),
        }
    }

    /// Returns the SVG `points` attribute for polygons
    pub fn polygon_points_attr(points: &[Point]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Casts a ray from `origin` along `direction` and returns the farthest
/// crossing with the closed polygon, or `None` if the ray misses it.
pub(super) fn ray_exit(points: &[Point], origin: Point, direction: Point) -> Option<Point> {
    let mut best: Option<f32> = None;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let edge = b.sub_point(*a);
        let denom = cross(direction, edge);
        if denom.abs() < f32::EPSILON {
            continue;
        }
        let to_a = a.sub_point(origin);
        let t = cross(to_a, edge) / denom;
        let u = cross(to_a, direction) / denom;
        if t >= 0.0 && (-1e-5..=1.0 + 1e-5).contains(&u) {
            best = Some(best.map_or(t, |current: f32| current.max(t)));
        }
    }
    best.map(|t| origin.add_point(direction.scale(t)))
}

fn cross(a: Point, b: Point) -> f32 {
    a.x() * b.y() - a.y() * b.x()
}
