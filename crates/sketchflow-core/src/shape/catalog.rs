//! Geometry functions for every built-in shape kind.
//!
//! Each function receives an already sanitized, strictly positive size.

use std::f32::consts::PI;

use super::{
    Anchors, Outline, ShapeGeometry, ShapeKind, ShapeStyle,
    outline::ray_exit,
};
use crate::{
    geometry::{Point, Side, Size},
    path::PathData,
};

const DEFAULT_CORNER_RADIUS: f32 = 8.0;
const OFFSET_ANCHOR_INSET: f32 = 20.0;
const STAR_INNER_RATIO: f32 = 0.4;

pub(super) fn rectangle(size: Size, style: &ShapeStyle) -> ShapeGeometry {
    let radius = style.corner_radius().unwrap_or(DEFAULT_CORNER_RADIUS);
    rounded_rect(ShapeKind::Rectangle, size, radius)
}

pub(super) fn terminator(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    rounded_rect(ShapeKind::Terminator, size, size.height() / 2.0)
}

pub(super) fn text(size: Size, style: &ShapeStyle) -> ShapeGeometry {
    rounded_rect(ShapeKind::Text, size, style.corner_radius().unwrap_or(0.0))
}

pub(super) fn image(size: Size, style: &ShapeStyle) -> ShapeGeometry {
    rounded_rect(ShapeKind::Image, size, style.corner_radius().unwrap_or(4.0))
}

pub(super) fn mindmap_node(size: Size, style: &ShapeStyle) -> ShapeGeometry {
    rounded_rect(
        ShapeKind::MindmapNode,
        size,
        style.corner_radius().unwrap_or(12.0),
    )
}

pub(super) fn circle(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let side = size.min_side();
    let footprint = Size::square(side);
    let center = footprint.center();
    let radius = side / 2.0;
    let anchors = Anchors::new(
        Point::new(center.x(), 0.0),
        Point::new(side, center.y()),
        Point::new(center.x(), side),
        Point::new(0.0, center.y()),
    );
    ShapeGeometry::new(
        ShapeKind::Circle,
        footprint,
        Outline::Circle { center, radius },
        anchors,
        center,
    )
}

/// A square rotated by 45 degrees, so the label stays upright.
pub(super) fn diamond(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let side = size.min_side();
    let half = side / 2.0;
    let points = vec![
        Point::new(half, 0.0),
        Point::new(side, half),
        Point::new(half, side),
        Point::new(0.0, half),
    ];
    let anchors = Anchors::new(points[0], points[1], points[2], points[3]);
    ShapeGeometry::new(
        ShapeKind::Diamond,
        Size::square(side),
        Outline::Polygon(points),
        anchors,
        Point::new(half, half),
    )
}

pub(super) fn triangle(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let points = vec![Point::new(w / 2.0, 0.0), Point::new(w, h), Point::new(0.0, h)];
    polygon(
        ShapeKind::Triangle,
        size,
        points,
        Point::new(w / 2.0, h * 0.62),
    )
}

pub(super) fn hexagon(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let points = vec![
        Point::new(w * 0.25, 0.0),
        Point::new(w * 0.75, 0.0),
        Point::new(w, h / 2.0),
        Point::new(w * 0.75, h),
        Point::new(w * 0.25, h),
        Point::new(0.0, h / 2.0),
    ];
    polygon(ShapeKind::Hexagon, size, points, size.center())
}

pub(super) fn pentagon(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let points = vec![
        Point::new(w / 2.0, 0.0),
        Point::new(w, h * 0.38),
        Point::new(w * 0.82, h),
        Point::new(w * 0.18, h),
        Point::new(0.0, h * 0.38),
    ];
    polygon(
        ShapeKind::Pentagon,
        size,
        points,
        Point::new(w / 2.0, h * 0.55),
    )
}

pub(super) fn parallelogram(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let skew = w / 6.0;
    let points = vec![
        Point::new(skew, 0.0),
        Point::new(w, 0.0),
        Point::new(w - skew, h),
        Point::new(0.0, h),
    ];
    polygon(ShapeKind::Parallelogram, size, points, size.center())
}

/// Five-pointed star inscribed in the largest centered square.
pub(super) fn star(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let center = size.center();
    let outer = size.min_side() / 2.0;
    let inner = outer * STAR_INNER_RATIO;
    let points = (0..10)
        .map(|i| {
            let angle = -PI / 2.0 + i as f32 * PI / 5.0;
            let radius = if i % 2 == 0 { outer } else { inner };
            let p = Point::new(
                center.x() + radius * angle.cos(),
                center.y() + radius * angle.sin(),
            );
            clamp_into(p, size)
        })
        .collect();
    polygon(ShapeKind::Star, size, points, center)
}

pub(super) fn arrow_up(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    block_arrow(ShapeKind::ArrowUp, size, Side::Top)
}

pub(super) fn arrow_down(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    block_arrow(ShapeKind::ArrowDown, size, Side::Bottom)
}

pub(super) fn arrow_left(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    block_arrow(ShapeKind::ArrowLeft, size, Side::Left)
}

pub(super) fn arrow_right(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    block_arrow(ShapeKind::ArrowRight, size, Side::Right)
}

/// Cylinder: a body with elliptical caps and the front rim of the lid as accent.
pub(super) fn database(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let ry = (h * 0.15).min(w * 0.25);
    let radii = Size::new(w / 2.0, ry);
    let body = PathData::new()
        .move_to(Point::new(0.0, ry))
        .arc_to(radii, false, true, Point::new(w, ry))
        .line_to(Point::new(w, h - ry))
        .arc_to(radii, false, true, Point::new(0.0, h - ry))
        .close();
    let rim = PathData::new()
        .move_to(Point::new(0.0, ry))
        .arc_to(radii, false, false, Point::new(w, ry));
    ShapeGeometry::new(
        ShapeKind::Database,
        size,
        Outline::Compound {
            body,
            accents: Some(rim),
        },
        box_midpoints(size),
        Point::new(w / 2.0, (h + ry) / 2.0),
    )
}

/// Page with a folded top-right corner.
pub(super) fn document(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let (w, h) = (size.width(), size.height());
    let fold_x = w * 0.85;
    let fold_y = h * 0.15;
    let body = PathData::new()
        .move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(fold_x, 0.0))
        .line_to(Point::new(w, fold_y))
        .line_to(Point::new(w, h))
        .line_to(Point::new(0.0, h))
        .close();
    let fold = PathData::new()
        .move_to(Point::new(fold_x, 0.0))
        .line_to(Point::new(fold_x, fold_y))
        .line_to(Point::new(w, fold_y));
    ShapeGeometry::new(
        ShapeKind::Document,
        size,
        Outline::Compound {
            body,
            accents: Some(fold),
        },
        box_midpoints(size),
        Point::new(w / 2.0, (h + fold_y) / 2.0),
    )
}

/// Cloud silhouette built from quadratic lobes.
pub(super) fn cloud(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let at = |fx: f32, fy: f32| Point::new(size.width() * fx, size.height() * fy);
    let body = PathData::new()
        .move_to(at(0.111, 0.6))
        .quad_to(at(0.111, 0.2), at(0.333, 0.2))
        .quad_to(at(0.444, 0.0), at(0.667, 0.1))
        .quad_to(at(0.889, 0.2), at(0.889, 0.5))
        .quad_to(at(1.0, 0.6), at(0.889, 0.8))
        .quad_to(at(0.778, 1.0), at(0.556, 0.9))
        .quad_to(at(0.333, 1.0), at(0.111, 0.8))
        .quad_to(at(0.0, 0.7), at(0.111, 0.6))
        .close();
    // Points where the lobes reach furthest along each axis
    let anchors = Anchors::new(at(0.472, 0.075), at(0.944, 0.625), at(0.75, 0.925), at(0.056, 0.7));
    ShapeGeometry::new(
        ShapeKind::Cloud,
        size,
        Outline::Compound {
            body,
            accents: None,
        },
        anchors,
        at(0.5, 0.55),
    )
}

pub(super) fn heart(size: Size, _style: &ShapeStyle) -> ShapeGeometry {
    let at = |fx: f32, fy: f32| Point::new(size.width() * fx, size.height() * fy);
    let body = PathData::new()
        .move_to(at(0.5, 0.25))
        .cubic_to(at(0.5, 0.0), at(0.0, 0.0), at(0.0, 0.3))
        .cubic_to(at(0.0, 0.6), at(0.35, 0.75), at(0.5, 1.0))
        .cubic_to(at(0.65, 0.75), at(1.0, 0.6), at(1.0, 0.3))
        .cubic_to(at(1.0, 0.0), at(0.5, 0.0), at(0.5, 0.25))
        .close();
    let anchors = Anchors::new(at(0.5, 0.25), at(1.0, 0.3), at(0.5, 1.0), at(0.0, 0.3));
    ShapeGeometry::new(
        ShapeKind::Heart,
        size,
        Outline::Compound {
            body,
            accents: None,
        },
        anchors,
        at(0.5, 0.45),
    )
}

fn rounded_rect(kind: ShapeKind, size: Size, radius: f32) -> ShapeGeometry {
    let radius = radius.clamp(0.0, size.min_side() / 2.0);
    let (w, h) = (size.width(), size.height());
    let inset = OFFSET_ANCHOR_INSET.min(w / 4.0);
    let anchors = box_midpoints(size)
        .with_offset_anchors(Point::new(w - inset, 0.0), Point::new(inset, h));
    ShapeGeometry::new(
        kind,
        size,
        Outline::RoundedRect { size, radius },
        anchors,
        size.center(),
    )
}

fn polygon(kind: ShapeKind, size: Size, points: Vec<Point>, label_center: Point) -> ShapeGeometry {
    let anchors = polygon_anchors(&points, size);
    ShapeGeometry::new(kind, size, Outline::Polygon(points), anchors, label_center)
}

/// Anchors where rays from the box center leave the polygon.
fn polygon_anchors(points: &[Point], size: Size) -> Anchors {
    let center = size.center();
    let fallback = box_midpoints(size);
    let exit = |side: Side, default: Point| {
        ray_exit(points, center, side.direction())
            .map(|p| clamp_into(p, size))
            .unwrap_or(default)
    };
    Anchors::new(
        exit(Side::Top, fallback.top()),
        exit(Side::Right, fallback.right()),
        exit(Side::Bottom, fallback.bottom()),
        exit(Side::Left, fallback.left()),
    )
}

fn box_midpoints(size: Size) -> Anchors {
    let (w, h) = (size.width(), size.height());
    Anchors::new(
        Point::new(w / 2.0, 0.0),
        Point::new(w, h / 2.0),
        Point::new(w / 2.0, h),
        Point::new(0.0, h / 2.0),
    )
}

/// A block arrow pointing towards `towards`; the head takes 40% of the length.
fn block_arrow(kind: ShapeKind, size: Size, towards: Side) -> ShapeGeometry {
    // Laid out pointing right in a length x breadth box, then mapped
    let (length, breadth) = if towards.is_horizontal() {
        (size.width(), size.height())
    } else {
        (size.height(), size.width())
    };
    let neck = length * 0.6;
    let template = [
        (0.0, breadth * 0.3),
        (neck, breadth * 0.3),
        (neck, 0.0),
        (length, breadth / 2.0),
        (neck, breadth),
        (neck, breadth * 0.7),
        (0.0, breadth * 0.7),
    ];
    let points = template
        .into_iter()
        .map(|(along, across)| match towards {
            Side::Right => Point::new(along, across),
            Side::Left => Point::new(length - along, across),
            Side::Bottom => Point::new(across, along),
            Side::Top => Point::new(across, length - along),
        })
        .collect();
    polygon(kind, size, points, size.center())
}

fn clamp_into(point: Point, size: Size) -> Point {
    Point::new(
        point.x().clamp(0.0, size.width()),
        point.y().clamp(0.0, size.height()),
    )
}
