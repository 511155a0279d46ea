//! Curved routes.

use super::EdgePath;
use crate::{
    geometry::{Point, Side},
    path::PathData,
};

const CURVATURE: f32 = 0.25;
const SIMPLE_BEZIER_BULGE: f32 = 0.25;

/// Cubic route whose control points leave each anchor along its side.
pub(super) fn bezier(source: Point, source_side: Side, target: Point, target_side: Side) -> EdgePath {
    let control1 = control_point(source_side, source, target);
    let control2 = control_point(target_side, target, source);
    let data = PathData::new()
        .move_to(source)
        .cubic_to(control1, control2, target);
    EdgePath::new(data, cubic_at(source, control1, control2, target, 0.5))
}

/// Quadratic route with its single control point on the perpendicular
/// bisector of the anchors, bulging towards the source side.
pub(super) fn simple_bezier(source: Point, source_side: Side, target: Point) -> EdgePath {
    let mid = source.midpoint(target);
    let chord = target.sub_point(source);
    let length = chord.hypot();
    let control = if length > f32::EPSILON {
        let normal = Point::new(-chord.y() / length, chord.x() / length);
        let dir = source_side.direction();
        let sign = if normal.x() * dir.x() + normal.y() * dir.y() >= 0.0 {
            1.0
        } else {
            -1.0
        };
        mid.add_point(normal.scale(sign * SIMPLE_BEZIER_BULGE * length))
    } else {
        mid
    };
    let data = PathData::new().move_to(source).quad_to(control, target);
    // B(0.5) = (P0 + 2C + P2) / 4
    let label_point = source.add_point(control.scale(2.0)).add_point(target).scale(0.25);
    EdgePath::new(data, label_point)
}

/// Control point for the anchor at `from`, pushed out along `side`.
fn control_point(side: Side, from: Point, to: Point) -> Point {
    match side {
        Side::Left => from.with_x(from.x() - control_offset(from.x() - to.x())),
        Side::Right => from.with_x(from.x() + control_offset(to.x() - from.x())),
        Side::Top => from.with_y(from.y() - control_offset(from.y() - to.y())),
        Side::Bottom => from.with_y(from.y() + control_offset(to.y() - from.y())),
    }
}

/// Half the separation when the target lies ahead of the anchor, otherwise a
/// gentler square-root offset so backwards edges still loop outwards.
fn control_offset(distance: f32) -> f32 {
    if distance >= 0.0 {
        0.5 * distance
    } else {
        CURVATURE * 25.0 * (-distance).sqrt()
    }
}

fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x() + b * p1.x() + c * p2.x() + d * p3.x(),
        a * p0.y() + b * p1.y() + c * p2.y() + d * p3.y(),
    )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::path::PathCommand;

    #[test]
    fn test_bezier_controls_follow_sides() {
        let path = bezier(
            Point::new(0.0, 0.0),
            Side::Bottom,
            Point::new(0.0, 100.0),
            Side::Top,
        );
        let commands = path.data().commands();
        assert_eq!(
            commands[1],
            PathCommand::CubicTo {
                control1: Point::new(0.0, 50.0),
                control2: Point::new(0.0, 50.0),
                to: Point::new(0.0, 100.0),
            }
        );
        assert_eq!(path.label_point(), Point::new(0.0, 50.0));
    }

    #[test]
    fn test_bezier_backwards_offset() {
        // Target above a bottom anchor: control point still goes down
        let path = bezier(
            Point::new(0.0, 100.0),
            Side::Bottom,
            Point::new(0.0, 0.0),
            Side::Top,
        );
        let PathCommand::CubicTo { control1, .. } = path.data().commands()[1] else {
            panic!("expected a cubic segment");
        };
        assert_approx_eq!(f32, control1.y(), 100.0 + 0.25 * 25.0 * 10.0, ulps = 4);
    }

    #[test]
    fn test_bezier_label_is_curve_midpoint() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(200.0, 100.0);
        let path = bezier(source, Side::Right, target, Side::Left);
        // Controls at (100, 0) and (100, 100)
        assert_approx_eq!(f32, path.label_point().x(), 100.0, epsilon = 1e-4);
        assert_approx_eq!(f32, path.label_point().y(), 50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_simple_bezier_control_on_bisector() {
        let path = simple_bezier(Point::new(0.0, 0.0), Side::Top, Point::new(100.0, 0.0));
        let PathCommand::QuadTo { control, to } = path.data().commands()[1] else {
            panic!("expected a quadratic segment");
        };
        assert_eq!(to, Point::new(100.0, 0.0));
        assert_approx_eq!(f32, control.x(), 50.0);
        // Bulges upwards, towards the source side
        assert_approx_eq!(f32, control.y(), -25.0);
        assert_approx_eq!(f32, path.label_point().y(), -12.5);
    }
}
