//! Orthogonal routing with rounded corners.
//!
//! The route leaves the source
//! anchor along its side for a fixed gap, bends through one or two corner
//! points, and enters the target anchor along its side after the same gap.
//! When the target lies behind the source the stubs point away from each
//! other and the detour takes four bends. Corners are rounded with a
//! quadratic segment whose size is capped by the border radius and by half of
//! each adjacent leg.

use super::EdgePath;
use crate::{
    geometry::{Point, Side},
    path::PathData,
};

/// Length of the straight stub leaving and entering each anchor
pub const SMOOTHSTEP_OFFSET: f32 = 20.0;

/// Corner radius of each bend
pub const SMOOTHSTEP_BORDER_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of_side(side: Side) -> Self {
        if side.is_horizontal() { Self::X } else { Self::Y }
    }

    fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn get(self, p: Point) -> f32 {
        match self {
            Self::X => p.x(),
            Self::Y => p.y(),
        }
    }

    fn unit(self, value: f32) -> Point {
        match self {
            Self::X => Point::new(value, 0.0),
            Self::Y => Point::new(0.0, value),
        }
    }

    /// Signed component (-1, 0 or 1) of a side's direction along this axis
    fn sign(self, side: Side) -> i8 {
        match (self, side) {
            (Self::X, Side::Right) | (Self::Y, Side::Bottom) => 1,
            (Self::X, Side::Left) | (Self::Y, Side::Top) => -1,
            _ => 0,
        }
    }
}

pub(super) fn smoothstep(source: Point, source_side: Side, target: Point, target_side: Side) -> EdgePath {
    let (points, label_point) = route(source, source_side, target, target_side, SMOOTHSTEP_OFFSET);

    let last = points.len() - 1;
    let mut data = PathData::new().move_to(points[0]);
    for i in 1..last {
        data = bend(data, points[i - 1], points[i], points[i + 1], SMOOTHSTEP_BORDER_RADIUS);
    }
    data = data.line_to(points[last]);
    EdgePath::new(data, label_point)
}

/// Computes the polyline through the anchors, stubs and corners, plus the
/// label position.
fn route(
    source: Point,
    source_side: Side,
    target: Point,
    target_side: Side,
    offset: f32,
) -> (Vec<Point>, Point) {
    let source_gapped = source.add_point(source_side.direction().scale(offset));
    let target_gapped = target.add_point(target_side.direction().scale(offset));

    let axis = Axis::of_side(source_side);
    let heading: i8 = if axis.get(source_gapped) < axis.get(target_gapped) {
        1
    } else {
        -1
    };
    let source_sign = axis.sign(source_side);
    let target_sign = axis.sign(target_side);

    let mut source_gap_offset = Point::default();
    let mut target_gap_offset = Point::default();
    let corners: Vec<Point>;
    let label_point;

    if source_sign * target_sign == -1 {
        // Facing sides: split halfway between the anchors
        let center = source.midpoint(target);
        let vertical_split = vec![
            Point::new(center.x(), source_gapped.y()),
            Point::new(center.x(), target_gapped.y()),
        ];
        let horizontal_split = vec![
            Point::new(source_gapped.x(), center.y()),
            Point::new(target_gapped.x(), center.y()),
        ];
        corners = match (source_sign == heading, axis) {
            (true, Axis::X) | (false, Axis::Y) => vertical_split,
            (true, Axis::Y) | (false, Axis::X) => horizontal_split,
        };
        label_point = center;
    } else {
        // Single corner: x from one stub and y from the other
        let source_target = Point::new(source_gapped.x(), target_gapped.y());
        let target_source = Point::new(target_gapped.x(), source_gapped.y());
        let mut corner = match axis {
            Axis::X if source_sign == heading => target_source,
            Axis::X => source_target,
            Axis::Y if source_sign == heading => source_target,
            Axis::Y => target_source,
        };

        if source_side == target_side {
            // Same-side anchors closer than the stub would overlap the corner
            let diff = (axis.get(source) - axis.get(target)).abs();
            if diff <= offset {
                let gap = (offset - 1.0).min(offset - diff);
                if source_sign == heading {
                    let sign = if axis.get(source_gapped) > axis.get(source) { -1.0 } else { 1.0 };
                    source_gap_offset = axis.unit(sign * gap);
                } else {
                    let sign = if axis.get(target_gapped) > axis.get(target) { -1.0 } else { 1.0 };
                    target_gap_offset = axis.unit(sign * gap);
                }
            }
        } else {
            let cross = axis.other();
            let same_heading = source_sign == cross.sign(target_side);
            let source_greater = cross.get(source_gapped) > cross.get(target_gapped);
            let source_less = cross.get(source_gapped) < cross.get(target_gapped);
            let flip = if source_sign == 1 {
                (!same_heading && source_greater) || (same_heading && source_less)
            } else {
                (!same_heading && source_less) || (same_heading && source_greater)
            };
            if flip {
                corner = match axis {
                    Axis::X => source_target,
                    Axis::Y => target_source,
                };
            }
        }

        let source_gap = source_gapped.add_point(source_gap_offset);
        let target_gap = target_gapped.add_point(target_gap_offset);
        let max_x = (source_gap.x() - corner.x())
            .abs()
            .max((target_gap.x() - corner.x()).abs());
        let max_y = (source_gap.y() - corner.y())
            .abs()
            .max((target_gap.y() - corner.y()).abs());
        // Label sits on the longest leg
        label_point = if max_x >= max_y {
            Point::new((source_gap.x() + target_gap.x()) / 2.0, corner.y())
        } else {
            Point::new(corner.x(), (source_gap.y() + target_gap.y()) / 2.0)
        };
        corners = vec![corner];
    }

    let mut points = Vec::with_capacity(corners.len() + 4);
    points.push(source);
    points.push(source_gapped.add_point(source_gap_offset));
    points.extend(corners);
    points.push(target_gapped.add_point(target_gap_offset));
    points.push(target);
    (points, label_point)
}

/// Appends the segment into corner `b` coming from `a` and heading to `c`.
fn bend(data: PathData, a: Point, b: Point, c: Point, radius: f32) -> PathData {
    let size = (a.distance(b) / 2.0).min(b.distance(c) / 2.0).min(radius);
    let (x, y) = (b.x(), b.y());

    let collinear = (same(a.x(), x) && same(x, c.x())) || (same(a.y(), y) && same(y, c.y()));
    if collinear {
        return data.line_to(b);
    }

    if same(a.y(), y) {
        // Arriving horizontally
        let x_dir = if a.x() < c.x() { -1.0 } else { 1.0 };
        let y_dir = if a.y() < c.y() { 1.0 } else { -1.0 };
        data.line_to(Point::new(x + size * x_dir, y))
            .quad_to(b, Point::new(x, y + size * y_dir))
    } else {
        let x_dir = if a.x() < c.x() { 1.0 } else { -1.0 };
        let y_dir = if a.y() < c.y() { -1.0 } else { 1.0 };
        data.line_to(Point::new(x, y + size * y_dir))
            .quad_to(b, Point::new(x + size * x_dir, y))
    }
}

fn same(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    fn quad_count(path: &EdgePath) -> usize {
        path.data()
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
            .count()
    }

    #[test]
    fn test_vertical_aligned_is_straight() {
        let path = smoothstep(
            Point::new(50.0, 50.0),
            Side::Bottom,
            Point::new(50.0, 200.0),
            Side::Top,
        );
        assert_eq!(quad_count(&path), 0);
        assert_eq!(path.start_point(), Some(Point::new(50.0, 50.0)));
        assert_eq!(path.end_point(), Some(Point::new(50.0, 200.0)));
        assert_eq!(path.label_point(), Point::new(50.0, 125.0));
    }

    #[test]
    fn test_bottom_to_top_offset_makes_two_bends() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 200.0);
        let (points, label) = route(source, Side::Bottom, target, Side::Top, SMOOTHSTEP_OFFSET);
        assert_eq!(
            points,
            vec![
                source,
                Point::new(0.0, 20.0),
                Point::new(0.0, 100.0),
                Point::new(100.0, 100.0),
                Point::new(100.0, 180.0),
                target,
            ]
        );
        assert_eq!(label, Point::new(50.0, 100.0));

        let path = smoothstep(source, Side::Bottom, target, Side::Top);
        assert_eq!(quad_count(&path), 2);
    }

    #[test]
    fn test_right_to_top_uses_one_corner() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(200.0, 100.0);
        let (points, _) = route(source, Side::Right, target, Side::Top, SMOOTHSTEP_OFFSET);
        assert_eq!(points.len(), 5);
        assert_eq!(points[2], Point::new(200.0, 0.0));
    }

    #[test]
    fn test_corner_size_limited_by_leg() {
        // Legs shorter than twice the radius shrink the corner
        let path = smoothstep(
            Point::new(0.0, 0.0),
            Side::Bottom,
            Point::new(4.0, 60.0),
            Side::Top,
        );
        for command in path.data().commands() {
            if let PathCommand::QuadTo { control, to } = command {
                assert!(control.distance(*to) <= 2.0 + 1e-4);
            }
        }
    }

    #[test]
    fn test_backward_route_detours_around_both_stubs() {
        // Target behind the source: both stubs point away, so four bends
        let source = Point::new(100.0, 200.0);
        let target = Point::new(0.0, 0.0);
        let (points, _) = route(source, Side::Bottom, target, Side::Top, SMOOTHSTEP_OFFSET);
        assert_eq!(
            points,
            vec![
                source,
                Point::new(100.0, 220.0),
                Point::new(50.0, 220.0),
                Point::new(50.0, -20.0),
                Point::new(0.0, -20.0),
                target,
            ]
        );

        let path = smoothstep(source, Side::Bottom, target, Side::Top);
        assert_eq!(quad_count(&path), 4);
        assert_eq!(path.start_point(), Some(source));
        assert_eq!(path.end_point(), Some(target));
    }
}
