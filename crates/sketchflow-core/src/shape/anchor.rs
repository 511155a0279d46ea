//! Connection anchors exposed by every rendered shape.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Side};

/// Names a connection point on a shape.
///
/// The four primary anchors exist on every shape. The two offset anchors are
/// only offered by rectangle-family outlines; see [`Anchors::resolve`] for
/// how they degrade on other shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorId {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomLeft,
}

impl AnchorId {
    /// Every anchor name, primary anchors first
    pub const ALL: [AnchorId; 6] = [
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
        Self::TopRight,
        Self::BottomLeft,
    ];

    /// The side an edge leaves or enters through at this anchor
    pub fn side(self) -> Side {
        match self {
            Self::Top | Self::TopRight => Side::Top,
            Self::Right => Side::Right,
            Self::Bottom | Self::BottomLeft => Side::Bottom,
            Self::Left => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("invalid anchor `{s}`"))
    }
}

/// The anchor points of a rendered shape, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    top: Point,
    right: Point,
    bottom: Point,
    left: Point,
    top_right: Option<Point>,
    bottom_left: Option<Point>,
}

impl Anchors {
    /// Creates the four primary anchors
    pub fn new(top: Point, right: Point, bottom: Point, left: Point) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            top_right: None,
            bottom_left: None,
        }
    }

    /// Adds the two offset anchors used by rectangle-family shapes
    pub fn with_offset_anchors(mut self, top_right: Point, bottom_left: Point) -> Self {
        self.top_right = Some(top_right);
        self.bottom_left = Some(bottom_left);
        self
    }

    pub fn top(&self) -> Point {
        self.top
    }

    pub fn right(&self) -> Point {
        self.right
    }

    pub fn bottom(&self) -> Point {
        self.bottom
    }

    pub fn left(&self) -> Point {
        self.left
    }

    pub fn top_right(&self) -> Option<Point> {
        self.top_right
    }

    pub fn bottom_left(&self) -> Option<Point> {
        self.bottom_left
    }

    /// Looks up an anchor; `None` when the shape does not offer it
    pub fn get(&self, id: AnchorId) -> Option<Point> {
        match id {
            AnchorId::Top => Some(self.top),
            AnchorId::Right => Some(self.right),
            AnchorId::Bottom => Some(self.bottom),
            AnchorId::Left => Some(self.left),
            AnchorId::TopRight => self.top_right,
            AnchorId::BottomLeft => self.bottom_left,
        }
    }

    /// Looks up an anchor, substituting the primary anchor on the same side
    /// when an offset anchor is missing.
    pub fn resolve(&self, id: AnchorId) -> Point {
        self.get(id).unwrap_or(match id.side() {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        })
    }

    /// Iterates every anchor the shape offers
    pub fn iter(&self) -> impl Iterator<Item = (AnchorId, Point)> + '_ {
        AnchorId::ALL
            .into_iter()
            .filter_map(|id| self.get(id).map(|p| (id, p)))
    }

    /// Returns the anchors moved by `offset`
    pub fn translate(&self, offset: Point) -> Self {
        let t = |p: Point| p.add_point(offset);
        Self {
            top: t(self.top),
            right: t(self.right),
            bottom: t(self.bottom),
            left: t(self.left),
            top_right: self.top_right.map(t),
            bottom_left: self.bottom_left.map(t),
        }
    }

    /// Finds the anchor nearest to `point`, used for hit-testing drops of a
    /// connection onto a shape.
    pub fn nearest(&self, point: Point) -> (AnchorId, Point) {
        self.iter()
            .min_by(|(_, a), (_, b)| a.distance(point).total_cmp(&b.distance(point)))
            .unwrap_or((AnchorId::Top, self.top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Anchors {
        Anchors::new(
            Point::new(50.0, 0.0),
            Point::new(100.0, 25.0),
            Point::new(50.0, 50.0),
            Point::new(0.0, 25.0),
        )
    }

    #[test]
    fn test_anchor_id_round_trip() {
        for id in AnchorId::ALL {
            assert_eq!(id.as_str().parse::<AnchorId>().unwrap(), id);
        }
        assert!("middle".parse::<AnchorId>().is_err());
    }

    #[test]
    fn test_anchor_sides() {
        assert_eq!(AnchorId::TopRight.side(), Side::Top);
        assert_eq!(AnchorId::BottomLeft.side(), Side::Bottom);
        assert_eq!(AnchorId::Left.side(), Side::Left);
    }

    #[test]
    fn test_offset_anchors_missing_by_default() {
        let anchors = sample();
        assert_eq!(anchors.get(AnchorId::TopRight), None);
        assert_eq!(anchors.resolve(AnchorId::TopRight), anchors.top());
        assert_eq!(anchors.resolve(AnchorId::BottomLeft), anchors.bottom());
        assert_eq!(anchors.iter().count(), 4);
    }

    #[test]
    fn test_offset_anchors_present() {
        let anchors = sample().with_offset_anchors(Point::new(80.0, 0.0), Point::new(20.0, 50.0));
        assert_eq!(anchors.resolve(AnchorId::TopRight), Point::new(80.0, 0.0));
        assert_eq!(anchors.iter().count(), 6);
    }

    #[test]
    fn test_translate_and_nearest() {
        let anchors = sample().translate(Point::new(10.0, 10.0));
        assert_eq!(anchors.top(), Point::new(60.0, 10.0));

        let (id, point) = anchors.nearest(Point::new(105.0, 40.0));
        assert_eq!(id, AnchorId::Right);
        assert_eq!(point, Point::new(110.0, 35.0));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&AnchorId::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");
    }
}
