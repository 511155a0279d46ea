//! The pan/zoom transform between diagram space and screen space.

use log::trace;
use serde::{Deserialize, Serialize};

use sketchflow_core::geometry::Point;

use crate::config::ViewportConfig;

/// An affine transform `screen = diagram * zoom + (x, y)`.
///
/// Zoom is kept inside the configured limits by every mutating method.
/// The limits themselves are runtime configuration and are not serialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    x: f32,
    y: f32,
    zoom: f32,
    #[serde(skip)]
    limits: ViewportConfig,
}

impl Viewport {
    /// Creates a viewport with the default zoom limits.
    pub fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self::default().with_pan(x, y).with_zoom(zoom)
    }

    /// Applies new limits, clamping the current zoom into them.
    pub fn with_limits(mut self, limits: ViewportConfig) -> Self {
        self.limits = limits;
        self.zoom = self.clamp_zoom(self.zoom);
        self
    }

    fn with_pan(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = self.clamp_zoom(zoom);
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// The pan offset as a point
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn limits(&self) -> &ViewportConfig {
        &self.limits
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_finite() {
            zoom.clamp(self.limits.min_zoom(), self.limits.max_zoom())
        } else {
            1.0_f32.clamp(self.limits.min_zoom(), self.limits.max_zoom())
        }
    }

    /// Maps a screen point to diagram space: `(p - offset) / zoom`.
    pub fn screen_to_diagram(&self, point: Point) -> Point {
        point.sub_point(self.offset()).scale(1.0 / self.zoom)
    }

    /// Maps a diagram point to screen space: `p * zoom + offset`.
    pub fn diagram_to_screen(&self, point: Point) -> Point {
        point.scale(self.zoom).add_point(self.offset())
    }

    /// Moves the view by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.x += delta.x();
        self.y += delta.y();
        trace!(x = self.x, y = self.y; "Viewport panned");
    }

    /// Sets the zoom, clamped to the limits, and returns the applied value.
    pub fn zoom_to(&mut self, zoom: f32) -> f32 {
        self.zoom = self.clamp_zoom(zoom);
        trace!(zoom = self.zoom; "Viewport zoomed");
        self.zoom
    }

    /// Multiplies the zoom by `factor` while keeping the diagram point under
    /// `screen_point` fixed on screen.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f32) -> f32 {
        let anchor = self.screen_to_diagram(screen_point);
        let zoom = self.zoom_to(self.zoom * factor);
        self.x = screen_point.x() - anchor.x() * zoom;
        self.y = screen_point.y() - anchor.y() * zoom;
        zoom
    }

    /// The SVG `transform` attribute applying this viewport.
    pub fn to_svg_transform(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            limits: ViewportConfig::default(),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn check_inverse_transform(x: f32, y: f32, zoom: f32, px: f32, py: f32) {
        let viewport = Viewport::new(x, y, zoom);
        let point = Point::new(px, py);
        let round = viewport.screen_to_diagram(viewport.diagram_to_screen(point));
        let tolerance = 1e-3 * (1.0 + px.abs().max(py.abs()));
        assert_approx_eq!(f32, round.x(), px, epsilon = tolerance);
        assert_approx_eq!(f32, round.y(), py, epsilon = tolerance);
    }

    proptest! {
        #[test]
        fn prop_inverse_transform(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            zoom in 0.1f32..3.0,
            px in -5000.0f32..5000.0,
            py in -5000.0f32..5000.0,
        ) {
            check_inverse_transform(x, y, zoom, px, py);
        }

        #[test]
        fn prop_zoom_stays_in_limits(zoom in -10.0f32..10.0) {
            let mut viewport = Viewport::default();
            let applied = viewport.zoom_to(zoom);
            prop_assert!((0.1..=3.0).contains(&applied));
        }
    }
}
