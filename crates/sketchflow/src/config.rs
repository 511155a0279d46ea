//! Configuration types for the Sketchflow diagram engine.
//!
//! This module provides configuration structures that control viewport
//! limits, canvas behavior, export output and default edge styling. All types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`ViewportConfig`] - Zoom limits applied by the [`Viewport`](crate::model::Viewport).
//! - [`CanvasConfig`] - Snap grid and the self-loop policy for new edges.
//! - [`ExportConfig`] - Canvas size, raster scale, background and page width.
//! - [`StyleConfig`] - Defaults for newly connected edges.
//!
//! # Example
//!
//! ```
//! # use sketchflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().width(), 1024);
//! assert!(config.style().edge_color().is_ok());
//! ```

use serde::Deserialize;

use sketchflow_core::{color::Color, edge_path::PathType};

/// Top-level configuration combining all sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Viewport configuration section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        viewport: ViewportConfig,
        canvas: CanvasConfig,
        export: ExportConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            viewport,
            canvas,
            export,
            style,
        }
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Zoom limits for the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_zoom")]
    min_zoom: f32,

    #[serde(default = "default_max_zoom")]
    max_zoom: f32,
}

fn default_min_zoom() -> f32 {
    0.1
}

fn default_max_zoom() -> f32 {
    3.0
}

impl ViewportConfig {
    /// Creates a new [`ViewportConfig`].
    ///
    /// The limits are reordered if given backwards.
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        Self {
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: max_zoom.max(min_zoom),
        }
    }

    /// Returns the smallest allowed zoom factor.
    pub fn min_zoom(&self) -> f32 {
        self.min_zoom.min(self.max_zoom)
    }

    /// Returns the largest allowed zoom factor.
    pub fn max_zoom(&self) -> f32 {
        self.max_zoom.max(self.min_zoom)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(default_min_zoom(), default_max_zoom())
    }
}

/// Whether an edge may connect a node to itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// Self-loops are created like any other edge.
    #[default]
    Allow,
    /// Connections that end on their source node are aborted.
    Reject,
}

/// Canvas behavior for moves, drops and connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct CanvasConfig {
    /// Grid pitch in diagram units; positions are not snapped when unset.
    #[serde(default)]
    snap_grid: Option<f32>,

    #[serde(default)]
    self_loops: SelfLoopPolicy,
}

impl CanvasConfig {
    /// Creates a new [`CanvasConfig`].
    pub fn new(snap_grid: Option<f32>, self_loops: SelfLoopPolicy) -> Self {
        Self {
            snap_grid,
            self_loops,
        }
    }

    /// Returns the snap grid pitch, ignoring non-positive values.
    pub fn snap_grid(&self) -> Option<f32> {
        self.snap_grid.filter(|grid| grid.is_finite() && *grid > 0.0)
    }

    /// Returns the self-loop policy.
    pub fn self_loops(&self) -> SelfLoopPolicy {
        self.self_loops
    }
}

/// Output settings for every export format.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_width")]
    width: u32,

    #[serde(default = "default_export_height")]
    height: u32,

    #[serde(default = "default_raster_scale")]
    raster_scale: f32,

    /// Background color string, `#ffffff` by default.
    #[serde(default = "default_background")]
    background: String,

    #[serde(default = "default_page_width_mm")]
    page_width_mm: f32,
}

fn default_export_width() -> u32 {
    1024
}

fn default_export_height() -> u32 {
    768
}

fn default_raster_scale() -> f32 {
    2.0
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_page_width_mm() -> f32 {
    297.0
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Canvas size in CSS pixels.
    /// * `raster_scale` - Pixel density multiplier for raster output.
    /// * `background` - Background color string.
    /// * `page_width_mm` - Width of the document page in millimetres.
    pub fn new(
        width: u32,
        height: u32,
        raster_scale: f32,
        background: impl Into<String>,
        page_width_mm: f32,
    ) -> Self {
        Self {
            width,
            height,
            raster_scale,
            background: background.into(),
            page_width_mm,
        }
    }

    /// Returns the canvas width in CSS pixels, at least 1.
    pub fn width(&self) -> u32 {
        self.width.max(1)
    }

    /// Returns the canvas height in CSS pixels, at least 1.
    pub fn height(&self) -> u32 {
        self.height.max(1)
    }

    /// Returns the raster scale factor, falling back to 1 when invalid.
    pub fn raster_scale(&self) -> f32 {
        if self.raster_scale.is_finite() && self.raster_scale > 0.0 {
            self.raster_scale
        } else {
            1.0
        }
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background(&self) -> Result<Color, String> {
        Color::new(&self.background)
    }

    /// Returns the document page width in millimetres.
    pub fn page_width_mm(&self) -> f32 {
        self.page_width_mm
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(
            default_export_width(),
            default_export_height(),
            default_raster_scale(),
            default_background(),
            default_page_width_mm(),
        )
    }
}

/// Defaults applied to newly connected edges.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_edge_color")]
    edge_color: String,

    #[serde(default = "default_edge_width")]
    edge_width: f32,

    #[serde(default)]
    path_type: PathType,
}

fn default_edge_color() -> String {
    "#6366f1".to_string()
}

fn default_edge_width() -> f32 {
    2.0
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(edge_color: impl Into<String>, edge_width: f32, path_type: PathType) -> Self {
        Self {
            edge_color: edge_color.into(),
            edge_width,
            path_type,
        }
    }

    /// Returns the parsed default edge [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(&self.edge_color)
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn path_type(&self) -> PathType {
        self.path_type
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(default_edge_color(), default_edge_width(), PathType::default())
    }
}
