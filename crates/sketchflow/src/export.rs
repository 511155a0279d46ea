//! The Export Pipeline.
//!
//! Every export starts from a [`Snapshot`] taken when the export is
//! requested, so edits made while a capture is in flight never reach the
//! output.
//!
//! ```text
//! Snapshot ──► JSON
//!     │
//!     └─► SVG scene ──► SVG
//!             │
//!             └─► CaptureTask (worker thread) ──► PNG ──► PDF page
//! ```
//!
//! JSON and SVG are produced synchronously. PNG and PDF go through the
//! asynchronous [`CaptureTask`]; a failed capture yields
//! [`ExportError::CaptureFailure`] and no file.

mod file;
mod json;
mod pdf;
mod raster;
mod scene;
mod sink;

use std::sync::Arc;

use log::{error, info};

pub use file::{ExportFile, ExportFormat, file_name};
pub use json::{diagram_from_json, snapshot_from_json, snapshot_to_json};
pub use pdf::{PageSize, page_document, png_to_pdf};
pub use raster::{CaptureRequest, CaptureTask, RasterImage, Rasterizer, ResvgRasterizer};
pub use scene::{SceneRenderer, SceneSpace};
pub use sink::{DirectorySink, DownloadSink, MemorySink};

use crate::{config::ExportConfig, error::ExportError, model::Snapshot};

/// Produces [`ExportFile`]s from snapshots.
#[derive(Clone)]
pub struct Exporter {
    config: ExportConfig,
    scene: SceneRenderer,
    rasterizer: Arc<dyn Rasterizer>,
}

impl Exporter {
    /// Creates an exporter rendering bitmaps with [`ResvgRasterizer`].
    pub fn new(config: ExportConfig) -> Self {
        Self::with_rasterizer(config, Arc::new(ResvgRasterizer))
    }

    /// Creates an exporter with a custom capture backend.
    pub fn with_rasterizer(config: ExportConfig, rasterizer: Arc<dyn Rasterizer>) -> Self {
        let scene = SceneRenderer::new(&config);
        Self {
            config,
            scene,
            rasterizer,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports the structured snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if serialization fails.
    pub fn export_json(&self, snapshot: &Snapshot) -> Result<ExportFile, ExportError> {
        let file = ExportFile::new(ExportFormat::Json, snapshot_to_json(snapshot)?);
        info!(file_name = file.name(); "Structured snapshot exported");
        Ok(file)
    }

    /// Exports the vector scene in diagram coordinates.
    pub fn export_svg(&self, snapshot: &Snapshot) -> Result<ExportFile, ExportError> {
        let svg = self.scene.render_to_string(snapshot, SceneSpace::Diagram);
        let file = ExportFile::new(ExportFormat::Svg, svg.into_bytes());
        info!(file_name = file.name(); "Vector scene exported");
        Ok(file)
    }

    /// Starts capturing the scene of `snapshot` as a bitmap.
    ///
    /// The scene is rendered before this returns; only rasterization runs
    /// in the background.
    pub fn capture(&self, snapshot: &Snapshot) -> CaptureTask {
        let request = CaptureRequest::new(
            self.scene.render_to_string(snapshot, SceneSpace::Screen),
            self.scene.width(),
            self.scene.height(),
            self.config.raster_scale(),
        );
        CaptureTask::spawn(Arc::clone(&self.rasterizer), request)
    }

    /// Exports a raster image.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::CaptureFailure`] or another capture error if
    /// the bitmap could not be produced.
    pub async fn export_png(&self, snapshot: &Snapshot) -> Result<ExportFile, ExportError> {
        let image = self.capture(snapshot).await.inspect_err(|err| {
            error!(err:%; "Raster export failed");
        })?;
        let file = ExportFile::new(ExportFormat::Png, image.into_png());
        info!(file_name = file.name(); "Raster image exported");
        Ok(file)
    }

    /// Exports a one-page document containing the raster image.
    ///
    /// # Errors
    ///
    /// Fails like [`Exporter::export_png`], or with
    /// [`ExportError::Encode`] if the page cannot be built.
    pub async fn export_pdf(&self, snapshot: &Snapshot) -> Result<ExportFile, ExportError> {
        let image = self.capture(snapshot).await.inspect_err(|err| {
            error!(err:%; "Document export failed during capture");
        })?;
        let pdf = png_to_pdf(&image, self.config.page_width_mm())?;
        let file = ExportFile::new(ExportFormat::Pdf, pdf);
        info!(file_name = file.name(); "Document exported");
        Ok(file)
    }

    /// Exports `snapshot` in `format`.
    ///
    /// # Errors
    ///
    /// See the format-specific methods.
    pub async fn export(
        &self,
        format: ExportFormat,
        snapshot: &Snapshot,
    ) -> Result<ExportFile, ExportError> {
        match format {
            ExportFormat::Json => self.export_json(snapshot),
            ExportFormat::Svg => self.export_svg(snapshot),
            ExportFormat::Png => self.export_png(snapshot).await,
            ExportFormat::Pdf => self.export_pdf(snapshot).await,
        }
    }

    /// Exports `snapshot` and hands the file to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the export error, or the sink's error if delivery fails.
    pub async fn export_to(
        &self,
        format: ExportFormat,
        snapshot: &Snapshot,
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportFile, ExportError> {
        let file = self.export(format, snapshot).await?;
        sink.deliver(&file)?;
        Ok(file)
    }
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("config", &self.config)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}
