//! Raster capture.
//!
//! Capturing is the asynchronous stage of the pipeline. The SVG scene is
//! rendered synchronously from a snapshot, then a [`CaptureTask`] turns it
//! into a PNG on a worker thread and resolves once the bitmap is ready or
//! the capture has failed.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    thread,
};

use futures::channel::oneshot;
use log::{debug, error};

use crate::error::ExportError;

/// A PNG bitmap and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    /// Encoded PNG bytes
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// What to capture: SVG text drawn on a `width × height` canvas, scaled by
/// `scale` into the bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    svg: String,
    width: u32,
    height: u32,
    scale: f32,
}

impl CaptureRequest {
    pub fn new(svg: String, width: u32, height: u32, scale: f32) -> Self {
        Self {
            svg,
            width,
            height,
            scale,
        }
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Bitmap size in pixels, at least one pixel on each axis.
    pub fn pixel_size(&self) -> (u32, u32) {
        let scaled = |length: u32| ((length as f32 * self.scale).round() as u32).max(1);
        (scaled(self.width), scaled(self.height))
    }
}

/// Turns SVG text into a bitmap.
pub trait Rasterizer: Send + Sync {
    /// Renders `request` synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Scene`] if the SVG cannot be parsed,
    /// [`ExportError::CaptureFailure`] if the bitmap cannot be allocated and
    /// [`ExportError::Encode`] if PNG encoding fails.
    fn rasterize(&self, request: &CaptureRequest) -> Result<RasterImage, ExportError>;
}

/// [`Rasterizer`] backed by `resvg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, request: &CaptureRequest) -> Result<RasterImage, ExportError> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(request.svg(), &options)
            .map_err(|err| ExportError::Scene(err.to_string()))?;

        let (width, height) = request.pixel_size();
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            ExportError::CaptureFailure(format!("cannot allocate a {width}x{height} bitmap"))
        })?;

        let scale = request.scale();
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let png = pixmap
            .encode_png()
            .map_err(|err| ExportError::Encode(err.to_string()))?;
        debug!(width, height, bytes = png.len(); "Bitmap captured");
        Ok(RasterImage::new(png, width, height))
    }
}

/// A capture running on a worker thread.
///
/// Resolves to the bitmap, or to [`ExportError::CaptureFailure`] when the
/// worker ends without reporting a result.
#[derive(Debug)]
pub struct CaptureTask {
    receiver: oneshot::Receiver<Result<RasterImage, ExportError>>,
}

impl CaptureTask {
    /// Starts capturing `request` with `rasterizer`.
    pub fn spawn(rasterizer: Arc<dyn Rasterizer>, request: CaptureRequest) -> Self {
        let (sender, receiver) = oneshot::channel();
        let worker = thread::Builder::new()
            .name("sketchflow-capture".to_string())
            .spawn(move || {
                let result = rasterizer.rasterize(&request);
                // The receiver may have been dropped; the result is unused then
                let _ = sender.send(result);
            });
        if let Err(err) = worker {
            // The sender went down with the closure, so the task fails on poll
            error!(err:%; "Failed to start capture worker");
        }
        Self { receiver }
    }
}

impl Future for CaptureTask {
    type Output = Result<RasterImage, ExportError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(ExportError::CaptureFailure(
                "capture worker exited without a result".to_string(),
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
