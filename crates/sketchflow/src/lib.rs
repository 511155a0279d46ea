//! Sketchflow - a diagram engine for labeled shapes joined by routed edges
//!
//! This library holds the node/edge/viewport model, the interaction state
//! machines that edit it, and an export pipeline producing structured
//! snapshots, SVG, PNG and single-page PDF documents. Geometry, shape
//! outlines, edge routing and drawing live in `sketchflow-core` and are
//! re-exported here.

pub mod config;
pub mod export;
pub mod interaction;
pub mod model;
pub mod palette;

mod error;

pub use sketchflow_core::{color, draw, edge_path, geometry, identifier, shape};

pub use error::{ExportError, ImportError, InteractionError, ModelError, SketchflowError};

use log::{debug, info};

use config::AppConfig;
use export::{ExportFile, ExportFormat, Exporter};
use interaction::Editor;
use model::{Diagram, Snapshot};

/// Entry point for loading, editing and exporting diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use futures::executor::block_on;
/// use sketchflow::{DiagramEngine, config::AppConfig, export::ExportFormat};
///
/// let source = r#"{"nodes": [{"id": "a", "position": {"x": 0, "y": 0}}]}"#;
/// let engine = DiagramEngine::new(AppConfig::default());
///
/// let diagram = engine.load(source).expect("Failed to load");
/// let file = block_on(engine.export(ExportFormat::Svg, &diagram.snapshot()))
///     .expect("Failed to export");
///
/// println!("{}", file.name());
/// ```
#[derive(Debug, Default)]
pub struct DiagramEngine {
    config: AppConfig,
    exporter: Exporter,
}

impl DiagramEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let exporter = Exporter::new(config.export().clone());
        Self { config, exporter }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate a structured snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SketchflowError::Import` for malformed JSON or a snapshot
    /// with duplicate ids or dangling edges.
    pub fn load(&self, source: &str) -> Result<Diagram, SketchflowError> {
        info!("Loading diagram snapshot");
        let diagram = export::diagram_from_json(source, *self.config.viewport())
            .map_err(|err| SketchflowError::new_import_error(err, source))?;
        debug!(
            nodes = diagram.node_count(),
            edges = diagram.edge_count();
            "Diagram loaded"
        );
        Ok(diagram)
    }

    /// Create an interaction controller that owns `diagram`.
    pub fn editor(&self, diagram: Diagram) -> Editor {
        Editor::with_diagram(diagram, self.config.clone())
    }

    /// Export a snapshot in the given format.
    ///
    /// # Errors
    ///
    /// Returns `SketchflowError::Export` if serialization, rendering or
    /// capture fails.
    pub async fn export(
        &self,
        format: ExportFormat,
        snapshot: &Snapshot,
    ) -> Result<ExportFile, SketchflowError> {
        info!(format:%; "Exporting diagram");
        Ok(self.exporter.export(format, snapshot).await?)
    }
}
