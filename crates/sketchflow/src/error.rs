//! Error types for Sketchflow operations.
//!
//! Only invariant violations and failed exports are errors. Recoverable
//! conditions such as an empty label commit or a drop without a shape token
//! are reported through outcome enums instead.

use std::io;

use thiserror::Error;

use sketchflow_core::identifier::Id;

use crate::interaction::GestureKind;

/// A mutation that would break a Diagram Model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An edge names a node that does not exist.
    #[error("edge `{edge_id}` references missing node `{node_id}`")]
    InvalidReference { edge_id: Id, node_id: Id },

    #[error("an entity with id `{0}` already exists")]
    DuplicateId(Id),

    #[error("no node with id `{0}`")]
    UnknownNode(Id),

    #[error("no edge with id `{0}`")]
    UnknownEdge(Id),
}

/// A controller request that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// Another modal gesture is already in progress.
    #[error("cannot start a {requested} while a {active} is in progress")]
    GestureConflict {
        active: GestureKind,
        requested: GestureKind,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Failure of one of the export formats.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The vector scene could not be parsed back for rendering.
    #[error("failed to build render tree: {0}")]
    Scene(String),

    /// The asynchronous capture step failed or was abandoned.
    #[error("raster capture failed: {0}")]
    CaptureFailure(String),

    #[error("failed to encode output: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failure to load a structured snapshot.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot violates model invariants: {0}")]
    Invalid(#[from] ModelError),
}

/// The main error type for Sketchflow operations.
///
/// The `Import` variant keeps the snapshot text so front-ends can point at
/// the offending line.
#[derive(Debug, Error)]
pub enum SketchflowError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Interaction error: {0}")]
    Interaction(#[from] InteractionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A snapshot failed to load; `src` is the text that was read.
    #[error("{err}")]
    Import { err: ImportError, src: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SketchflowError {
    /// Create a new `Import` error with the snapshot text that failed.
    pub fn new_import_error(err: ImportError, src: impl Into<String>) -> Self {
        Self::Import {
            err,
            src: src.into(),
        }
    }
}
