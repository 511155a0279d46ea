//! Structured snapshot export and import.

use log::debug;

use crate::{
    config::ViewportConfig,
    error::{ExportError, ImportError},
    model::{Diagram, Snapshot},
};

/// Serializes a snapshot as pretty-printed `{nodes, edges, viewport}` JSON.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialization fails.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<Vec<u8>, ExportError> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    debug!(bytes = bytes.len(); "Snapshot serialized");
    Ok(bytes)
}

/// Parses a snapshot without validating it.
///
/// # Errors
///
/// Returns [`ImportError::Malformed`] if the input is not a snapshot.
pub fn snapshot_from_json(input: &str) -> Result<Snapshot, ImportError> {
    Ok(serde_json::from_str(input)?)
}

/// Parses and validates a snapshot into a [`Diagram`].
///
/// # Errors
///
/// Returns [`ImportError::Malformed`] for bad JSON and
/// [`ImportError::Invalid`] for duplicate ids or dangling edges.
pub fn diagram_from_json(input: &str, limits: ViewportConfig) -> Result<Diagram, ImportError> {
    let snapshot = snapshot_from_json(input)?;
    Ok(Diagram::from_snapshot(snapshot, limits)?)
}
