//! Error adapter for converting SketchflowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Malformed snapshots are rendered with a label pointing at the offending
//! position in the JSON text. Everything else is reported without a source
//! snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use sketchflow::{ImportError, ModelError, SketchflowError};

/// Adapter for a snapshot that is not valid JSON for the snapshot format.
pub struct SnapshotDiagnostic<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> SnapshotDiagnostic<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// The byte span the parser stopped at.
    fn span(&self) -> SourceSpan {
        let offset = line_column_offset(self.src, self.err.line(), self.err.column());
        let length = usize::from(offset < self.src.len());
        SourceSpan::new(offset.into(), length)
    }
}

impl fmt::Debug for SnapshotDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for SnapshotDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed snapshot")
    }
}

impl std::error::Error for SnapshotDiagnostic<'_> {}

impl MietteDiagnostic for SnapshotDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("sketchflow::import"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a snapshot is an object with `nodes`, `edges` and `viewport` fields",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`SketchflowError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a SketchflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SketchflowError::Model(_) => "sketchflow::model",
            SketchflowError::Interaction(_) => "sketchflow::interaction",
            SketchflowError::Export(_) => "sketchflow::export",
            SketchflowError::Import { .. } => "sketchflow::import",
            SketchflowError::Io(_) => "sketchflow::io",
            SketchflowError::Config(_) => "sketchflow::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SketchflowError::Import {
                err: ImportError::Invalid(ModelError::InvalidReference { .. }),
                ..
            } => "every edge must connect two nodes present in the snapshot",
            SketchflowError::Import {
                err: ImportError::Invalid(ModelError::DuplicateId(_)),
                ..
            } => "node ids and edge ids must be unique",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A malformed snapshot with a source location.
    Snapshot(SnapshotDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Snapshot(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Snapshot(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Snapshot(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Snapshot(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Snapshot(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Snapshot(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`SketchflowError`] into a reportable error.
pub fn to_reportable(err: &SketchflowError) -> Reportable<'_> {
    match err {
        SketchflowError::Import {
            err: ImportError::Malformed(json_err),
            src,
        } => Reportable::Snapshot(SnapshotDiagnostic::new(json_err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Byte offset of a 1-based line and column, clamped to the text.
fn line_column_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

#[cfg(test)]
mod tests {
    use sketchflow::{ExportError, identifier::Id};

    use super::*;

    #[test]
    fn test_line_column_offset() {
        let src = "{\n  \"nodes\": 3\n}";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 2, 3), 4);
        assert_eq!(line_column_offset(src, 9, 9), src.len());
    }

    #[test]
    fn test_malformed_snapshot_has_label() {
        let src = "{\n  \"nodes\": 3\n}";
        let json_err = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let err = SketchflowError::new_import_error(ImportError::Malformed(json_err), src);

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Snapshot(_)));
        assert_eq!(reportable.to_string(), "malformed snapshot");
        assert!(reportable.source_code().is_some());
        assert_eq!(reportable.labels().unwrap().count(), 1);
    }

    #[test]
    fn test_invalid_reference_help() {
        let err = SketchflowError::new_import_error(
            ImportError::Invalid(ModelError::InvalidReference {
                edge_id: Id::new("e"),
                node_id: Id::new("ghost"),
            }),
            "{}",
        );
        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "sketchflow::import"
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_export_error_code() {
        let err = SketchflowError::Export(ExportError::CaptureFailure("gone".to_string()));
        let reportable = to_reportable(&err);
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "sketchflow::export"
        );
        assert!(reportable.help().is_none());
        assert!(reportable.labels().is_none());
    }
}
