//! Delivery of finished exports.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use log::{error, info};

use super::ExportFile;
use crate::error::ExportError;

/// Receives finished [`ExportFile`]s, the way a browser receives a download.
pub trait DownloadSink {
    /// Delivers `file` and returns where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the file cannot be stored.
    fn deliver(&mut self, file: &ExportFile) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory under their own file names.
///
/// Files are written to a temporary file first and renamed into place, so
/// a failed write never leaves a truncated export behind.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<PathBuf, ExportError> {
        let destination = self.directory.join(file.name());

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.directory).inspect_err(|err| {
            error!(directory:? = self.directory, err:%; "Failed to create temporary export file");
        })?;
        temp_file.write_all(file.bytes())?;
        temp_file.persist(&destination).map_err(|err| {
            error!(path:? = destination, err:% = err.error; "Failed to store export");
            err.error
        })?;

        info!(
            path:? = destination,
            mime = file.mime_type(),
            bytes = file.bytes().len();
            "Export written"
        );
        Ok(destination)
    }
}

/// Keeps delivered exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<ExportFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<PathBuf, ExportError> {
        self.files.push(file.clone());
        Ok(PathBuf::from(file.name()))
    }
}
