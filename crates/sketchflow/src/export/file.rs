//! Export formats and finished files.

use std::{fmt, str::FromStr};

use chrono::Utc;

/// A target format of the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Structured snapshot, the only losslessly re-importable format
    Json,
    Svg,
    Png,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Json, Self::Svg, Self::Png, Self::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    /// Whether the format goes through the asynchronous raster capture.
    pub fn needs_capture(self) -> bool {
        matches!(self, Self::Png | Self::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("unknown export format `{s}`")),
        }
    }
}

/// `diagram-<millis>.<ext>`
pub fn file_name(format: ExportFormat, unix_millis: i64) -> String {
    format!("diagram-{unix_millis}.{}", format.extension())
}

/// A finished export ready to be handed to a
/// [`DownloadSink`](super::DownloadSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    name: String,
    format: ExportFormat,
    bytes: Vec<u8>,
}

impl ExportFile {
    /// Wraps `bytes`, naming the file after the current time.
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self::at(format, bytes, Utc::now().timestamp_millis())
    }

    /// Wraps `bytes`, naming the file after `unix_millis`.
    pub fn at(format: ExportFormat, bytes: Vec<u8>, unix_millis: i64) -> Self {
        Self {
            name: file_name(format, unix_millis),
            format,
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
