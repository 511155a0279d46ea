//! Command-line argument definitions for the Sketchflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input snapshot, the export format,
//! the output directory, configuration file selection, and logging
//! verbosity.

use clap::Parser;

use sketchflow::export::ExportFormat;

/// Command-line arguments for the Sketchflow diagram exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input snapshot (JSON)
    #[arg(help = "Path to the input snapshot")]
    pub input: String,

    /// Export format (json, svg, png, pdf)
    #[arg(short, long, default_value = "svg")]
    pub format: ExportFormat,

    /// Directory receiving `diagram-<millis>.<ext>`
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sketchflow", "diagram.json"]);
        assert_eq!(args.input, "diagram.json");
        assert_eq!(args.format, ExportFormat::Svg);
        assert_eq!(args.output, ".");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }

    #[test]
    fn test_format_flag() {
        let args = Args::parse_from(["sketchflow", "in.json", "-f", "pdf", "-o", "out"]);
        assert_eq!(args.format, ExportFormat::Pdf);
        assert_eq!(args.output, "out");
        assert!(Args::try_parse_from(["sketchflow", "in.json", "-f", "gif"]).is_err());
    }
}
