//! Sketchflow CLI library
//!
//! This module contains the core CLI logic: load a structured snapshot,
//! run it through the export pipeline and write the file into a directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, to_reportable};

use std::{fs, path::PathBuf};

use futures::executor::block_on;
use log::info;

use sketchflow::{
    DiagramEngine, SketchflowError,
    export::{DirectorySink, DownloadSink as _},
};

/// Run the Sketchflow CLI application
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns `SketchflowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid snapshots
/// - Export and capture failures
pub fn run(args: &Args) -> Result<PathBuf, SketchflowError> {
    info!(
        input_path = args.input,
        output_dir = args.output,
        format:% = args.format;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let engine = DiagramEngine::new(app_config);
    let diagram = engine.load(&source)?;
    let snapshot = diagram.snapshot();
    let file = block_on(engine.export(args.format, &snapshot))?;

    let path = DirectorySink::new(&args.output).deliver(&file)?;

    info!(output_file:? = path; "Diagram exported successfully");

    Ok(path)
}
