//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use sketchflow::{SketchflowError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SketchflowError {
    fn from(err: ConfigError) -> Self {
        SketchflowError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (sketchflow/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SketchflowError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("sketchflow/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "sketchflow", "sketchflow") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file is missing, unreadable or not valid TOML.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, SketchflowError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse TOML configuration text.
fn parse_config(content: &str) -> Result<AppConfig, SketchflowError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use sketchflow::{config::SelfLoopPolicy, edge_path::PathType};

    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r##"
            [canvas]
            snap_grid = 20
            self_loops = "reject"

            [export]
            raster_scale = 1.5

            [style]
            edge_color = "#111827"
            path_type = "bezier"
            "##,
        )
        .unwrap();

        assert_eq!(config.canvas().snap_grid(), Some(20.0));
        assert_eq!(config.canvas().self_loops(), SelfLoopPolicy::Reject);
        assert_eq!(config.export().raster_scale(), 1.5);
        assert_eq!(config.export().width(), 1024);
        assert_eq!(config.style().path_type(), PathType::Bezier);
        assert_eq!(config.viewport().max_zoom(), 3.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[canvas\nsnap_grid = ").unwrap_err();
        assert!(matches!(err, SketchflowError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport]\nmin_zoom = 0.5\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.viewport().min_zoom(), 0.5);
    }
}
