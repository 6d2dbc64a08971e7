//! Converter configuration, optionally loaded from a TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// OpenSCAD location used when nothing else is configured.
pub fn default_openscad() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\OpenSCAD\openscad.exe")
    } else {
        PathBuf::from("openscad")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Settings for one converter run, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FacetConfig {
    /// OpenSCAD executable used for both compile and mesh conversion.
    pub openscad: PathBuf,
    /// Directory receiving the `.glb` files.
    pub output_dir: PathBuf,
    /// Parent directory for per-run scratch workspaces. System temp dir if unset.
    pub temp_root: Option<PathBuf>,
    /// Tag materials with `KHR_materials_unlit`.
    pub unlit: bool,
    pub logging: LoggingConfig,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            openscad: default_openscad(),
            output_dir: PathBuf::from("assets/3d"),
            temp_root: None,
            unlit: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl FacetConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
