//! Batch conversion over every matched model, and logging setup.

use crate::config::FacetConfig;
use crate::inputs::expand_patterns;
use crate::pipeline::Pipeline;
use crate::tool::{ModelTool, OpenScad};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that stop the whole batch before any model is converted.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No files matched {0:?}")]
    NoInputs(Vec<String>),
}

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Initialise tracing, preferring `RUST_LOG` over the configured level.
pub fn init_logging(config: &FacetConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .init();
}

/// Convert every file matched by `patterns` with OpenSCAD.
pub fn run(config: &FacetConfig, patterns: &[String]) -> Result<BatchReport, AppError> {
    let tool = OpenScad::new(&config.openscad);
    info!("Using OpenSCAD at {}", tool.executable().display());
    run_with_tool(tool, config, patterns)
}

/// Convert every file matched by `patterns`. A failed model is logged and
/// does not stop the remaining ones.
pub fn run_with_tool<T: ModelTool>(
    tool: T,
    config: &FacetConfig,
    patterns: &[String],
) -> Result<BatchReport, AppError> {
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        return Err(AppError::NoInputs(patterns.to_vec()));
    }

    let pipeline = Pipeline::from_config(tool, config);
    info!("Writing scenes to {}", pipeline.output_dir().display());
    let mut report = BatchReport::default();
    for file in files {
        info!("Processing {}", file.display());
        match pipeline.convert(&file) {
            Ok(output) => report.converted.push(output),
            Err(e) => {
                error!("Failed to convert {}: {}", file.display(), e);
                report.failed.push(file);
            }
        }
    }

    if !report.all_succeeded() {
        warn!(
            "{} of {} models failed",
            report.failed.len(),
            report.failed.len() + report.converted.len()
        );
    }
    Ok(report)
}
