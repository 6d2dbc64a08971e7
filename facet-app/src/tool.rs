//! External modelling tool invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

/// Errors from running the external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to launch {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed on {input} ({status}): {stderr}")]
    Failed {
        tool: PathBuf,
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// A tool that turns one model file into another, chosen by output extension.
///
/// Used for both `.scad` to `.csg` compilation and `.csg` to `.stl` meshing.
pub trait ModelTool {
    fn run(&self, input: &Path, output: &Path) -> Result<(), ToolError>;
}

impl<T: ModelTool + ?Sized> ModelTool for &T {
    fn run(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        (**self).run(input, output)
    }
}

/// OpenSCAD run as `<executable> <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct OpenScad {
    executable: PathBuf,
}

impl OpenScad {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl ModelTool for OpenScad {
    #[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    fn run(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        debug!("Running {}", self.executable.display());
        let result = Command::new(&self.executable)
            .arg(input)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|source| ToolError::Spawn {
                tool: self.executable.clone(),
                source,
            })?;

        // OpenSCAD reports progress on stderr even when it succeeds.
        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if !stderr.is_empty() {
            debug!("{}", stderr);
        }
        if !result.status.success() {
            return Err(ToolError::Failed {
                tool: self.executable.clone(),
                input: input.to_path_buf(),
                status: result.status,
                stderr,
            });
        }
        Ok(())
    }
}
