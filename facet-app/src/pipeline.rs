//! One model-to-GLB conversion: compile, split by colour, mesh, pack.

use crate::config::FacetConfig;
use crate::tool::{ModelTool, ToolError};
use facet_data::{MeshLoadError, SplitError, load_surface_mesh, split_csg_file};
use facet_scene::{PackOptions, SceneError, ScenePacker, scene_file_name};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort the conversion of one model.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to create scratch workspace: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("Cannot derive an output name from {0}")]
    InvalidInput(PathBuf),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Colour split error: {0}")]
    Split(#[from] SplitError),

    #[error("Mesh loading error: {0}")]
    Mesh(#[from] MeshLoadError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to create output directory {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} produced no geometry")]
    NoGeometry(PathBuf),
}

/// Converts models into colour-segmented `.glb` scenes.
///
/// Each call to [`Pipeline::convert`] owns a fresh scratch directory that is
/// removed when the call returns, whether it succeeded or not.
pub struct Pipeline<T> {
    tool: T,
    output_dir: PathBuf,
    temp_root: Option<PathBuf>,
    pack_options: PackOptions,
}

impl<T: ModelTool> Pipeline<T> {
    pub fn new(tool: T, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            output_dir: output_dir.into(),
            temp_root: None,
            pack_options: PackOptions::default(),
        }
    }

    /// Build a pipeline from resolved configuration.
    pub fn from_config(tool: T, config: &FacetConfig) -> Self {
        let pipeline = Self::new(tool, &config.output_dir).with_pack_options(PackOptions {
            unlit: config.unlit,
        });
        match &config.temp_root {
            Some(root) => pipeline.with_temp_root(root),
            None => pipeline,
        }
    }

    /// Create scratch workspaces under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn with_pack_options(mut self, options: PackOptions) -> Self {
        self.pack_options = options;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn workspace(&self) -> Result<TempDir, PipelineError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("facet-");
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(PipelineError::Workspace)
    }

    /// Convert `model` and return the path of the written `.glb`.
    #[tracing::instrument(skip_all, fields(model = %model.display()))]
    pub fn convert(&self, model: &Path) -> Result<PathBuf, PipelineError> {
        let file_name =
            scene_file_name(model).ok_or_else(|| PipelineError::InvalidInput(model.to_path_buf()))?;
        let workspace = self.workspace()?;
        debug!("Scratch workspace: {}", workspace.path().display());

        let csg = workspace.path().join(file_name.with_extension("csg"));
        self.tool.run(model, &csg)?;

        let partitions = split_csg_file(&csg, workspace.path())?;
        if partitions.is_empty() {
            return Err(PipelineError::NoGeometry(model.to_path_buf()));
        }

        for partition in &partitions {
            self.tool.run(&partition.source_path, &partition.mesh_path())?;
        }

        let mut packer = ScenePacker::with_options(self.pack_options);
        for partition in &partitions {
            let mesh = load_surface_mesh(&partition.mesh_path())?;
            packer.add_mesh(&mesh, partition.colour)?;
        }
        let scene = packer.finish()?;

        fs::create_dir_all(&self.output_dir).map_err(|source| PipelineError::Output {
            path: self.output_dir.clone(),
            source,
        })?;
        let output = self.output_dir.join(file_name);
        scene.write_glb(&output)?;

        info!(
            "Converted {} into {} colour partitions",
            model.display(),
            partitions.len()
        );
        Ok(output)
    }
}
