//! Facet Scene Crate
//!
//! Builds binary glTF (`.glb`) scenes from colour-tagged triangle meshes.
//! Every partition becomes one node, mesh and material, and all vertex data
//! shares a single buffer.

pub mod blob;
pub mod document;
pub mod packer;

pub use blob::{BlobBuilder, BlobRange};
pub use packer::{PackOptions, SceneAsset, ScenePacker, pack_scene, scene_file_name};

use thiserror::Error;

/// Errors that can occur while packing or writing a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("No partitions to pack")]
    NoPartitions,

    #[error("Partition {index} has no vertices")]
    EmptyMesh { index: usize },

    #[error("Partition {index} has {points} points but {normals} normals")]
    MismatchedMesh {
        index: usize,
        points: usize,
        normals: usize,
    },

    #[error("Partition {index} has {count} vertices, not a whole number of triangles")]
    PartialTriangle { index: usize, count: usize },

    #[error("glTF JSON error: {0}")]
    Json(#[from] gltf::json::Error),

    #[error("GLB encoding error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
