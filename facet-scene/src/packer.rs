//! Packs coloured triangle meshes into one buffer-backed glTF scene.

use crate::SceneError;
use crate::blob::BlobBuilder;
use crate::document::{
    KHR_MATERIALS_UNLIT, asset, attribute_view, colour_material, triangle_primitive,
    vec3_accessor,
};
use facet_data::{Rgba, SurfaceMesh};
use glam::Vec3;
use gltf::binary::{Glb, Header};
use gltf::json;
use gltf::json::validation::USize64;
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options affecting how materials are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackOptions {
    /// Mark every material with `KHR_materials_unlit`.
    pub unlit: bool,
}

/// Incrementally builds a scene with one node, mesh and material per partition.
///
/// Partition `i` gets node `i`, mesh `i`, material `i`, accessors `2i`
/// (positions) and `2i + 1` (normals) and the matching buffer views. Point
/// and normal blobs are appended to the shared buffer in that order.
#[derive(Debug, Default)]
pub struct ScenePacker {
    options: PackOptions,
    blob: BlobBuilder,
    root: json::Root,
    scene_nodes: Vec<json::Index<json::Node>>,
}

impl ScenePacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PackOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Add a loaded surface mesh as the next partition. Returns the
    /// partition's scene index.
    pub fn add_mesh(&mut self, mesh: &SurfaceMesh, colour: Rgba) -> Result<usize, SceneError> {
        let index = self.root.meshes.len();
        let Some(bounds) = mesh.bounds() else {
            return Err(SceneError::EmptyMesh { index });
        };
        if mesh.points.len() != mesh.normals.len() {
            return Err(SceneError::MismatchedMesh {
                index,
                points: mesh.points.len(),
                normals: mesh.normals.len(),
            });
        }
        if mesh.points.len() % 3 != 0 {
            return Err(SceneError::PartialTriangle {
                index,
                count: mesh.points.len(),
            });
        }

        let positions = self.push_attribute(&mesh.points, Some(bounds));
        let normals = self.push_attribute(&mesh.normals, None);
        let material = self
            .root
            .push(colour_material(index, colour, self.options.unlit));
        let gltf_mesh = self.root.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            primitives: vec![triangle_primitive(positions, normals, material)],
            weights: None,
        });
        let node = self.root.push(json::Node {
            mesh: Some(gltf_mesh),
            ..Default::default()
        });
        self.scene_nodes.push(node);

        debug!(
            "Packed partition {}: {} vertices, colour {}, buffer now {} bytes",
            index,
            mesh.vertex_count(),
            colour,
            self.blob.len()
        );
        Ok(index)
    }

    fn push_attribute(
        &mut self,
        data: &[Vec3],
        bounds: Option<(Vec3, Vec3)>,
    ) -> json::Index<json::Accessor> {
        let range = self.blob.append_vec3(data);
        let view = self.root.push(attribute_view(range));
        self.root.push(vec3_accessor(view, data.len(), bounds))
    }

    /// Assemble the document. Fails if no partition was added.
    pub fn finish(self) -> Result<SceneAsset, SceneError> {
        if self.scene_nodes.is_empty() {
            return Err(SceneError::NoPartitions);
        }

        let mut root = self.root;
        root.asset = asset();
        if self.options.unlit {
            root.extensions_used.push(KHR_MATERIALS_UNLIT.to_string());
        }
        root.push(json::Buffer {
            byte_length: USize64::from(self.blob.len()),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: None,
        });
        let scene = root.push(json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            nodes: self.scene_nodes,
        });
        root.scene = Some(scene);

        Ok(SceneAsset {
            document: root,
            blob: self.blob.into_bytes(),
        })
    }
}

/// A finished scene: the glTF document and the bytes of its single buffer.
#[derive(Debug, Clone)]
pub struct SceneAsset {
    pub document: json::Root,
    pub blob: Vec<u8>,
}

impl SceneAsset {
    /// Encode as a GLB container with the blob as its BIN chunk.
    pub fn to_glb(&self) -> Result<Vec<u8>, SceneError> {
        let glb = Glb {
            // `to_vec` computes the real length.
            header: Header {
                magic: *b"glTF",
                version: 2,
                length: 0,
            },
            json: Cow::Owned(self.document.to_vec()?),
            bin: Some(Cow::Borrowed(self.blob.as_slice())),
        };
        Ok(glb.to_vec()?)
    }

    /// Write the scene as a `.glb` file, replacing any existing file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn write_glb(&self, path: &Path) -> Result<(), SceneError> {
        let bytes = self.to_glb()?;
        fs::write(path, &bytes)?;
        info!(
            "Wrote {} partitions ({} bytes) to {}",
            self.document.meshes.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Pack `(mesh, colour)` pairs in order into a scene.
pub fn pack_scene<'a, I>(partitions: I, options: PackOptions) -> Result<SceneAsset, SceneError>
where
    I: IntoIterator<Item = (&'a SurfaceMesh, Rgba)>,
{
    let mut packer = ScenePacker::with_options(options);
    for (mesh, colour) in partitions {
        packer.add_mesh(mesh, colour)?;
    }
    packer.finish()
}

/// Output file name for a model: its file stem with a `.glb` extension.
pub fn scene_file_name(model: &Path) -> Option<PathBuf> {
    let mut name: OsString = model.file_stem()?.to_os_string();
    name.push(".glb");
    Some(PathBuf::from(name))
}
