//! Facet Data Crate
//!
//! Geometry data handling for the facet converter: splitting flattened CSG
//! streams into colour-tagged partitions and loading STL surface meshes.
//! This crate knows nothing about OpenSCAD processes or glTF output.

pub mod colour;
pub mod csg;
pub mod stl;

pub use colour::Rgba;
pub use csg::{
    ColourPartition, ColourSplitter, PartitionStream, SplitError, split_csg, split_csg_file,
    write_partitions,
};
pub use stl::{MeshLoadError, SurfaceMesh, load_surface_mesh};
