//! STL surface-mesh loading

mod loader;
mod mesh;

pub use loader::{MeshLoadError, load_surface_mesh, read_surface_mesh};
pub use mesh::{NORMAL_EPSILON, SurfaceMesh};
