//! STL file loading functions

use super::mesh::SurfaceMesh;
use glam::Vec3;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while loading a surface mesh.
#[derive(Debug, Error)]
pub enum MeshLoadError {
    #[error("Failed to open mesh {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("STL parsing error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mesh {path} contains no triangles")]
    Empty { path: PathBuf },
}

fn vec3(v: &stl_io::Vector<f32>) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

/// Read an ASCII or binary STL stream into a [`SurfaceMesh`].
///
/// `path` is only used for error reporting.
pub fn read_surface_mesh<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
) -> Result<SurfaceMesh, MeshLoadError> {
    let parse_error = |source| MeshLoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let triangles = stl_io::create_stl_reader(reader).map_err(parse_error)?;
    let mut mesh = SurfaceMesh::default();
    let mut degenerate = 0usize;

    for triangle in triangles {
        let triangle = triangle.map_err(parse_error)?;
        let [a, b, c] = &triangle.vertices;
        if mesh.push_triangle([vec3(a), vec3(b), vec3(c)], vec3(&triangle.normal)) {
            degenerate += 1;
        }
    }

    if degenerate > 0 {
        warn!("{} triangles with degenerate normals in {}", degenerate, path.display());
    }
    if mesh.is_empty() {
        return Err(MeshLoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(mesh)
}

/// Load an STL file as unindexed points with per-corner unit face normals.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_surface_mesh(path: &Path) -> Result<SurfaceMesh, MeshLoadError> {
    debug!("Loading STL mesh from: {}", path.display());
    let mut file = File::open(path).map_err(|source| MeshLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = read_surface_mesh(&mut file, path)?;
    info!("STL file parsed: {} triangles", mesh.triangle_count());
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SQUARE: &str = "solid square
  facet normal 0 0 2
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid square
";

    const DEGENERATE: &str = "solid sliver
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 2 0 0
    endloop
  endfacet
endsolid sliver
";

    fn read(text: &str) -> Result<SurfaceMesh, MeshLoadError> {
        read_surface_mesh(&mut Cursor::new(text.as_bytes().to_vec()), Path::new("test.stl"))
    }

    #[test]
    fn test_ascii_triangles_unindexed() {
        let mesh = read(SQUARE).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.points.len(), 6);
        assert_eq!(mesh.normals.len(), 6);
        assert_eq!(mesh.points[0], Vec3::ZERO);
        assert_eq!(mesh.points[3], Vec3::ZERO);
        assert_eq!(mesh.points[5], Vec3::new(0.0, 1.0, 0.0));
        assert!(mesh.normals.iter().all(|n| *n == Vec3::Z));
    }

    #[test]
    fn test_degenerate_normal_uses_fallback() {
        let mesh = read(DEGENERATE).unwrap();
        assert_eq!(mesh.normals, vec![Vec3::X; 3]);
        assert!(mesh.normals.iter().all(|n| n.is_finite()));
    }

    fn binary_stl(triangles: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            for v in triangle.iter().flatten() {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_binary_triangle() {
        let bytes = binary_stl(&[[
            [0.0, 0.0, 3.0],
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
        ]]);
        let mesh = read_surface_mesh(&mut Cursor::new(bytes), Path::new("binary.stl")).unwrap();
        assert_eq!(mesh.points, vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]);
        assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn test_non_finite_normal_uses_fallback() {
        let bytes = binary_stl(&[
            [[f32::NAN, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, f32::INFINITY, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
        ]);
        let mesh = read_surface_mesh(&mut Cursor::new(bytes), Path::new("nan.stl")).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.normals, vec![Vec3::X; 6]);
    }

    #[test]
    fn test_no_triangles_is_an_error() {
        let bytes = binary_stl(&[]);
        let err = read_surface_mesh(&mut Cursor::new(bytes), Path::new("empty.stl")).unwrap_err();
        assert!(matches!(err, MeshLoadError::Empty { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_surface_mesh(Path::new("/nonexistent/definitely/missing.stl")).unwrap_err();
        assert!(matches!(err, MeshLoadError::Open { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.stl");
        std::fs::write(&path, SQUARE).unwrap();
        let mesh = load_surface_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
    }
}
