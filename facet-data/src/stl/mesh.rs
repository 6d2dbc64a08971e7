//! Unindexed triangle mesh data

use glam::Vec3;

/// Face normals shorter than this are replaced by [`Vec3::X`].
pub const NORMAL_EPSILON: f32 = 1e-10;

/// Triangle soup with one face normal copied to each corner.
///
/// `points[3k..3k + 3]` are the corners of triangle `k` and
/// `normals[3k..3k + 3]` are three copies of its unit normal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Append one triangle. The normal is normalised, with degenerate normals
    /// replaced by [`Vec3::X`]. Returns `true` if the fallback was used.
    pub fn push_triangle(&mut self, corners: [Vec3; 3], normal: Vec3) -> bool {
        let unit = unit_normal(normal);
        self.points.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[unit.unwrap_or(Vec3::X); 3]);
        unit.is_none()
    }

    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-axis minimum and maximum over all points, or `None` if empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }
}

/// Normalise `normal`, or `None` when it is too short or not finite.
fn unit_normal(normal: Vec3) -> Option<Vec3> {
    let length = normal.length();
    (length.is_finite() && length >= NORMAL_EPSILON).then(|| normal / length)
}
