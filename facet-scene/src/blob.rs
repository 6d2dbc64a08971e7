//! Growable binary blob backing the scene's single buffer.

use glam::Vec3;

/// Byte range of one appended block inside the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobRange {
    pub offset: usize,
    pub length: usize,
}

/// Appends blocks to a single byte buffer, handing back where each one landed.
///
/// Blocks are packed back to back: every returned range starts where the
/// previous one ended.
#[derive(Debug, Default)]
pub struct BlobBuilder {
    bytes: Vec<u8>,
}

impl BlobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes.
    pub fn append_bytes(&mut self, data: &[u8]) -> BlobRange {
        let range = BlobRange {
            offset: self.bytes.len(),
            length: data.len(),
        };
        self.bytes.extend_from_slice(data);
        range
    }

    /// Append vectors as tightly packed little-endian `f32` triples.
    pub fn append_vec3(&mut self, data: &[Vec3]) -> BlobRange {
        if cfg!(target_endian = "little") {
            self.append_bytes(bytemuck::cast_slice(data))
        } else {
            let bytes: Vec<u8> = data
                .iter()
                .flat_map(|v| v.to_array())
                .flat_map(f32::to_le_bytes)
                .collect();
            self.append_bytes(&bytes)
        }
    }

    /// Running total of bytes appended so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
