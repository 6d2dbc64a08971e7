//! Colour partition data structures

use crate::colour::Rgba;
use std::path::PathBuf;

/// Leading transform that rotates the OpenSCAD Z-up frame into the Y-up frame
/// used by glTF scenes.
pub const FRAME_CORRECTION: &str = "rotate([-90,0,0]) {\n";

/// An in-memory partition produced by the splitter, before it is written out.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionStream {
    /// Position in emission order. Also the partition's scene mesh/material index.
    pub index: usize,
    pub colour: Rgba,
    pub(crate) text: String,
    pub(crate) body_lines: usize,
}

impl PartitionStream {
    /// The partition's lines, starting with its colour directive if it has one.
    pub fn body(&self) -> &str {
        &self.text
    }

    /// Number of geometry lines, not counting the colour directive.
    pub fn body_lines(&self) -> usize {
        self.body_lines
    }

    /// Render the partition as a self-contained CSG document.
    pub fn to_csg(&self) -> String {
        let mut csg = String::with_capacity(FRAME_CORRECTION.len() + self.text.len() + 2);
        csg.push_str(FRAME_CORRECTION);
        csg.push_str(&self.text);
        if !csg.ends_with('\n') {
            csg.push('\n');
        }
        csg.push('}');
        csg
    }

    /// File name used when the partition is persisted.
    pub fn file_name(&self) -> String {
        format!("coloured{}.csg", self.index)
    }
}

/// A persisted partition: its colour and the CSG file holding its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourPartition {
    pub index: usize,
    pub colour: Rgba,
    pub source_path: PathBuf,
}

impl ColourPartition {
    /// Path of the surface mesh converted from this partition's CSG file.
    pub fn mesh_path(&self) -> PathBuf {
        self.source_path.with_extension("stl")
    }
}
