//! CSG stream colour partitioning

mod directive;
mod partition;
mod splitter;

pub use directive::{match_colour_directive, parse_colour_components};
pub use partition::{ColourPartition, FRAME_CORRECTION, PartitionStream};
pub use splitter::{ColourSplitter, split_csg, split_csg_file, write_partitions};

use thiserror::Error;

/// Errors raised while splitting a CSG stream by colour.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Malformed colour directive on line {line}: {text}")]
    MalformedColour { line: usize, text: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
