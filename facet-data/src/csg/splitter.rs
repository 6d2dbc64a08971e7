//! Line-oriented state machine that splits a CSG stream by colour.

use super::SplitError;
use super::directive::{match_colour_directive, parse_colour_components};
use super::partition::{ColourPartition, PartitionStream};
use crate::colour::Rgba;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// The partition currently receiving lines.
#[derive(Debug)]
struct OpenPartition {
    colour: Rgba,
    text: String,
    body_lines: usize,
}

impl OpenPartition {
    fn new(colour: Rgba) -> Self {
        Self {
            colour,
            text: String::new(),
            body_lines: 0,
        }
    }
}

/// Splits a flattened CSG stream into one partition per colour directive.
///
/// Geometry before the first directive goes to a white partition. A partition
/// that ends up with no geometry lines is dropped, so kept partitions are
/// numbered contiguously in emission order.
#[derive(Debug)]
pub struct ColourSplitter {
    current: OpenPartition,
    kept: Vec<PartitionStream>,
    line_number: usize,
    discarded: usize,
}

impl ColourSplitter {
    pub fn new() -> Self {
        Self {
            current: OpenPartition::new(Rgba::WHITE),
            kept: Vec::new(),
            line_number: 0,
            discarded: 0,
        }
    }

    /// Feed one line, including its line terminator if it has one.
    pub fn push_line(&mut self, line: &str) -> Result<(), SplitError> {
        self.line_number += 1;

        match match_colour_directive(line) {
            Some(values) => {
                let colour = parse_colour_components(values).ok_or_else(|| {
                    SplitError::MalformedColour {
                        line: self.line_number,
                        text: line.trim_end().to_string(),
                    }
                })?;
                self.flush(colour);
                self.current.text.push_str(line);
            }
            None => {
                self.current.text.push_str(line);
                self.current.body_lines += 1;
            }
        }
        Ok(())
    }

    /// Close the last partition and return every kept partition in order.
    pub fn finish(mut self) -> Vec<PartitionStream> {
        self.flush(Rgba::WHITE);
        debug!(
            "Split {} lines into {} partitions ({} empty discarded)",
            self.line_number,
            self.kept.len(),
            self.discarded
        );
        self.kept
    }

    /// Close the current partition and open a new one with `next` colour.
    fn flush(&mut self, next: Rgba) {
        let closed = std::mem::replace(&mut self.current, OpenPartition::new(next));
        if closed.body_lines == 0 {
            self.discarded += 1;
            return;
        }
        self.kept.push(PartitionStream {
            index: self.kept.len(),
            colour: closed.colour,
            text: closed.text,
            body_lines: closed.body_lines,
        });
    }
}

impl Default for ColourSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a CSG stream read from `reader`, preserving line endings verbatim.
pub fn split_csg<R: BufRead>(mut reader: R) -> Result<Vec<PartitionStream>, SplitError> {
    let mut splitter = ColourSplitter::new();
    let mut line = String::new();
    while reader.read_line(&mut line)? != 0 {
        splitter.push_line(&line)?;
        line.clear();
    }
    Ok(splitter.finish())
}

/// Write each partition to `dir` as `coloured{index}.csg`.
pub fn write_partitions(
    partitions: &[PartitionStream],
    dir: &Path,
) -> Result<Vec<ColourPartition>, SplitError> {
    partitions
        .iter()
        .map(|stream| {
            let source_path = dir.join(stream.file_name());
            fs::write(&source_path, stream.to_csg())?;
            Ok(ColourPartition {
                index: stream.index,
                colour: stream.colour,
                source_path,
            })
        })
        .collect()
}

/// Split the CSG file at `path` and persist its partitions into `dir`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn split_csg_file(path: &Path, dir: &Path) -> Result<Vec<ColourPartition>, SplitError> {
    let file = File::open(path)?;
    let partitions = split_csg(BufReader::new(file))?;
    let written = write_partitions(&partitions, dir)?;
    info!("CSG split into {} colour partitions", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<PartitionStream> {
        split_csg(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_no_directives_single_white_partition() {
        let input = "group() {\ncube(size = [1, 1, 1]);\n}\n";
        let parts = split(input);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].index, 0);
        assert_eq!(parts[0].colour, Rgba([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(parts[0].body(), input);
        assert_eq!(parts[0].body_lines(), 3);
    }

    #[test]
    fn test_leading_directive_discards_default() {
        let parts = split("color([1,0,0]);\nline1\ncolor([0,1,0]);\nline2\n");
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].index, 0);
        assert_eq!(parts[0].colour, Rgba([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parts[0].body(), "color([1,0,0]);\nline1\n");

        assert_eq!(parts[1].index, 1);
        assert_eq!(parts[1].colour, Rgba([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parts[1].body(), "color([0,1,0]);\nline2\n");
    }

    #[test]
    fn test_default_partition_kept_when_it_has_geometry() {
        let parts = split("sphere(r = 1);\ncolor([0, 0, 1, 0.5]);\ncube(1);\n");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].colour, Rgba::WHITE);
        assert_eq!(parts[0].body(), "sphere(r = 1);\n");
        assert_eq!(parts[1].colour, Rgba([0.0, 0.0, 1.0, 0.5]));
    }

    #[test]
    fn test_back_to_back_directives_discard_empty() {
        let parts = split("color([1,0,0]);\ncolor([0,1,0]);\ncube(1);\ncolor([0,0,1]);\n");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].index, 0);
        assert_eq!(parts[0].colour, Rgba([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parts[0].body(), "color([0,1,0]);\ncube(1);\n");
    }

    #[test]
    fn test_indices_contiguous_after_discard() {
        let parts = split("a\ncolor([1,0,0]);\ncolor([0,1,0]);\nb\ncolor([0,0,1]);\nc\n");
        let indices: Vec<usize> = parts.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(parts[1].colour, Rgba([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parts[2].colour, Rgba([0.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_partition_count_property() {
        // 3 directives with bodies, one without, plus a non-empty default.
        let input = "x\ncolor([1,0,0]);\ny\ncolor([0,1,0]);\ncolor([0,0,1]);\nz\nw\ncolor([1,1,0]);\nv\n";
        let parts = split(input);
        assert_eq!(parts.len(), 4);
        for part in &parts {
            assert!(part.body_lines() >= 1);
            assert!(part.colour.to_array().iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(split("").is_empty());
    }

    #[test]
    fn test_malformed_directive_reports_line() {
        let err = split_csg("cube(1);\ncolor([1..0, 0, 0]);\n".as_bytes()).unwrap_err();
        match err {
            SplitError::MalformedColour { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "color([1..0, 0, 0]);");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directive_arity_must_be_three_or_four() {
        for (input, text) in [
            ("cube(1);\ncolor([1,0]);\nsphere(1);\n", "color([1,0]);"),
            ("color([1,0,0,1,1]);\nsphere(1);\n", "color([1,0,0,1,1]);"),
        ] {
            let err = split_csg(input.as_bytes()).unwrap_err();
            assert!(
                matches!(&err, SplitError::MalformedColour { text: t, .. } if t == text),
                "{input:?} -> {err}"
            );
        }
        assert_eq!(split("color([1,0,0,0.5]);\ncube(1);\n")[0].colour, Rgba([1.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_unterminated_last_line() {
        let parts = split("color([1,0,0]);\ncube(1);");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].to_csg(), "rotate([-90,0,0]) {\ncolor([1,0,0]);\ncube(1);\n}");
    }

    #[test]
    fn test_write_partitions_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.csg");
        fs::write(&input, "color([1,0,0]);\ncube(1);\ncolor([0,1,0]);\nsphere(1);\n").unwrap();

        let written = split_csg_file(&input, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].source_path, dir.path().join("coloured0.csg"));
        assert_eq!(written[1].source_path, dir.path().join("coloured1.csg"));

        let second = fs::read_to_string(&written[1].source_path).unwrap();
        assert_eq!(second, "rotate([-90,0,0]) {\ncolor([0,1,0]);\nsphere(1);\n}");
    }
}
