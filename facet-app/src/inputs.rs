//! Expansion of command-line file patterns.

use std::path::PathBuf;
use tracing::warn;

/// Expand glob patterns into the regular files they match, in pattern order.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, glob::PatternError> {
    let mut files = Vec::new();
    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
    }
    Ok(files)
}
