use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::types::Line;

/// Read a source file into numbered lines
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        lines.push(Line::new(idx + 1, line?));
    }
    Ok(lines)
}

/// Split an in-memory buffer into numbered lines
#[must_use]
pub fn buffer_lines(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .map(|(idx, text)| Line::new(idx + 1, text))
        .collect()
}

/// Render `path` relative to `root` with forward slashes
///
/// Falls back to the full path when it does not live under the root.
#[must_use]
pub fn project_relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
