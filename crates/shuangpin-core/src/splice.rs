//! Regenerates the marker-delimited region of a hand-maintained file.
//!
//! Lines are compared to the markers after trimming. The marker lines and
//! everything outside them are kept byte for byte, line endings included.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("marker {0:?} not found")]
    MissingMarker(String),

    #[error("marker {marker:?} appears more than once (lines {lines:?})")]
    DuplicateMarker { marker: String, lines: Vec<usize> },

    #[error("end marker on line {end_line} precedes start marker on line {start_line}")]
    MarkersOutOfOrder { start_line: usize, end_line: usize },
}

/// Replace the lines strictly between `start` and `end` with `rendered`.
pub fn splice_lines(
    doc: &str,
    start: &str,
    end: &str,
    rendered: &[String],
) -> Result<String, SpliceError> {
    let lines: Vec<&str> = doc.split_inclusive('\n').collect();
    let start_idx = find_marker(&lines, start)?;
    let end_idx = find_marker(&lines, end)?;
    if end_idx <= start_idx {
        return Err(SpliceError::MarkersOutOfOrder {
            start_line: start_idx + 1,
            end_line: end_idx + 1,
        });
    }

    let eol = if lines[start_idx].ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };

    let mut out = String::with_capacity(doc.len());
    for line in &lines[..=start_idx] {
        out.push_str(line);
    }
    for line in rendered {
        out.push_str(line);
        out.push_str(eol);
    }
    for line in &lines[end_idx..] {
        out.push_str(line);
    }
    Ok(out)
}

/// Index of the single line equal to `marker` after trimming.
fn find_marker(lines: &[&str], marker: &str) -> Result<usize, SpliceError> {
    let hits: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == marker)
        .map(|(i, _)| i)
        .collect();
    match hits.as_slice() {
        [] => Err(SpliceError::MissingMarker(marker.to_string())),
        [idx] => Ok(*idx),
        _ => Err(SpliceError::DuplicateMarker {
            marker: marker.to_string(),
            lines: hits.iter().map(|i| i + 1).collect(),
        }),
    }
}

/// Splice `rendered` into the file at `path`.
///
/// Returns `false` without writing when the content is already current.
/// The new content goes to `<path>.tmp` first and is renamed over `path`.
pub fn splice_file(
    path: &Path,
    start: &str,
    end: &str,
    rendered: &[String],
) -> Result<bool, SpliceError> {
    let io_err = |source| SpliceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let doc = fs::read_to_string(path).map_err(io_err)?;
    let updated = splice_lines(&doc, start, end, rendered)?;
    if updated == doc {
        info!("{} is up to date", path.display());
        return Ok(false);
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &updated).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    info!("Wrote {} ({} bytes)", path.display(), updated.len());
    Ok(true)
}
