//! Folds pinyin annotation files into a [`CharTable`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug_span, info};

use crate::initials::InitialTable;
use crate::parse::{parse_line, ParseError};
use crate::table::CharTable;
use crate::unicode::is_common;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Line counts for one source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines: usize,
    /// Blank and comment lines.
    pub skipped: usize,
    pub out_of_repertoire: usize,
    pub no_initials: usize,
    /// Records that reached the table.
    pub records: usize,
}

/// Accumulates glyphs from any number of sources into one table.
pub struct Aggregator<'t> {
    initials: &'t InitialTable,
    table: CharTable,
}

impl<'t> Aggregator<'t> {
    pub fn new(initials: &'t InitialTable) -> Self {
        Self {
            initials,
            table: CharTable::new(initials),
        }
    }

    /// Read every line of `reader`. `label` only names the source in errors.
    pub fn add_reader(
        &mut self,
        label: &Path,
        reader: impl BufRead,
    ) -> Result<FileStats, AggregateError> {
        let mut stats = FileStats::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| AggregateError::Io {
                path: label.to_path_buf(),
                source,
            })?;
            stats.lines += 1;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                stats.skipped += 1;
                continue;
            }

            let record = parse_line(line, self.initials).map_err(|source| {
                AggregateError::Parse {
                    path: label.to_path_buf(),
                    line: idx + 1,
                    source,
                }
            })?;

            if !is_common(record.code_point) {
                stats.out_of_repertoire += 1;
                continue;
            }
            if record.initials.is_empty() {
                stats.no_initials += 1;
                continue;
            }

            for initial in &record.initials {
                self.table.insert(initial, &record.glyph);
            }
            stats.records += 1;
        }

        Ok(stats)
    }

    /// Open `path` and fold it in. Missing files are an error.
    pub fn add_file(&mut self, path: &Path) -> Result<FileStats, AggregateError> {
        let _span = debug_span!("add_file", path = %path.display()).entered();
        let file = File::open(path).map_err(|source| AggregateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stats = self.add_reader(path, BufReader::new(file))?;
        info!(
            "{}: {} records ({} out of range, {} without initials, skipped {} of {} lines)",
            path.display(),
            stats.records,
            stats.out_of_repertoire,
            stats.no_initials,
            stats.skipped,
            stats.lines
        );
        Ok(stats)
    }

    /// Fold `paths` in order, stopping at the first failure.
    pub fn add_files<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
    ) -> Result<Vec<FileStats>, AggregateError> {
        paths.iter().map(|p| self.add_file(p.as_ref())).collect()
    }

    pub fn table(&self) -> &CharTable {
        &self.table
    }

    pub fn finish(self) -> CharTable {
        self.table
    }
}

#[cfg(test)]
mod tests;
