//! Header reading and rename rewriting for CSV files.
//!
//! The rewrite is string-preserving: cells are copied verbatim, only the
//! header row changes (and dropped-duplicate columns are omitted). The
//! output file is written in one pass from a finished [`RenamePlan`], so a
//! failed run never leaves a half-renamed file behind.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use imu_map::RenamePlan;

use crate::error::{IngestError, Result};

/// Cleans one raw header cell: strips a UTF-8 BOM and surrounding
/// whitespace, collapses inner whitespace runs to single spaces.
fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim_matches('\u{feff}').trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads the header row of a CSV file.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader.headers().map_err(|source| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    })?;
    if headers.is_empty() {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    Ok(headers.iter().map(normalize_header).collect())
}

/// Row and column counts of one rewrite, for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub rows: usize,
    pub renamed_columns: usize,
    pub dropped_columns: usize,
}

/// Copies `input` to `output` with the plan's header names, dropping the
/// plan's duplicate columns and passing every other cell through verbatim.
pub fn rewrite_with_plan(input: &Path, output: &Path, plan: &RenamePlan) -> Result<RewriteStats> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| IngestError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .map_err(|source| IngestError::CsvRead {
            path: input.to_path_buf(),
            source,
        })?;
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(output)
        .map_err(|source| IngestError::CsvWrite {
            path: output.to_path_buf(),
            source,
        })?;

    let kept = plan.kept_indices();
    writer
        .write_record(plan.output_headers())
        .map_err(|source| IngestError::CsvWrite {
            path: output.to_path_buf(),
            source,
        })?;

    let mut rows = 0usize;
    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|source| IngestError::CsvRead {
                path: input.to_path_buf(),
                source,
            })?;
        if !more {
            break;
        }
        let cells: Vec<&str> = kept
            .iter()
            .map(|&index| record.get(index).unwrap_or(""))
            .collect();
        writer
            .write_record(&cells)
            .map_err(|source| IngestError::CsvWrite {
                path: output.to_path_buf(),
                source,
            })?;
        rows += 1;
    }

    writer.flush().map_err(|source| IngestError::CsvWrite {
        path: output.to_path_buf(),
        source: csv::Error::from(source),
    })?;

    debug!(input = %input.display(), output = %output.display(), rows, "rewrote csv");
    Ok(RewriteStats {
        rows,
        renamed_columns: plan.renamed_count(),
        dropped_columns: plan.dropped_count(),
    })
}
