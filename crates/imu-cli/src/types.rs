//! Result carriers for CLI runs.

use std::path::PathBuf;

use imu_map::{ConsistencyReport, MappingDraft};
use imu_model::Vocabulary;

/// Outcome of a `map` run.
pub struct MapResult {
    /// Dataset the mapping was built for.
    pub dataset: String,
    /// All column names read from the sample file.
    pub columns: Vec<String>,
    /// The proposed mapping and its rejections.
    pub draft: MappingDraft,
    /// Consistency counts over the proposal.
    pub report: ConsistencyReport,
    /// Vocabulary the proposal was classified against.
    pub vocab: Vocabulary,
    /// Where the approved mapping was saved, if it was approved.
    pub saved_to: Option<PathBuf>,
}

/// How one file fared during an `apply` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// At least one column was renamed.
    Converted,
    /// Copied through; no column intersected the mapping.
    NoRelevantColumns,
    /// Could not be read or written; the batch continued.
    Failed,
}

/// Per-file record of an `apply` run.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
    pub renamed_columns: usize,
    pub rows: usize,
    pub error: Option<String>,
}

/// Outcome of an `apply` run.
#[derive(Debug)]
pub struct ApplyResult {
    pub dataset: String,
    pub output_root: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
}

impl ApplyResult {
    pub fn attempted(&self) -> usize {
        self.files.len()
    }

    pub fn converted(&self) -> usize {
        self.count(FileStatus::Converted)
    }

    pub fn no_relevant_columns(&self) -> usize {
        self.count(FileStatus::NoRelevantColumns)
    }

    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    pub fn renamed_columns_total(&self) -> usize {
        self.files.iter().map(|f| f.renamed_columns).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}
