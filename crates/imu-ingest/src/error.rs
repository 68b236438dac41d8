//! Error types for the CSV boundary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    CsvRead { path: PathBuf, source: csv::Error },

    #[error("failed to write {path}: {source}")]
    CsvWrite { path: PathBuf, source: csv::Error },

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
