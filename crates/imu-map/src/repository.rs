//! File-system persistence for approved mappings.
//!
//! One JSON document per dataset, `{DATASET}_mapping.json` under the
//! mappings directory. A document is written once at approval time and
//! loaded read-only by every subsequent apply run; a changed convention
//! means a new artifact, never an edit.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use imu_model::ColumnMapping;

fn default_version() -> String {
    "1.0".to_string()
}

/// The persisted mapping artifact: the flat raw→canonical map plus
/// review metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMapping {
    /// Dataset the mapping was approved for.
    pub dataset: String,
    /// The approved raw→canonical pairs.
    pub columns: ColumnMapping,
    /// Raw columns the builder could not map, kept for review context.
    #[serde(default)]
    pub rejected: Vec<String>,
    /// ISO 8601 timestamp of approval.
    pub saved_at: Option<String>,
    /// Artifact format version.
    #[serde(default = "default_version")]
    pub version: String,
}

impl StoredMapping {
    pub fn new(dataset: impl Into<String>, columns: ColumnMapping, rejected: Vec<String>) -> Self {
        Self {
            dataset: dataset.into(),
            columns,
            rejected,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            version: default_version(),
        }
    }
}

/// Summary of one stored mapping, for listings.
#[derive(Debug, Clone)]
pub struct MappingMetadata {
    pub dataset: String,
    pub file_path: PathBuf,
    pub mapped_count: usize,
    pub rejected_count: usize,
    pub saved_at: Option<String>,
}

/// Directory-backed repository of approved mappings.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    /// Opens (creating if needed) a repository at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("failed to create mapping directory: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persists an approved mapping, returning the file it was written to.
    pub fn save(&self, stored: &StoredMapping) -> Result<PathBuf> {
        let path = self.mapping_path(&stored.dataset);
        let json = serde_json::to_string_pretty(stored)
            .with_context(|| format!("failed to serialize mapping for {}", stored.dataset))?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write mapping to {}", path.display()))?;
        Ok(path)
    }

    /// Loads the mapping for a dataset, or `None` if never approved.
    pub fn load(&self, dataset: &str) -> Result<Option<StoredMapping>> {
        let path = self.mapping_path(dataset);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read mapping from {}", path.display()))?;
        let stored: StoredMapping = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse mapping from {}", path.display()))?;
        Ok(Some(stored))
    }

    pub fn exists(&self, dataset: &str) -> bool {
        self.mapping_path(dataset).exists()
    }

    /// Lists every stored mapping, sorted by dataset name.
    pub fn list(&self) -> Result<Vec<MappingMetadata>> {
        let mut metadata = Vec::new();
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!("failed to read mapping directory: {}", self.base_dir.display())
        })?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file()
                || path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_none_or(|n| !n.ends_with("_mapping.json"))
            {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(stored) = serde_json::from_str::<StoredMapping>(&contents) {
                metadata.push(MappingMetadata {
                    dataset: stored.dataset,
                    file_path: path,
                    mapped_count: stored.columns.len(),
                    rejected_count: stored.rejected.len(),
                    saved_at: stored.saved_at,
                });
            }
        }
        metadata.sort_by(|a, b| a.dataset.cmp(&b.dataset));
        Ok(metadata)
    }

    fn mapping_path(&self, dataset: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}_mapping.json", normalize_dataset_id(dataset)))
    }
}

/// Normalizes a dataset name for use in filenames: uppercase, non-alphanumeric
/// characters replaced with underscores.
pub fn normalize_dataset_id(dataset: &str) -> String {
    dataset
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
