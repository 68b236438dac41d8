//! Recursive CSV discovery and output-tree mirroring.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Recursively finds all CSV files under `root`, sorted by path.
///
/// Sorting makes batch runs process files in a stable order regardless of
/// directory-entry ordering.
pub fn find_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    collect_csv_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_csv_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry_result in entries {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_csv_files(&path, files)?;
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            files.push(path);
        }
    }
    Ok(())
}

/// Mirrors an input path into the output tree: the path of `input` relative
/// to `input_root`, re-rooted at `output_root`.
///
/// An input outside the root (should not happen for discovered files)
/// falls back to its bare file name.
pub fn mirror_output_path(input: &Path, input_root: &Path, output_root: &Path) -> PathBuf {
    match input.strip_prefix(input_root) {
        Ok(relative) => output_root.join(relative),
        Err(_) => match input.file_name() {
            Some(name) => output_root.join(name),
            None => output_root.to_path_buf(),
        },
    }
}

/// Derives a dataset name from its root directory: the uppercased final
/// path component.
pub fn dataset_name_from_path(root: &Path) -> Option<String> {
    root.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "col\n1\n").unwrap();
    }

    #[test]
    fn finds_csv_files_recursively_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.csv"));
        touch(&dir.path().join("sub/a.csv"));
        touch(&dir.path().join("sub/deep/c.CSV"));
        touch(&dir.path().join("sub/readme.txt"));

        let files = find_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["b.csv", "sub/a.csv", "sub/deep/c.CSV"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_csv_files(&missing),
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn output_path_mirrors_subtree() {
        let out = mirror_output_path(
            Path::new("/data/raw/HUGADB/sub/file.csv"),
            Path::new("/data/raw/HUGADB"),
            Path::new("/data/synced/HUGADB"),
        );
        assert_eq!(out, Path::new("/data/synced/HUGADB/sub/file.csv"));
    }

    #[test]
    fn dataset_name_is_uppercased_stem() {
        assert_eq!(
            dataset_name_from_path(Path::new("/data/raw/hugadb")).as_deref(),
            Some("HUGADB")
        );
    }
}
