//! Command implementations.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use imu_ingest::{
    dataset_name_from_path, find_csv_files, mirror_output_path, read_headers, rewrite_with_plan,
};
use imu_map::{
    ConsistencyReport, MappingBuilder, MappingRepository, PatternSet, RenamePlan, StoredMapping,
};
use imu_model::Vocabulary;

use crate::cli::{ApplyArgs, MapArgs, MappingsArgs};
use crate::summary::apply_table_style;
use crate::types::{ApplyResult, FileOutcome, FileStatus, MapResult};

/// Builds a mapping proposal from a sample file's header.
///
/// Approval happens afterwards (see [`approve_and_save`]); this function
/// only proposes.
pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    let dataset = resolve_dataset(args.dataset.as_deref(), &args.sample, true)?;
    let span = info_span!("map", dataset = %dataset);
    let _guard = span.enter();

    let columns = read_headers(&args.sample)
        .with_context(|| format!("failed to read sample file {}", args.sample.display()))?;
    info!(columns = columns.len(), "read sample header");

    let vocab = load_vocabulary(args.vocabulary.as_deref())?;
    let draft = MappingBuilder::new(&vocab).build(&columns);
    let report = ConsistencyReport::from_mapping(&draft.mapping);
    info!(
        mapped = draft.mapping.len(),
        rejected = draft.rejected.len(),
        "built mapping proposal"
    );

    Ok(MapResult {
        dataset,
        columns,
        draft,
        report,
        vocab,
        saved_to: None,
    })
}

/// The built-in vocabulary, or a JSON table supplied as configuration.
fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse vocabulary {}", path.display()))
        }
        None => Ok(Vocabulary::builtin()),
    }
}

/// Asks for approval (unless `--yes`) and persists the proposed mapping.
///
/// An unapproved mapping is not saved; the run still succeeds.
pub fn approve_and_save(args: &MapArgs, result: &mut MapResult) -> Result<()> {
    if result.draft.mapping.is_empty() {
        warn!("nothing mapped; skipping approval");
        return Ok(());
    }
    let approved = args.yes || confirm("Approve this mapping? [y/N]: ")?;
    if !approved {
        info!("mapping not approved, not saved");
        return Ok(());
    }
    let repository = MappingRepository::new(&args.mapping_dir)?;
    let rejected = result
        .draft
        .rejected
        .iter()
        .map(|r| r.raw.clone())
        .collect();
    let stored = StoredMapping::new(result.dataset.as_str(), result.draft.mapping.clone(), rejected);
    let path = repository.save(&stored)?;
    result.saved_to = Some(path);
    Ok(())
}

/// Applies a previously approved mapping to every CSV under the dataset
/// root. Aborts before touching any file when no mapping exists.
pub fn run_apply(args: &ApplyArgs) -> Result<ApplyResult> {
    let dataset = resolve_dataset(args.dataset.as_deref(), &args.root, false)?;
    let span = info_span!("apply", dataset = %dataset);
    let _guard = span.enter();

    let repository = MappingRepository::new(&args.mapping_dir)?;
    let Some(stored) = repository.load(&dataset)? else {
        bail!(
            "no approved mapping for dataset {dataset} in {}; \
             run `imu-harmonizer map` on a sample file first",
            args.mapping_dir.display()
        );
    };
    let mapping = stored.columns;

    let files = find_csv_files(&args.root)
        .with_context(|| format!("failed to scan dataset root {}", args.root.display()))?;
    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_root(&args.root));
    info!(
        files = files.len(),
        output = %output_root.display(),
        dry_run = args.dry_run,
        "applying mapping"
    );

    let progress = progress_bar(files.len() as u64);
    let mut outcomes = Vec::with_capacity(files.len());
    for input in &files {
        let output = mirror_output_path(input, &args.root, &output_root);
        outcomes.push(convert_file(input, &output, &mapping, args.dry_run));
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(ApplyResult {
        dataset,
        output_root,
        dry_run: args.dry_run,
        files: outcomes,
    })
}

/// Converts one file; any failure is captured in the outcome so the batch
/// continues.
fn convert_file(
    input: &Path,
    output: &Path,
    mapping: &imu_model::ColumnMapping,
    dry_run: bool,
) -> FileOutcome {
    let headers = match read_headers(input) {
        Ok(headers) => headers,
        Err(error) => {
            warn!(file = %input.display(), %error, "failed to read file");
            return FileOutcome {
                input: input.to_path_buf(),
                output: None,
                status: FileStatus::Failed,
                renamed_columns: 0,
                rows: 0,
                error: Some(error.to_string()),
            };
        }
    };
    let plan = RenamePlan::build(&headers, mapping);
    let status = if plan.renamed_count() > 0 {
        FileStatus::Converted
    } else {
        FileStatus::NoRelevantColumns
    };

    if dry_run {
        return FileOutcome {
            input: input.to_path_buf(),
            output: Some(output.to_path_buf()),
            status,
            renamed_columns: plan.renamed_count(),
            rows: 0,
            error: None,
        };
    }

    match rewrite_with_plan(input, output, &plan) {
        Ok(stats) => FileOutcome {
            input: input.to_path_buf(),
            output: Some(output.to_path_buf()),
            status,
            renamed_columns: stats.renamed_columns,
            rows: stats.rows,
            error: None,
        },
        Err(error) => {
            warn!(file = %input.display(), %error, "failed to convert file");
            FileOutcome {
                input: input.to_path_buf(),
                output: None,
                status: FileStatus::Failed,
                renamed_columns: 0,
                rows: 0,
                error: Some(error.to_string()),
            }
        }
    }
}

/// Prints the registered structural patterns in attempt order.
pub fn run_patterns() -> Result<()> {
    let mut table = comfy_table::Table::new();
    table.set_header(vec!["Priority", "Pattern", "Shape", "Example"]);
    apply_table_style(&mut table);
    for (index, pattern) in PatternSet::builtin().patterns().iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            pattern.id().to_string(),
            pattern.as_regex_str().to_string(),
            pattern.id().example().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Lists the approved mappings stored in the mapping directory.
pub fn run_mappings(args: &MappingsArgs) -> Result<()> {
    let repository = MappingRepository::new(&args.mapping_dir)?;
    let listed = repository.list()?;
    if listed.is_empty() {
        println!("No mappings in {}", args.mapping_dir.display());
        return Ok(());
    }
    let mut table = comfy_table::Table::new();
    table.set_header(vec!["Dataset", "Mapped", "Rejected", "Saved at", "File"]);
    apply_table_style(&mut table);
    for meta in listed {
        table.add_row(vec![
            meta.dataset,
            meta.mapped_count.to_string(),
            meta.rejected_count.to_string(),
            meta.saved_at.unwrap_or_else(|| "-".to_string()),
            meta.file_path.display().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Dataset name precedence: explicit flag, then the path-derived name.
/// For a sample file the parent directory names the dataset; for a root
/// directory the directory itself does.
fn resolve_dataset(explicit: Option<&str>, path: &Path, path_is_file: bool) -> Result<String> {
    if let Some(name) = explicit {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            bail!("--dataset must not be empty");
        }
        return Ok(trimmed.to_uppercase());
    }
    let source = if path_is_file {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    dataset_name_from_path(source)
        .filter(|name| !name.is_empty())
        .with_context(|| {
            format!(
                "cannot derive a dataset name from {}; pass --dataset",
                path.display()
            )
        })
}

fn default_output_root(root: &Path) -> PathBuf {
    let mut name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    name.push_str("_synced");
    root.parent().map(|p| p.join(&name)).unwrap_or_else(|| PathBuf::from(name))
}

fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        info!("stdin is not a terminal; treating approval as declined");
        return Ok(false);
    }
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read approval reply")?;
    let reply = line.trim().to_lowercase();
    Ok(reply == "y" || reply == "yes")
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{prefix} [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_prefix("Converting");
    bar
}
