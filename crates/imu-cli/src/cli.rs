//! CLI argument definitions for the sensor column harmonizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "imu-harmonizer",
    version,
    about = "Harmonize wearable-sensor CSV column names",
    long_about = "Normalize heterogeneous wearable-sensor column names into the\n\
                  canonical SEGMENT_SENSOR_AXIS scheme (e.g. R_FOOT_ACC_X).\n\n\
                  Build and approve a mapping from a sample file with `map`,\n\
                  then rename a whole dataset tree with `apply`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a column mapping from a sample CSV and save it after approval.
    Map(MapArgs),

    /// Apply a saved mapping to every CSV file under a dataset root.
    Apply(ApplyArgs),

    /// List the registered structural patterns in attempt order.
    Patterns,

    /// List saved mappings in the mapping directory.
    Mappings(MappingsArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Sample CSV file whose header represents the dataset's convention.
    #[arg(value_name = "SAMPLE_CSV")]
    pub sample: PathBuf,

    /// Dataset name the mapping is stored under (default: the sample's
    /// parent directory name, uppercased).
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: Option<String>,

    /// Directory where approved mappings are stored.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = "mappings")]
    pub mapping_dir: PathBuf,

    /// JSON vocabulary file overriding the built-in segment/sensor/axis
    /// keyword tables.
    #[arg(long = "vocabulary", value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Approve and save the mapping without prompting.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Dataset root directory to scan for CSV files.
    #[arg(value_name = "DATASET_ROOT")]
    pub root: PathBuf,

    /// Dataset name whose mapping to apply (default: the root directory
    /// name, uppercased).
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: Option<String>,

    /// Directory where approved mappings are stored.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = "mappings")]
    pub mapping_dir: PathBuf,

    /// Output root for renamed files (default: `<DATASET_ROOT>_synced`).
    /// Inputs are never modified in place.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List the files that would be converted without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct MappingsArgs {
    /// Directory where approved mappings are stored.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = "mappings")]
    pub mapping_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
