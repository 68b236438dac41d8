#![deny(unsafe_code)]

//! CSV boundary for the column harmonizer.
//!
//! Reads headers, applies finished rename plans as string-preserving
//! rewrites, and discovers the CSV corpus of a dataset tree. All decision
//! logic lives in `imu-map`; this crate only moves bytes.

pub mod csv_table;
pub mod discovery;
pub mod error;

pub use csv_table::{RewriteStats, read_headers, rewrite_with_plan};
pub use discovery::{dataset_name_from_path, find_csv_files, mirror_output_path};
pub use error::{IngestError, Result};
