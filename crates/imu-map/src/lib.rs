#![deny(unsafe_code)]

//! Column name canonicalization engine.
//!
//! Classifies heterogeneous wearable-sensor column names into the canonical
//! `SEGMENT_SENSOR_AXIS` scheme, builds and validates a one-shot mapping
//! for a dataset's column set, and applies a persisted mapping
//! deterministically across a file corpus.
//!
//! The deterministic path is pure: the same column name against the same
//! ordered pattern set and vocabulary always produces the same outcome. An
//! optional [`inference::ColumnInference`] collaborator can be injected for
//! names the deterministic rules cannot resolve.

pub mod apply;
pub mod canonicalize;
pub mod detect;
pub mod engine;
pub mod inference;
pub mod lexicon;
pub mod patterns;
pub mod report;
pub mod repository;

pub use apply::{Disposition, PlannedColumn, RenamePlan};
pub use canonicalize::{Outcome, RejectReason, canonicalize};
pub use detect::{Convention, ConventionDetector};
pub use engine::{MappingBuilder, MappingDraft, RejectedColumn};
pub use inference::{ColumnInference, InferredColumn, Proposal};
pub use patterns::{PatternId, PatternSet, RawParts, StructuralPattern};
pub use report::{ConsistencyReport, segment_term_summary};
pub use repository::{MappingMetadata, MappingRepository, StoredMapping};
