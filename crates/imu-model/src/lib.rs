#![deny(unsafe_code)]

//! Data model for wearable-sensor column harmonization.
//!
//! Defines the canonical `SEGMENT_SENSOR_AXIS` identifier scheme, the
//! classification vocabulary, and the persisted mapping artifact shared by
//! the mapping engine and the CLI.

pub mod canonical;
pub mod enums;
pub mod error;
pub mod mapping;
pub mod vocabulary;

pub use canonical::CanonicalColumnId;
pub use enums::{Axis, BodySegment, SensorType, Side};
pub use error::{ModelError, Result};
pub use mapping::{ColumnMapping, MappingEntry};
pub use vocabulary::{SegmentKeywords, SensorKeywords, Vocabulary};
