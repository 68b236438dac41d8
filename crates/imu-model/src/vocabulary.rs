//! Canonical keyword vocabularies.
//!
//! The vocabulary is the single source of truth for classification: which
//! raw spellings belong to which segment or sensor, and which axes exist.
//! Entries are *ordered* and consulted first-match-wins, so precedence is a
//! property of the table itself rather than of any container's iteration
//! order. The built-in table pins the orderings that matter:
//!
//! - `THIGH` before `SHANK`, so `upper_leg` is not captured by SHANK's
//!   generic `leg` keyword;
//! - `ARM_LOWER` before `ARM_UPPER`, so `forearm` is not captured by the
//!   generic `arm` keyword.
//!
//! The whole table is serde-compatible so a deployment can supply its own
//! vocabulary file instead of the built-in one.

use serde::{Deserialize, Serialize};

use crate::enums::{Axis, BodySegment, SensorType};

/// Keyword list for one body segment.
///
/// Keywords are stored normalized: lowercase, no separators. Matching is
/// substring membership against a token normalized the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentKeywords {
    pub segment: BodySegment,
    pub keywords: Vec<String>,
}

/// Keyword list for one sensor type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorKeywords {
    pub sensor: SensorType,
    pub keywords: Vec<String>,
}

/// The ordered classification vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Segment keyword lists, in match-precedence order.
    pub segments: Vec<SegmentKeywords>,
    /// Sensor keyword lists, in match-precedence order.
    pub sensors: Vec<SensorKeywords>,
    /// Recognized axes.
    pub axes: Vec<Axis>,
}

fn segment_entry(segment: BodySegment, keywords: &[&str]) -> SegmentKeywords {
    SegmentKeywords {
        segment,
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

fn sensor_entry(sensor: SensorType, keywords: &[&str]) -> SensorKeywords {
    SensorKeywords {
        sensor,
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

impl Vocabulary {
    /// The built-in vocabulary covering the dataset conventions observed in
    /// the supported corpora (HuGaDB, Xsens exports, RealWorld-style names).
    pub fn builtin() -> Self {
        Self {
            segments: vec![
                segment_entry(BodySegment::Thigh, &["thigh", "upperleg"]),
                segment_entry(BodySegment::Shank, &["shank", "shin", "lowerleg", "leg"]),
                segment_entry(BodySegment::Foot, &["foot"]),
                segment_entry(BodySegment::Ankle, &["ankle"]),
                segment_entry(BodySegment::Pelvis, &["pelvis", "sacrum"]),
                segment_entry(BodySegment::Trunk, &["trunk", "sternum", "chest", "thorax"]),
                segment_entry(
                    BodySegment::ArmLower,
                    &["forearm", "lowerarm", "armlower", "radius", "ulna"],
                ),
                segment_entry(
                    BodySegment::ArmUpper,
                    &["upperarm", "armupper", "humerus", "arm"],
                ),
                segment_entry(BodySegment::Shoulder, &["shoulder"]),
                segment_entry(BodySegment::Hand, &["hand", "wrist"]),
                segment_entry(BodySegment::Neck, &["neck"]),
                segment_entry(BodySegment::Head, &["head"]),
            ],
            sensors: vec![
                sensor_entry(
                    SensorType::Acc,
                    &["acc", "acceleration", "accelerometer"],
                ),
                sensor_entry(
                    SensorType::Gyr,
                    &["gyr", "gyro", "gyroscope", "angularvelocity"],
                ),
                sensor_entry(
                    SensorType::Mag,
                    &["mag", "magnetometer", "magnometer", "magneticfield"],
                ),
            ],
            axes: Axis::all().to_vec(),
        }
    }

    /// Sensor keywords flattened, for quick "looks like sensor data" checks.
    pub fn sensor_keywords(&self) -> impl Iterator<Item = &str> {
        self.sensors
            .iter()
            .flat_map(|entry| entry.keywords.iter().map(String::as_str))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_orders_thigh_before_shank() {
        let vocab = Vocabulary::builtin();
        let thigh = vocab
            .segments
            .iter()
            .position(|e| e.segment == BodySegment::Thigh)
            .unwrap();
        let shank = vocab
            .segments
            .iter()
            .position(|e| e.segment == BodySegment::Shank)
            .unwrap();
        assert!(thigh < shank);
    }

    #[test]
    fn builtin_orders_arm_lower_before_arm_upper() {
        let vocab = Vocabulary::builtin();
        let lower = vocab
            .segments
            .iter()
            .position(|e| e.segment == BodySegment::ArmLower)
            .unwrap();
        let upper = vocab
            .segments
            .iter()
            .position(|e| e.segment == BodySegment::ArmUpper)
            .unwrap();
        assert!(lower < upper);
    }

    #[test]
    fn keywords_are_stored_normalized() {
        let vocab = Vocabulary::builtin();
        for entry in &vocab.segments {
            for keyword in &entry.keywords {
                assert_eq!(keyword, &keyword.to_lowercase());
                assert!(!keyword.contains('_'));
            }
        }
    }
}
