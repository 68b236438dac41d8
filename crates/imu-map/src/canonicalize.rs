//! Canonicalization of a single raw column name.

use std::str::FromStr;

use imu_model::{Axis, CanonicalColumnId, Side, Vocabulary};
use thiserror::Error;

use crate::lexicon::{classify_segment, classify_sensor};
use crate::patterns::PatternSet;

/// Why a column was excluded from the mapping.
///
/// These are classification outcomes, not failures: a rejected column is
/// logged and skipped while processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("no structural pattern matches")]
    StructuralMismatch,
    #[error("sensor token {0:?} is not an inertial sensor")]
    UnknownSensor(String),
    #[error("segment token {0:?} is not a known body segment")]
    UnknownSegment(String),
    #[error("segment token {0:?} is bilateral but carries no side indicator")]
    MissingSide(String),
    #[error("axis token {0:?} is not one of X, Y, Z")]
    InvalidAxis(String),
    #[error("canonical target {0} already produced by an earlier column")]
    DuplicateTarget(String),
    #[error("not sensor data: {0}")]
    NonSensor(String),
    #[error("inference collaborator: {0}")]
    Collaborator(String),
}

/// Result of canonicalizing one raw column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Canonical(CanonicalColumnId),
    Rejected(RejectReason),
}

impl Outcome {
    pub fn canonical(&self) -> Option<&CanonicalColumnId> {
        match self {
            Outcome::Canonical(id) => Some(id),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Canonicalizes `raw` against the pattern set, first
/// structural-and-semantic success wins.
///
/// Patterns are attempted in the set's order. A pattern that matches
/// structurally but fails classification (unknown sensor or segment,
/// side-less bilateral segment, axis outside X/Y/Z) falls through to the
/// next pattern; the first semantic failure is reported if every pattern
/// falls through. A side indicator on a midline segment is discarded —
/// midline identifiers are never prefixed.
///
/// Pure function of its inputs: the same name against the same ordered set
/// and vocabulary always yields the same outcome.
pub fn canonicalize(raw: &str, patterns: &PatternSet, vocab: &Vocabulary) -> Outcome {
    let mut semantic_failure: Option<RejectReason> = None;

    for pattern in patterns.patterns() {
        let Some(parts) = pattern.extract(raw) else {
            continue;
        };
        match classify_parts(&parts.sensor, &parts.segment, &parts.axis, vocab) {
            Ok(id) => return Outcome::Canonical(id),
            Err(reason) => {
                semantic_failure.get_or_insert(reason);
            }
        }
    }

    Outcome::Rejected(semantic_failure.unwrap_or(RejectReason::StructuralMismatch))
}

fn classify_parts(
    raw_sensor: &str,
    raw_segment: &str,
    raw_axis: &str,
    vocab: &Vocabulary,
) -> Result<CanonicalColumnId, RejectReason> {
    let Some(sensor) = classify_sensor(raw_sensor, vocab) else {
        return Err(RejectReason::UnknownSensor(raw_sensor.to_string()));
    };
    let (side, segment) = classify_segment(raw_segment, vocab);
    let Some(segment) = segment else {
        return Err(RejectReason::UnknownSegment(raw_segment.to_string()));
    };
    let axis = Axis::from_str(raw_axis)
        .map_err(|_| RejectReason::InvalidAxis(raw_axis.to_string()))?;
    if !vocab.axes.contains(&axis) {
        return Err(RejectReason::InvalidAxis(raw_axis.to_string()));
    }
    // Midline segments shed any detected side; bilateral ones require one.
    let side = if segment.is_midline() { Side::None } else { side };
    if segment.is_bilateral() && !side.is_lateral() {
        return Err(RejectReason::MissingSide(raw_segment.to_string()));
    }
    CanonicalColumnId::new(side, segment, sensor, axis)
        .map_err(|_| RejectReason::UnknownSegment(raw_segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> Outcome {
        canonicalize(raw, &PatternSet::builtin(), &Vocabulary::builtin())
    }

    #[test]
    fn hugadb_accelerometer_column() {
        let Outcome::Canonical(id) = run("accelerometer_right_foot_x") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "R_FOOT_ACC_X");
    }

    #[test]
    fn hugadb_gyroscope_column() {
        let Outcome::Canonical(id) = run("gyroscope_left_thigh_z") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "L_THIGH_GYR_Z");
    }

    #[test]
    fn shin_is_shank() {
        let Outcome::Canonical(id) = run("accelerometer_right_shin_x") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "R_SHANK_ACC_X");
    }

    #[test]
    fn xsens_angular_velocity_is_gyr() {
        let Outcome::Canonical(id) = run("angularVelocity_RightFoot_x") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "R_FOOT_GYR_X");
    }

    #[test]
    fn xsens_camel_sensor_column() {
        let Outcome::Canonical(id) = run("sensorFreeAcceleration_LeftLowerLeg_z") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "L_SHANK_ACC_Z");
    }

    #[test]
    fn sensor_axis_segment_column() {
        let Outcome::Canonical(id) = run("Acc_X_LThigh") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "L_THIGH_ACC_X");
    }

    #[test]
    fn emg_is_rejected() {
        assert!(matches!(run("EMG_right"), Outcome::Rejected(_)));
    }

    #[test]
    fn midline_side_token_is_discarded() {
        let Outcome::Canonical(id) = run("accelerometer_left_pelvis_x") else {
            panic!("expected canonical outcome");
        };
        assert_eq!(id.to_string(), "PELVIS_ACC_X");
    }

    #[test]
    fn bilateral_without_side_is_rejected() {
        assert_eq!(
            run("acc_thigh_x"),
            Outcome::Rejected(RejectReason::MissingSide("thigh".to_string()))
        );
    }

    #[test]
    fn unmatched_shape_is_structural_mismatch() {
        assert_eq!(
            run("timestamp"),
            Outcome::Rejected(RejectReason::StructuralMismatch)
        );
    }

    #[test]
    fn canonicalize_is_deterministic() {
        let first = run("sensorAcceleration_RightForeArm_y");
        let second = run("sensorAcceleration_RightForeArm_y");
        assert_eq!(first, second);
    }
}
