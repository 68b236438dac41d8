//! Lexical classification of raw segment and sensor tokens.
//!
//! Tokens are normalized (lowercased, separators stripped) and then tested
//! for keyword membership against the vocabulary's ordered lists. First
//! match wins; the vocabulary's declaration order is the precedence order,
//! so the same inputs always classify the same way. Absence of a match is a
//! valid outcome, not an error.

use imu_model::{BodySegment, SensorType, Side, Vocabulary};

/// Side indicators tried against the start of a normalized segment token.
/// Longest first, so `left_foot` resolves via `left` rather than `l`.
const SIDE_INDICATORS: [(&str, Side); 4] = [
    ("left", Side::Left),
    ("right", Side::Right),
    ("l", Side::Left),
    ("r", Side::Right),
];

/// Lowercases a raw token and strips the separators datasets use.
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|ch| !matches!(*ch, '_' | '-' | '.' | ' '))
        .collect()
}

/// Classifies a raw segment token into a side and a body segment.
///
/// The side comes from a leading left/right indicator on the normalized
/// token; the segment from ordered keyword membership over the whole token.
/// `None` segment means the token is unclassifiable and the caller must
/// reject the column.
pub fn classify_segment(raw: &str, vocab: &Vocabulary) -> (Side, Option<BodySegment>) {
    let normalized = normalize_token(raw);
    let side = SIDE_INDICATORS
        .iter()
        .find(|(indicator, _)| normalized.starts_with(indicator))
        .map(|(_, side)| *side)
        .unwrap_or(Side::None);
    let segment = match_segment(&normalized, vocab);
    (side, segment)
}

/// Classifies a raw sensor token via ordered keyword membership.
pub fn classify_sensor(raw: &str, vocab: &Vocabulary) -> Option<SensorType> {
    let normalized = normalize_token(raw);
    for entry in &vocab.sensors {
        if entry.keywords.iter().any(|kw| normalized.contains(kw.as_str())) {
            return Some(entry.sensor);
        }
    }
    None
}

fn match_segment(normalized: &str, vocab: &Vocabulary) -> Option<BodySegment> {
    for entry in &vocab.segments {
        if entry.keywords.iter().any(|kw| normalized.contains(kw.as_str())) {
            return Some(entry.segment);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::builtin()
    }

    #[test]
    fn segment_side_from_word_indicator() {
        assert_eq!(
            classify_segment("right_foot", &vocab()),
            (Side::Right, Some(BodySegment::Foot))
        );
        assert_eq!(
            classify_segment("left_thigh", &vocab()),
            (Side::Left, Some(BodySegment::Thigh))
        );
    }

    #[test]
    fn segment_side_from_single_letter() {
        assert_eq!(
            classify_segment("LThigh", &vocab()),
            (Side::Left, Some(BodySegment::Thigh))
        );
        assert_eq!(
            classify_segment("RShank", &vocab()),
            (Side::Right, Some(BodySegment::Shank))
        );
    }

    #[test]
    fn upper_leg_is_thigh_not_shank() {
        let (_, segment) = classify_segment("RightUpperLeg", &vocab());
        assert_eq!(segment, Some(BodySegment::Thigh));
        let (_, segment) = classify_segment("LeftLowerLeg", &vocab());
        assert_eq!(segment, Some(BodySegment::Shank));
    }

    #[test]
    fn forearm_is_arm_lower_not_arm_upper() {
        let (_, segment) = classify_segment("LeftForeArm", &vocab());
        assert_eq!(segment, Some(BodySegment::ArmLower));
    }

    #[test]
    fn midline_tokens_have_no_side() {
        assert_eq!(
            classify_segment("Pelvis", &vocab()),
            (Side::None, Some(BodySegment::Pelvis))
        );
        assert_eq!(
            classify_segment("chest", &vocab()),
            (Side::None, Some(BodySegment::Trunk))
        );
    }

    #[test]
    fn unknown_segment_is_none() {
        assert_eq!(classify_segment("waist", &vocab()).1, None);
        assert_eq!(classify_segment("", &vocab()).1, None);
    }

    #[test]
    fn sensor_keywords_match_case_insensitively() {
        assert_eq!(classify_sensor("accelerometer", &vocab()), Some(SensorType::Acc));
        assert_eq!(classify_sensor("Gyr", &vocab()), Some(SensorType::Gyr));
        assert_eq!(
            classify_sensor("sensorMagneticField", &vocab()),
            Some(SensorType::Mag)
        );
        assert_eq!(
            classify_sensor("angularVelocity", &vocab()),
            Some(SensorType::Gyr)
        );
    }

    #[test]
    fn non_inertial_sensor_is_none() {
        assert_eq!(classify_sensor("EMG", &vocab()), None);
        assert_eq!(classify_sensor("pressure", &vocab()), None);
    }
}
