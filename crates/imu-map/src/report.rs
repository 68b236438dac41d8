//! Derived summaries over a proposed mapping.
//!
//! Real datasets are frequently missing sensor/segment/axis combinations,
//! so a count mismatch here is a data-quality signal for the reviewer, not
//! an error.

use std::collections::{BTreeMap, BTreeSet};

use imu_model::{Axis, BodySegment, ColumnMapping, SensorType, Side, Vocabulary};

use crate::lexicon::normalize_token;

/// Distinct-value counts over a mapping's canonical output set, plus the
/// combinatorial column count those values would predict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub sides: BTreeSet<Side>,
    pub bilateral_segments: BTreeSet<BodySegment>,
    pub midline_segments: BTreeSet<BodySegment>,
    pub sensors: BTreeSet<SensorType>,
    pub axes: BTreeSet<Axis>,
    pub mapped: usize,
}

impl ConsistencyReport {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        let mut sides = BTreeSet::new();
        let mut bilateral_segments = BTreeSet::new();
        let mut midline_segments = BTreeSet::new();
        let mut sensors = BTreeSet::new();
        let mut axes = BTreeSet::new();

        for id in mapping.targets() {
            if id.side().is_lateral() {
                sides.insert(id.side());
            }
            if id.segment().is_midline() {
                midline_segments.insert(id.segment());
            } else {
                bilateral_segments.insert(id.segment());
            }
            sensors.insert(id.sensor());
            axes.insert(id.axis());
        }

        Self {
            sides,
            bilateral_segments,
            midline_segments,
            sensors,
            axes,
            mapped: mapping.len(),
        }
    }

    /// `sides × |bilateral segments| × |axes| × |sensors|` plus the midline
    /// term with a side multiplicity of one.
    pub fn expected(&self) -> usize {
        let axes = self.axes.len();
        let sensors = self.sensors.len();
        self.sides.len() * self.bilateral_segments.len() * axes * sensors
            + self.midline_segments.len() * axes * sensors
    }

    /// True when the mapped column count equals the combinatorial
    /// expectation.
    pub fn is_complete(&self) -> bool {
        self.expected() == self.mapped
    }

    /// Human-readable version of the count calculation, for run summaries.
    pub fn formula(&self) -> String {
        let segments = self.bilateral_segments.len() + self.midline_segments.len();
        let side_part = match (self.bilateral_segments.is_empty(), self.midline_segments.is_empty())
        {
            (false, false) => format!("{}(bil)+1(mid)", self.sides.len()),
            (false, true) => self.sides.len().to_string(),
            (true, _) => "1".to_string(),
        };
        let mut formula = format!(
            "{} total = {} (side) x {} (axis) x {} (sensor) x {} (location)  ->  calc = {}",
            self.mapped,
            side_part,
            self.axes.len(),
            self.sensors.len(),
            segments,
            self.expected()
        );
        if !self.is_complete() {
            formula.push_str(&format!(
                "  [diff {}]",
                self.mapped as i64 - self.expected() as i64
            ));
        }
        formula
    }
}

/// Infers which raw spellings stood for which canonical segment in a
/// mapping, for the reviewer's before/after report.
///
/// Scans each raw name for the matched segment's own vocabulary keywords;
/// returns `keyword -> canonical segment label`, sorted by keyword.
pub fn segment_term_summary(
    mapping: &ColumnMapping,
    vocab: &Vocabulary,
) -> BTreeMap<String, String> {
    let mut terms = BTreeMap::new();
    for entry in mapping.entries() {
        let normalized = normalize_token(&entry.raw);
        let segment = entry.canonical.segment();
        let Some(keywords) = vocab
            .segments
            .iter()
            .find(|seg| seg.segment == segment)
            .map(|seg| &seg.keywords)
        else {
            continue;
        };
        for keyword in keywords {
            if normalized.contains(keyword.as_str()) {
                terms.insert(keyword.clone(), segment.as_str().to_string());
                break;
            }
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu_model::CanonicalColumnId;

    fn mapping_of(pairs: &[(&str, &str)]) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        for (raw, canonical) in pairs {
            mapping
                .insert(*raw, canonical.parse::<CanonicalColumnId>().unwrap())
                .unwrap();
        }
        mapping
    }

    /// Sides {L,R}, axes {X,Y,Z}, sensors {ACC,GYR}, FOOT bilateral plus
    /// PELVIS midline: 2*3*2*1 + 3*2*1 = 18.
    #[test]
    fn expected_count_splits_bilateral_and_midline() {
        let mut pairs = Vec::new();
        for side in ["L", "R"] {
            for sensor in ["ACC", "GYR"] {
                for axis in ["X", "Y", "Z"] {
                    pairs.push(format!("{side}_FOOT_{sensor}_{axis}"));
                }
            }
        }
        for sensor in ["ACC", "GYR"] {
            for axis in ["X", "Y", "Z"] {
                pairs.push(format!("PELVIS_{sensor}_{axis}"));
            }
        }
        let raw_names: Vec<String> =
            (0..pairs.len()).map(|i| format!("raw_{i}")).collect();
        let pair_refs: Vec<(&str, &str)> = raw_names
            .iter()
            .zip(pairs.iter())
            .map(|(raw, canonical)| (raw.as_str(), canonical.as_str()))
            .collect();
        let report = ConsistencyReport::from_mapping(&mapping_of(&pair_refs));

        assert_eq!(report.mapped, 18);
        assert_eq!(report.expected(), 18);
        assert!(report.is_complete());
        assert_eq!(report.sides.len(), 2);
        assert_eq!(report.bilateral_segments.len(), 1);
        assert_eq!(report.midline_segments.len(), 1);
    }

    #[test]
    fn incomplete_mapping_reports_diff() {
        let report = ConsistencyReport::from_mapping(&mapping_of(&[
            ("a", "R_FOOT_ACC_X"),
            ("b", "R_FOOT_ACC_Y"),
            ("c", "L_FOOT_ACC_X"),
        ]));
        // 2 sides x 1 segment x 2 axes x 1 sensor = 4 expected, 3 mapped.
        assert_eq!(report.expected(), 4);
        assert!(!report.is_complete());
        assert!(report.formula().contains("[diff -1]"));
    }

    #[test]
    fn empty_mapping_is_trivially_complete() {
        let report = ConsistencyReport::from_mapping(&ColumnMapping::new());
        assert_eq!(report.expected(), 0);
        assert!(report.is_complete());
    }

    #[test]
    fn segment_terms_use_matched_keywords() {
        let mapping = mapping_of(&[
            ("accelerometer_right_shin_x", "R_SHANK_ACC_X"),
            ("gyroscope_left_thigh_z", "L_THIGH_GYR_Z"),
        ]);
        let terms = segment_term_summary(&mapping, &Vocabulary::builtin());
        assert_eq!(terms.get("shin").map(String::as_str), Some("SHANK"));
        assert_eq!(terms.get("thigh").map(String::as_str), Some("THIGH"));
    }
}
