//! Mapping construction over an entire column set.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use imu_model::{CanonicalColumnId, ColumnMapping, Vocabulary};

use crate::canonicalize::{Outcome, RejectReason, canonicalize};
use crate::detect::{Convention, ConventionDetector};
use crate::inference::{ColumnInference, InferredColumn, Proposal};
use crate::patterns::PatternSet;

/// Marker-trajectory column shape (`LFHD_x`, `LTHI_y`): a short uppercase
/// code plus a bare axis. Skipped unless a sensor keyword is also present.
static MARKER_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}_[xyz]$").expect("marker pattern compiles"));

/// Substrings that mark a column as non-sensor regardless of shape.
const NON_SENSOR_TOKENS: [&str; 5] = ["emg", "activity", "label", "timestamp", "time"];

/// A column excluded from the mapping, with the classification outcome that
/// excluded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedColumn {
    pub raw: String,
    pub reason: RejectReason,
}

/// A proposed mapping for one dataset: what maps, what does not, and which
/// convention the column set follows.
#[derive(Debug, Clone)]
pub struct MappingDraft {
    pub mapping: ColumnMapping,
    pub rejected: Vec<RejectedColumn>,
    pub convention: Convention,
}

/// Builds a raw→canonical mapping for a dataset's column set.
///
/// Runs convention detection once, then canonicalizes every column in input
/// order. Input order is the tie-break everywhere: when two distinct raw
/// names produce the same canonical identifier, the first keeps it and
/// later ones are rejected, never overwritten.
///
/// An optional [`ColumnInference`] collaborator can be injected for the
/// columns the deterministic path rejects; without one the builder is fully
/// deterministic and self-contained.
pub struct MappingBuilder<'a> {
    vocab: &'a Vocabulary,
    patterns: PatternSet,
    detector: ConventionDetector,
    inference: Option<&'a dyn ColumnInference>,
}

impl<'a> MappingBuilder<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self {
            vocab,
            patterns: PatternSet::builtin(),
            detector: ConventionDetector::default(),
            inference: None,
        }
    }

    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_detector(mut self, detector: ConventionDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_inference(mut self, inference: &'a dyn ColumnInference) -> Self {
        self.inference = Some(inference);
        self
    }

    pub fn build(&self, columns: &[String]) -> MappingDraft {
        let convention = self.detector.detect(columns, &self.patterns);
        let attempt_order = match convention {
            Convention::Dominant(id) => self.patterns.with_preferred(id),
            Convention::Mixed => self.patterns.clone(),
        };

        let mut mapping = ColumnMapping::new();
        let mut rejected = Vec::new();
        let mut unresolved: Vec<(String, RejectReason)> = Vec::new();

        for raw in columns {
            if let Some(reason) = non_sensor_reason(raw, self.vocab) {
                debug!(column = %raw, %reason, "prefilter excluded column");
                rejected.push(RejectedColumn {
                    raw: raw.clone(),
                    reason,
                });
                continue;
            }
            match canonicalize(raw, &attempt_order, self.vocab) {
                Outcome::Canonical(id) => {
                    insert_first_wins(&mut mapping, &mut rejected, raw, id);
                }
                Outcome::Rejected(reason) => unresolved.push((raw.clone(), reason)),
            }
        }

        match self.inference {
            Some(inference) if !unresolved.is_empty() => {
                self.consult_inference(inference, &mut mapping, &mut rejected, unresolved);
            }
            _ => {
                rejected.extend(
                    unresolved
                        .into_iter()
                        .map(|(raw, reason)| RejectedColumn { raw, reason }),
                );
            }
        }

        MappingDraft {
            mapping,
            rejected,
            convention,
        }
    }

    fn consult_inference(
        &self,
        inference: &dyn ColumnInference,
        mapping: &mut ColumnMapping,
        rejected: &mut Vec<RejectedColumn>,
        unresolved: Vec<(String, RejectReason)>,
    ) {
        let names: Vec<String> = unresolved.iter().map(|(raw, _)| raw.clone()).collect();
        let results = match inference.classify(&names) {
            Ok(results) => results,
            Err(error) => {
                // Best effort, never retried: the batch continues with the
                // deterministic outcomes.
                warn!(%error, columns = names.len(), "inference collaborator failed");
                rejected.extend(
                    unresolved
                        .into_iter()
                        .map(|(raw, reason)| RejectedColumn { raw, reason }),
                );
                return;
            }
        };

        let by_raw: BTreeMap<&str, &InferredColumn> =
            results.iter().map(|r| (r.raw.as_str(), r)).collect();

        for (raw, deterministic_reason) in unresolved {
            let Some(inferred) = by_raw.get(raw.as_str()) else {
                rejected.push(RejectedColumn {
                    raw,
                    reason: deterministic_reason,
                });
                continue;
            };
            match &inferred.proposal {
                Proposal::Unclassifiable(marker) => {
                    rejected.push(RejectedColumn {
                        reason: RejectReason::Collaborator(marker.clone()),
                        raw,
                    });
                }
                Proposal::Canonical(text) => match self.validate_proposal(text) {
                    Some(id) => insert_first_wins(mapping, rejected, &raw, id),
                    None => {
                        rejected.push(RejectedColumn {
                            reason: RejectReason::Collaborator(format!(
                                "proposed identifier {text:?} is outside the vocabulary"
                            )),
                            raw,
                        });
                    }
                },
            }
        }
    }

    /// The vocabulary is the source of truth for collaborator output too: a
    /// proposal must parse as a canonical identifier *and* name a segment,
    /// sensor and axis the vocabulary carries.
    fn validate_proposal(&self, text: &str) -> Option<CanonicalColumnId> {
        let id: CanonicalColumnId = text.parse().ok()?;
        let segment_known = self
            .vocab
            .segments
            .iter()
            .any(|entry| entry.segment == id.segment());
        let sensor_known = self
            .vocab
            .sensors
            .iter()
            .any(|entry| entry.sensor == id.sensor());
        let axis_known = self.vocab.axes.contains(&id.axis());
        (segment_known && sensor_known && axis_known).then_some(id)
    }
}

fn insert_first_wins(
    mapping: &mut ColumnMapping,
    rejected: &mut Vec<RejectedColumn>,
    raw: &str,
    id: CanonicalColumnId,
) {
    if mapping.contains_target(&id) || mapping.insert(raw.to_string(), id).is_err() {
        debug!(column = %raw, target = %id, "duplicate canonical target, keeping first");
        rejected.push(RejectedColumn {
            raw: raw.to_string(),
            reason: RejectReason::DuplicateTarget(id.to_string()),
        });
    }
}

/// Prefilter from the batch tooling: marker trajectories and columns naming
/// known non-sensor channels are excluded before any pattern is attempted.
fn non_sensor_reason(raw: &str, vocab: &Vocabulary) -> Option<RejectReason> {
    let lower = raw.to_lowercase();
    let has_sensor_keyword = vocab.sensor_keywords().any(|kw| lower.contains(kw));
    if MARKER_STYLE.is_match(raw) && !has_sensor_keyword {
        return Some(RejectReason::NonSensor("marker-style column".to_string()));
    }
    if let Some(token) = NON_SENSOR_TOKENS.iter().find(|t| lower.contains(*t)) {
        return Some(RejectReason::NonSensor(format!("{token} column")));
    }
    if !has_sensor_keyword {
        return Some(RejectReason::NonSensor(
            "no inertial sensor keyword".to_string(),
        ));
    }
    None
}
