//! Dataset convention detection.
//!
//! Before building a mapping, the column set is sampled to find out whether
//! one structural pattern dominates. If it does, that pattern is attempted
//! first for every column (with the rest of the registry as fallback); if
//! not, all patterns are attempted in priority order. Detection is purely a
//! cost/robustness optimization — it never changes which columns *can* be
//! canonicalized.

use std::collections::BTreeMap;

use tracing::debug;

use crate::patterns::{PatternId, PatternSet};

/// Default number of leading columns sampled.
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;

/// Default minimum match count a pattern must strictly exceed to dominate.
pub const DEFAULT_DOMINANCE_THRESHOLD: usize = 5;

/// Outcome of sampling a column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// One pattern's structural match count strictly exceeds the threshold
    /// and every other pattern's count.
    Dominant(PatternId),
    /// No clear winner; attempt all patterns per column.
    Mixed,
}

/// Samples a column set and picks the dominant structural pattern, if any.
#[derive(Debug, Clone, Copy)]
pub struct ConventionDetector {
    sample_limit: usize,
    threshold: usize,
}

impl ConventionDetector {
    pub fn new(sample_limit: usize, threshold: usize) -> Self {
        Self {
            sample_limit,
            threshold,
        }
    }

    /// Counts raw structural matches per pattern over the leading sample.
    ///
    /// Only the shape is tested; a column that matches structurally but
    /// would fail classification still counts. Dominance requires a count
    /// strictly above the threshold *and* strictly above every other
    /// pattern's count — ties mean `Mixed`.
    pub fn detect(&self, columns: &[String], patterns: &PatternSet) -> Convention {
        let sample = &columns[..columns.len().min(self.sample_limit)];
        let mut counts: BTreeMap<PatternId, usize> = BTreeMap::new();
        for pattern in patterns.patterns() {
            let count = sample.iter().filter(|col| pattern.matches(col)).count();
            counts.insert(pattern.id(), count);
        }
        debug!(?counts, sampled = sample.len(), "convention detection counts");

        let Some((&best_id, &best_count)) = counts.iter().max_by_key(|(_, count)| **count)
        else {
            return Convention::Mixed;
        };
        if best_count <= self.threshold {
            return Convention::Mixed;
        }
        let contested = counts
            .iter()
            .any(|(id, count)| *id != best_id && *count >= best_count);
        if contested {
            Convention::Mixed
        } else {
            Convention::Dominant(best_id)
        }
    }
}

impl Default for ConventionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_LIMIT, DEFAULT_DOMINANCE_THRESHOLD)
    }
}
