//! Applying an approved mapping to a file's column set.

use imu_model::ColumnMapping;

/// What happens to one input column under a rename plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Renamed to its canonical identifier.
    Renamed { to: String },
    /// Not in the mapping; kept unchanged.
    Passthrough,
    /// A later duplicate of a canonical target already produced by an
    /// earlier column; removed from the output.
    DroppedDuplicate { of: String },
}

/// One input column's position, name and fate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedColumn {
    pub index: usize,
    pub name: String,
    pub disposition: Disposition,
}

/// The full, ordered rename decision for one file.
///
/// Computed before anything is written: the file boundary consumes a
/// finished plan, so output files are never half-renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    columns: Vec<PlannedColumn>,
}

impl RenamePlan {
    /// Intersects a file's columns with the mapping, in file column order.
    ///
    /// Columns absent from the mapping pass through unchanged — rejection
    /// is a classification-time concept, not a file-rewrite concept. When
    /// two input columns rename to the same target, the first occurrence
    /// wins and later ones are dropped from the output, the same tie-break
    /// the mapping builder uses.
    pub fn build(file_columns: &[String], mapping: &ColumnMapping) -> Self {
        let mut produced_targets: Vec<String> = Vec::new();
        let columns = file_columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let disposition = match mapping.get(name) {
                    Some(canonical) => {
                        let target = canonical.to_string();
                        if produced_targets.contains(&target) {
                            Disposition::DroppedDuplicate { of: target }
                        } else {
                            produced_targets.push(target.clone());
                            Disposition::Renamed { to: target }
                        }
                    }
                    None => Disposition::Passthrough,
                };
                PlannedColumn {
                    index,
                    name: name.clone(),
                    disposition,
                }
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[PlannedColumn] {
        &self.columns
    }

    /// Output header names, in order, dropped columns omitted.
    pub fn output_headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|col| match &col.disposition {
                Disposition::Renamed { to } => Some(to.clone()),
                Disposition::Passthrough => Some(col.name.clone()),
                Disposition::DroppedDuplicate { .. } => None,
            })
            .collect()
    }

    /// Input indices of the columns that survive into the output.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .filter(|col| !matches!(col.disposition, Disposition::DroppedDuplicate { .. }))
            .map(|col| col.index)
            .collect()
    }

    pub fn renamed_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|col| matches!(col.disposition, Disposition::Renamed { .. }))
            .count()
    }

    pub fn dropped_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|col| matches!(col.disposition, Disposition::DroppedDuplicate { .. }))
            .count()
    }

    /// True when the plan changes nothing: every column passes through.
    pub fn is_noop(&self) -> bool {
        self.renamed_count() == 0 && self.dropped_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu_model::CanonicalColumnId;

    fn mapping() -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        for (raw, canonical) in [
            ("accelerometer_right_foot_x", "R_FOOT_ACC_X"),
            ("gyroscope_left_thigh_z", "L_THIGH_GYR_Z"),
            ("Acc_X_LThigh", "L_THIGH_ACC_X"),
            ("acc_x_lthigh", "L_THIGH_ACC_X"),
        ] {
            // The duplicate-target pair mirrors a mapping approved before
            // the collision policy existed; the applier must still cope.
            let id: CanonicalColumnId = canonical.parse().unwrap();
            if !mapping.contains_raw(raw) {
                mapping.insert(raw, id).unwrap();
            }
        }
        mapping
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn renames_only_mapped_columns() {
        let plan = RenamePlan::build(
            &cols(&[
                "timestamp",
                "accelerometer_right_foot_x",
                "activity_label",
            ]),
            &mapping(),
        );
        assert_eq!(
            plan.output_headers(),
            vec!["timestamp", "R_FOOT_ACC_X", "activity_label"]
        );
        assert_eq!(plan.renamed_count(), 1);
        assert_eq!(plan.kept_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn duplicate_target_keeps_first_occurrence() {
        let plan = RenamePlan::build(&cols(&["Acc_X_LThigh", "acc_x_lthigh"]), &mapping());
        assert_eq!(plan.output_headers(), vec!["L_THIGH_ACC_X"]);
        assert_eq!(plan.kept_indices(), vec![0]);
        assert_eq!(plan.dropped_count(), 1);
        assert_eq!(
            plan.columns()[1].disposition,
            Disposition::DroppedDuplicate {
                of: "L_THIGH_ACC_X".to_string()
            }
        );
    }

    #[test]
    fn applying_twice_is_a_noop() {
        let first = RenamePlan::build(
            &cols(&["accelerometer_right_foot_x", "gyroscope_left_thigh_z", "timestamp"]),
            &mapping(),
        );
        let second = RenamePlan::build(&first.output_headers(), &mapping());
        assert!(second.is_noop());
        assert_eq!(second.output_headers(), first.output_headers());
    }

    #[test]
    fn file_without_mapped_columns_passes_through() {
        let plan = RenamePlan::build(&cols(&["timestamp", "activity_label"]), &mapping());
        assert!(plan.is_noop());
        assert_eq!(plan.output_headers(), vec!["timestamp", "activity_label"]);
    }
}
