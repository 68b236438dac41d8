use anyhow::anyhow;

use imu_map::{
    ColumnInference, Convention, InferredColumn, MappingBuilder, PatternId, Proposal,
    RejectReason,
};
use imu_model::Vocabulary;

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

fn target_of(draft: &imu_map::MappingDraft, raw: &str) -> Option<String> {
    draft.mapping.get(raw).map(|id| id.to_string())
}

#[test]
fn hugadb_file_builds_complete_mapping() {
    let vocab = Vocabulary::builtin();
    let builder = MappingBuilder::new(&vocab);
    let mut cols = Vec::new();
    for sensor in ["accelerometer", "gyroscope"] {
        for segment in ["right_foot", "left_foot", "right_thigh", "left_thigh"] {
            for axis in ["x", "y", "z"] {
                cols.push(format!("{sensor}_{segment}_{axis}"));
            }
        }
    }
    cols.push("activity".to_string());

    let draft = builder.build(&cols);

    assert_eq!(draft.convention, Convention::Dominant(PatternId::HugadbWords));
    assert_eq!(draft.mapping.len(), 24);
    assert_eq!(
        target_of(&draft, "accelerometer_right_foot_x").as_deref(),
        Some("R_FOOT_ACC_X")
    );
    assert_eq!(
        target_of(&draft, "gyroscope_left_thigh_z").as_deref(),
        Some("L_THIGH_GYR_Z")
    );
    assert_eq!(draft.rejected.len(), 1);
    assert_eq!(draft.rejected[0].raw, "activity");
}

#[test]
fn non_sensor_column_is_rejected() {
    let vocab = Vocabulary::builtin();
    let draft = MappingBuilder::new(&vocab).build(&columns(&["EMG_right"]));
    assert!(draft.mapping.is_empty());
    assert_eq!(draft.rejected.len(), 1);
    assert!(matches!(
        draft.rejected[0].reason,
        RejectReason::NonSensor(_)
    ));
}

#[test]
fn case_variant_duplicates_keep_first_by_input_order() {
    let vocab = Vocabulary::builtin();
    let draft =
        MappingBuilder::new(&vocab).build(&columns(&["Acc_X_LThigh", "acc_x_lthigh"]));

    assert_eq!(draft.mapping.len(), 1);
    assert_eq!(
        target_of(&draft, "Acc_X_LThigh").as_deref(),
        Some("L_THIGH_ACC_X")
    );
    assert!(draft.mapping.get("acc_x_lthigh").is_none());
    assert_eq!(draft.rejected.len(), 1);
    assert_eq!(draft.rejected[0].raw, "acc_x_lthigh");
    assert!(matches!(
        draft.rejected[0].reason,
        RejectReason::DuplicateTarget(_)
    ));
}

#[test]
fn fully_non_sensor_file_maps_nothing() {
    let vocab = Vocabulary::builtin();
    let draft = MappingBuilder::new(&vocab).build(&columns(&["timestamp", "activity_label"]));
    assert!(draft.mapping.is_empty());
    assert_eq!(draft.rejected.len(), 2);
}

#[test]
fn build_is_deterministic() {
    let vocab = Vocabulary::builtin();
    let builder = MappingBuilder::new(&vocab);
    let cols = columns(&[
        "accelerometer_right_foot_x",
        "Acc_X_LThigh",
        "angularVelocity_Pelvis_z",
        "garbage",
    ]);
    let first = builder.build(&cols);
    let second = builder.build(&cols);
    assert_eq!(first.mapping, second.mapping);
    assert_eq!(first.rejected, second.rejected);
}

#[test]
fn mixed_conventions_resolve_in_priority_order() {
    let vocab = Vocabulary::builtin();
    let draft = MappingBuilder::new(&vocab).build(&columns(&[
        "accelerometer_right_foot_x",
        "sensorFreeAcceleration_LeftLowerLeg_z",
        "angularVelocity_RightFoot_x",
        "Gyr_Y_RShank",
    ]));
    assert_eq!(draft.convention, Convention::Mixed);
    assert_eq!(draft.mapping.len(), 4);
    assert_eq!(
        target_of(&draft, "angularVelocity_RightFoot_x").as_deref(),
        Some("R_FOOT_GYR_X")
    );
    assert_eq!(
        target_of(&draft, "Gyr_Y_RShank").as_deref(),
        Some("R_SHANK_GYR_Y")
    );
}

struct ScriptedInference {
    results: Vec<InferredColumn>,
}

impl ColumnInference for ScriptedInference {
    fn classify(&self, _columns: &[String]) -> anyhow::Result<Vec<InferredColumn>> {
        Ok(self.results.clone())
    }
}

struct FailingInference;

impl ColumnInference for FailingInference {
    fn classify(&self, _columns: &[String]) -> anyhow::Result<Vec<InferredColumn>> {
        Err(anyhow!("service unavailable"))
    }
}

#[test]
fn collaborator_resolves_deterministic_misses() {
    let vocab = Vocabulary::builtin();
    let inference = ScriptedInference {
        results: vec![
            InferredColumn {
                raw: "P6_acc_LF_x".to_string(),
                proposal: Proposal::Canonical("L_FOOT_ACC_X".to_string()),
                reasoning: Some("LF is the left foot sensor".to_string()),
            },
            InferredColumn {
                raw: "acc_misc".to_string(),
                proposal: Proposal::Unclassifiable("UNKNOWN:acc_misc".to_string()),
                reasoning: None,
            },
        ],
    };
    let builder = MappingBuilder::new(&vocab).with_inference(&inference);
    let draft = builder.build(&columns(&[
        "accelerometer_right_foot_x",
        "P6_acc_LF_x",
        "acc_misc",
    ]));

    assert_eq!(draft.mapping.len(), 2);
    assert_eq!(
        target_of(&draft, "P6_acc_LF_x").as_deref(),
        Some("L_FOOT_ACC_X")
    );
    assert_eq!(draft.rejected.len(), 1);
    assert!(matches!(
        draft.rejected[0].reason,
        RejectReason::Collaborator(_)
    ));
}

#[test]
fn collaborator_proposal_outside_vocabulary_is_rejected() {
    let vocab = Vocabulary::builtin();
    let inference = ScriptedInference {
        results: vec![InferredColumn {
            raw: "acc_q0_something".to_string(),
            proposal: Proposal::Canonical("R_FOOT_EMG_X".to_string()),
            reasoning: None,
        }],
    };
    let builder = MappingBuilder::new(&vocab).with_inference(&inference);
    let draft = builder.build(&columns(&["acc_q0_something"]));

    assert!(draft.mapping.is_empty());
    assert!(matches!(
        draft.rejected[0].reason,
        RejectReason::Collaborator(_)
    ));
}

#[test]
fn collaborator_failure_degrades_to_deterministic_outcomes() {
    let vocab = Vocabulary::builtin();
    let builder = MappingBuilder::new(&vocab).with_inference(&FailingInference);
    let draft = builder.build(&columns(&[
        "accelerometer_right_foot_x",
        "acc_unresolvable_name_q",
    ]));

    // The batch is not aborted: the deterministic column still maps.
    assert_eq!(draft.mapping.len(), 1);
    assert_eq!(draft.rejected.len(), 1);
    assert_eq!(draft.rejected[0].raw, "acc_unresolvable_name_q");
}

#[test]
fn collaborator_cannot_steal_a_deterministic_target() {
    let vocab = Vocabulary::builtin();
    let inference = ScriptedInference {
        results: vec![InferredColumn {
            raw: "acc_rf_duplicate".to_string(),
            proposal: Proposal::Canonical("R_FOOT_ACC_X".to_string()),
            reasoning: None,
        }],
    };
    let builder = MappingBuilder::new(&vocab).with_inference(&inference);
    let draft = builder.build(&columns(&[
        "accelerometer_right_foot_x",
        "acc_rf_duplicate",
    ]));

    assert_eq!(
        target_of(&draft, "accelerometer_right_foot_x").as_deref(),
        Some("R_FOOT_ACC_X")
    );
    assert!(matches!(
        draft.rejected[0].reason,
        RejectReason::DuplicateTarget(_)
    ));
}
