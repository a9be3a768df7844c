use swops_rust::api::{EquipmentId, TimestampMs};
use swops_rust::models::{MissionErrorSample, ThresholdMode};
use swops_rust::services::compute_fleet_analytics;
use swops_rust::store::{default_unit_profile, NewMissionLog, OpsStore, StoreError};

const HOUR_MS: i64 = 3_600_000;

fn new_log(equipment: i64, start: i64, score: u8, errors: &[f64]) -> NewMissionLog {
    NewMissionLog {
        equipment_id: EquipmentId::new(equipment),
        start_time: TimestampMs::new(start),
        end_time: TimestampMs::new(start + HOUR_MS),
        success_score: score,
        error_samples: errors
            .iter()
            .enumerate()
            .map(|(i, &e)| MissionErrorSample {
                time: TimestampMs::new(start + i as i64 * 60_000),
                error_rate: e,
                position: None,
            })
            .collect(),
    }
}

#[test]
fn test_default_profile_has_equipment_roster() {
    let profile = default_unit_profile();

    assert!(!profile.equipment.is_empty());
    assert_eq!(profile.threshold_mode, ThresholdMode::Manual);
    assert_eq!(profile.active_threshold().value(), 10.0);
}

#[test]
fn test_feedback_round_trip() {
    let store = OpsStore::new(default_unit_profile());

    let recorded = store
        .add_mission_log(new_log(1, 0, 7, &[3.0, 5.0]))
        .unwrap();

    let logs = store.mission_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, recorded.id);
    assert_eq!(logs[0].peak_error(), Some(5.0));

    store.delete_mission_log(recorded.id).unwrap();
    assert!(store.mission_logs().is_empty());
}

#[test]
fn test_delete_unknown_log_is_typed_error() {
    let store = OpsStore::new(default_unit_profile());
    let result = store.delete_mission_log(swops_rust::api::MissionLogId::new(42));
    assert!(matches!(result, Err(StoreError::MissionLogNotFound(_))));
}

#[test]
fn test_auto_tune_then_analytics() {
    let store = OpsStore::new(default_unit_profile());

    // Three degraded missions on equipment 1 pooling readings [5,7,9,20]
    // plus one clean mission that must not affect the threshold.
    store.add_mission_log(new_log(1, 0, 3, &[5.0, 7.0])).unwrap();
    store
        .add_mission_log(new_log(1, HOUR_MS, 5, &[9.0]))
        .unwrap();
    store
        .add_mission_log(new_log(1, 2 * HOUR_MS, 2, &[20.0]))
        .unwrap();
    store
        .add_mission_log(new_log(1, 3 * HOUR_MS, 10, &[1.0]))
        .unwrap();

    let profile = store.auto_tune();
    let strike = profile.equipment_by_id(EquipmentId::new(1)).unwrap();
    assert_eq!(strike.auto_threshold.unwrap().value(), 20.0);

    let analytics = compute_fleet_analytics(&profile, &store.mission_logs());
    assert_eq!(analytics.total_missions, 4);
    assert_eq!(analytics.mean_score, 5.0);
    // Only the 20.0-peak mission exceeds the unit threshold of 10.0.
    assert_eq!(analytics.high_error_count, 1);

    let strike_stats = analytics
        .equipment
        .iter()
        .find(|eq| eq.equipment_id == EquipmentId::new(1))
        .unwrap();
    assert_eq!(strike_stats.mission_count, 4);
    assert_eq!(strike_stats.success, 1);
    assert_eq!(strike_stats.normal, 1);
    assert_eq!(strike_stats.failure, 2);
}

#[test]
fn test_auto_tune_with_sparse_data_clears_threshold() {
    let store = OpsStore::new(default_unit_profile());

    // Two pooled readings is below the sufficiency floor.
    store.add_mission_log(new_log(2, 0, 3, &[5.0, 7.0])).unwrap();

    let profile = store.auto_tune();
    let drone = profile.equipment_by_id(EquipmentId::new(2)).unwrap();
    assert!(drone.auto_threshold.is_none());
    // Resolution keeps working through the manual value.
    assert_eq!(drone.active_threshold().value(), drone.manual_threshold.value());
}

#[test]
fn test_concurrent_feedback_submissions() {
    let store = OpsStore::new(default_unit_profile());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                store
                    .add_mission_log(new_log(1, i * HOUR_MS, 8, &[]))
                    .unwrap()
            })
        })
        .collect();

    let mut ids: Vec<i64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().id.value())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 8, "ids must be unique across threads");
    assert_eq!(store.mission_logs().len(), 8);
}
