//! In-memory operations store.
//!
//! Holds the unit profile, the mission feedback log, and the current forecast
//! snapshot behind one lock. Readers get cloned snapshots (the forecast as a
//! shared `Arc`), so the analytics in [`crate::services`] always operate on
//! immutable data; the forecast is only ever replaced wholesale.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::api::{EquipmentId, MissionLogId};
use crate::models::{
    EquipmentProfile, ForecastSeries, GeoPoint, MissionErrorSample, MissionOutcome, Threshold,
    ThresholdMode, TimestampMs, UnitProfile,
};
use crate::services::threshold::auto_tune_profile;

/// Store operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("mission log {0} not found")]
    MissionLogNotFound(MissionLogId),
    #[error("equipment {0} not found in the unit profile")]
    EquipmentNotFound(EquipmentId),
    #[error("invalid mission log: {0}")]
    InvalidMissionLog(String),
}

/// Fields of a feedback submission; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewMissionLog {
    pub equipment_id: EquipmentId,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    pub success_score: u8,
    pub error_samples: Vec<MissionErrorSample>,
}

struct StoreInner {
    unit_profile: UnitProfile,
    /// Sorted by start time descending, newest first.
    mission_logs: Vec<MissionOutcome>,
    forecast: Option<Arc<ForecastSeries>>,
    next_log_id: i64,
}

/// Shared handle to the operations state.
#[derive(Clone)]
pub struct OpsStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl OpsStore {
    pub fn new(unit_profile: UnitProfile) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                unit_profile,
                mission_logs: Vec::new(),
                forecast: None,
                next_log_id: 1,
            })),
        }
    }

    /// Snapshot of the unit profile.
    pub fn unit_profile(&self) -> UnitProfile {
        self.inner.read().unit_profile.clone()
    }

    pub fn update_profile(&self, profile: UnitProfile) {
        self.inner.write().unit_profile = profile;
    }

    /// Current forecast snapshot, if one has been loaded.
    pub fn forecast(&self) -> Option<Arc<ForecastSeries>> {
        self.inner.read().forecast.clone()
    }

    /// Replace the forecast wholesale.
    ///
    /// Returns false without replacing when the incoming feed's checksum
    /// matches the current one, so a refresh that fetched identical content
    /// is a no-op.
    pub fn replace_forecast(&self, series: ForecastSeries) -> bool {
        let mut inner = self.inner.write();

        if let Some(current) = &inner.forecast {
            if !series.checksum().is_empty() && current.checksum() == series.checksum() {
                log::debug!("Forecast refresh matched current checksum, keeping snapshot");
                return false;
            }
        }

        log::info!("Loaded forecast snapshot with {} samples", series.len());
        inner.forecast = Some(Arc::new(series));
        true
    }

    /// All mission logs, newest first.
    pub fn mission_logs(&self) -> Vec<MissionOutcome> {
        self.inner.read().mission_logs.clone()
    }

    /// One mission log by id.
    pub fn mission_log(&self, id: MissionLogId) -> Option<MissionOutcome> {
        self.inner
            .read()
            .mission_logs
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }

    /// Mission logs for one equipment type, newest first.
    pub fn logs_for_equipment(&self, equipment_id: EquipmentId) -> Vec<MissionOutcome> {
        self.inner
            .read()
            .mission_logs
            .iter()
            .filter(|l| l.equipment_id == equipment_id)
            .cloned()
            .collect()
    }

    /// Validate and record a feedback submission.
    pub fn add_mission_log(&self, new: NewMissionLog) -> Result<MissionOutcome, StoreError> {
        if new.start_time >= new.end_time {
            return Err(StoreError::InvalidMissionLog(
                "start time must precede end time".to_string(),
            ));
        }
        if !(1..=10).contains(&new.success_score) {
            return Err(StoreError::InvalidMissionLog(
                "success score must be between 1 and 10".to_string(),
            ));
        }

        let mut inner = self.inner.write();

        if inner.unit_profile.equipment_by_id(new.equipment_id).is_none() {
            return Err(StoreError::EquipmentNotFound(new.equipment_id));
        }

        let id = MissionLogId::new(inner.next_log_id);
        inner.next_log_id += 1;

        let outcome = MissionOutcome {
            id,
            equipment_id: new.equipment_id,
            start_time: new.start_time,
            end_time: new.end_time,
            success_score: new.success_score,
            error_samples: new.error_samples,
        };

        let insert_at = inner
            .mission_logs
            .partition_point(|l| l.start_time > outcome.start_time);
        inner.mission_logs.insert(insert_at, outcome.clone());

        Ok(outcome)
    }

    pub fn delete_mission_log(&self, id: MissionLogId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let before = inner.mission_logs.len();
        inner.mission_logs.retain(|l| l.id != id);
        if inner.mission_logs.len() == before {
            return Err(StoreError::MissionLogNotFound(id));
        }
        Ok(())
    }

    /// Recompute every equipment's auto threshold from the mission log and
    /// return the updated profile snapshot.
    pub fn auto_tune(&self) -> UnitProfile {
        let mut inner = self.inner.write();
        let logs = inner.mission_logs.clone();
        auto_tune_profile(&mut inner.unit_profile, &logs);
        inner.unit_profile.clone()
    }
}

/// Initial profile used until the operator saves their own.
pub fn default_unit_profile() -> UnitProfile {
    let equipment = [
        (1, "JDAM", 10.0, true),
        (2, "Recon Drone A", 15.0, true),
        (3, "Tactical Datalink", 8.0, false),
        (4, "KF-21 Flight", 9.0, true),
    ];

    UnitProfile {
        unit_name: "17th Fighter Wing".to_string(),
        threshold_mode: ThresholdMode::Manual,
        manual_threshold: Threshold::new(10.0),
        location: GeoPoint {
            latitude: 36.722701,
            longitude: 127.499102,
        },
        equipment: equipment
            .into_iter()
            .map(|(id, name, manual, geo)| EquipmentProfile {
                id: EquipmentId::new(id),
                name: name.to_string(),
                threshold_mode: ThresholdMode::Manual,
                manual_threshold: Threshold::new(manual),
                auto_threshold: None,
                uses_geo_data: geo,
            })
            .collect(),
    }
}
