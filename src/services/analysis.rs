//! Fleet-wide mission feedback analytics.

use serde::{Deserialize, Serialize};

use crate::api::EquipmentId;
use crate::models::{ForecastSeries, MissionOutcome, SuccessBand, UnitProfile};

/// Aggregated feedback for one equipment type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentStats {
    pub equipment_id: EquipmentId,
    pub name: String,
    pub mission_count: usize,
    pub success: usize,
    pub normal: usize,
    pub failure: usize,
    /// Mean operator score, 0.0 with no missions.
    pub mean_score: f64,
}

/// Fleet-level feedback summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetAnalytics {
    pub total_missions: usize,
    /// Mean operator score across all missions, 0.0 with no missions.
    pub mean_score: f64,
    /// Missions whose peak recorded error exceeded the unit threshold.
    pub high_error_count: usize,
    /// Per-equipment stats, best mean score first.
    pub equipment: Vec<EquipmentStats>,
}

/// Compute the per-equipment and fleet-wide feedback summary.
pub fn compute_fleet_analytics(profile: &UnitProfile, logs: &[MissionOutcome]) -> FleetAnalytics {
    let total_missions = logs.len();
    let mean_score = if total_missions > 0 {
        logs.iter().map(|l| f64::from(l.success_score)).sum::<f64>() / total_missions as f64
    } else {
        0.0
    };

    let unit_threshold = profile.active_threshold();
    let high_error_count = logs
        .iter()
        .filter(|l| l.peak_error().is_some_and(|peak| peak > unit_threshold.value()))
        .count();

    let mut equipment: Vec<EquipmentStats> = profile
        .equipment
        .iter()
        .map(|eq| {
            let eq_logs: Vec<&MissionOutcome> =
                logs.iter().filter(|l| l.equipment_id == eq.id).collect();

            let count = eq_logs.len();
            let success = eq_logs.iter().filter(|l| l.band() == SuccessBand::Success).count();
            let normal = eq_logs.iter().filter(|l| l.band() == SuccessBand::Normal).count();
            let failure = eq_logs.iter().filter(|l| l.band() == SuccessBand::Failure).count();
            let mean = if count > 0 {
                eq_logs.iter().map(|l| f64::from(l.success_score)).sum::<f64>() / count as f64
            } else {
                0.0
            };

            EquipmentStats {
                equipment_id: eq.id,
                name: eq.name.clone(),
                mission_count: count,
                success,
                normal,
                failure,
                mean_score: mean,
            }
        })
        .collect();

    equipment.sort_by(|a, b| {
        b.mean_score
            .partial_cmp(&a.mean_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    FleetAnalytics {
        total_missions,
        mean_score,
        high_error_count,
        equipment,
    }
}

/// Forecast accuracy over one mission: recorded error readings aligned
/// against the forecast grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Readings that found a forecast sample to compare against.
    pub matched_samples: usize,
    /// Mean predicted error at the matched grid instants.
    pub mean_predicted_error: f64,
    /// Mean error actually recorded during the mission.
    pub mean_recorded_error: f64,
    /// Mean of recorded minus predicted; positive means the forecast was
    /// optimistic.
    pub mean_bias: f64,
}

/// Compare a mission's recorded error readings with the forecast.
///
/// Each reading, typically on an irregular per-minute cadence, is aligned to
/// the closest sample of the regular forecast grid. `None` when the mission
/// carries no readings or no forecast is loaded.
pub fn mission_forecast_accuracy(
    series: &ForecastSeries,
    outcome: &MissionOutcome,
) -> Option<AccuracyReport> {
    let pairs: Vec<(f64, f64)> = outcome
        .error_samples
        .iter()
        .filter_map(|reading| {
            series
                .closest_sample(reading.time)
                .map(|sample| (sample.predicted_error, reading.error_rate))
        })
        .collect();

    if pairs.is_empty() {
        return None;
    }

    let count = pairs.len() as f64;
    let mean_predicted_error = pairs.iter().map(|(p, _)| p).sum::<f64>() / count;
    let mean_recorded_error = pairs.iter().map(|(_, r)| r).sum::<f64>() / count;

    Some(AccuracyReport {
        matched_samples: pairs.len(),
        mean_predicted_error,
        mean_recorded_error,
        mean_bias: mean_recorded_error - mean_predicted_error,
    })
}
