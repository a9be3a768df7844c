//! Auto-threshold estimation from mission feedback.
//!
//! The estimator looks only at degraded missions (operator score below the
//! success band), pools every error reading they recorded, and takes a
//! nearest-rank percentile of the pooled values. The resulting threshold is
//! the error level at which equipment has historically started to
//! underperform.

use serde::{Deserialize, Serialize};

use crate::models::{MissionOutcome, Threshold, UnitProfile};

/// Percentile of pooled degraded-mission error readings used for the auto
/// threshold.
pub const AUTO_THRESHOLD_PERCENTILE: f64 = 0.75;

/// Minimum number of pooled error readings before an auto threshold is
/// considered statistically usable.
pub const MIN_DEGRADED_SAMPLES: usize = 3;

/// Derive an auto threshold from the outcomes of a single equipment type.
///
/// Returns `None` when fewer than [`MIN_DEGRADED_SAMPLES`] error readings
/// exist across all degraded missions. That is a valid terminal state, not an
/// error: the caller keeps using the manual threshold.
pub fn estimate_auto_threshold(outcomes: &[MissionOutcome]) -> Option<Threshold> {
    estimate_with(outcomes, AUTO_THRESHOLD_PERCENTILE, MIN_DEGRADED_SAMPLES)
}

/// Parameterized variant of [`estimate_auto_threshold`].
///
/// The rank is `floor(percentile * count)`, 0-indexed and clamped to the last
/// element, so `percentile = 1.0` yields the maximum rather than reading past
/// the end. Nearest-rank, no interpolation.
pub fn estimate_with(
    outcomes: &[MissionOutcome],
    percentile: f64,
    minimum_sample_count: usize,
) -> Option<Threshold> {
    let mut pooled: Vec<f64> = outcomes
        .iter()
        .filter(|o| o.band().is_degraded())
        .flat_map(|o| o.error_samples.iter().map(|s| s.error_rate))
        .collect();

    if pooled.len() < minimum_sample_count.max(1) {
        return None;
    }

    pooled.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = ((percentile * pooled.len() as f64).floor() as usize).min(pooled.len() - 1);
    Some(Threshold::new(pooled[rank]))
}

/// Summary of the evidence behind an equipment's auto threshold, shown next
/// to the computed value so the operator can judge it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdExplanation {
    /// Total feedback records for this equipment.
    pub total_missions: usize,
    /// Missions scored in the failure band (< 4).
    pub failed: usize,
    /// Missions scored in the normal band (4-7).
    pub mediocre: usize,
    /// Pooled error readings across all degraded missions.
    pub degraded_sample_count: usize,
    /// Mean of the pooled degraded readings, `None` when no degraded mission
    /// carried error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_degraded_error: Option<f64>,
}

/// Compute the explanation summary for one equipment's outcomes.
pub fn explain_threshold(outcomes: &[MissionOutcome]) -> ThresholdExplanation {
    let total_missions = outcomes.len();
    let failed = outcomes
        .iter()
        .filter(|o| o.band() == crate::models::SuccessBand::Failure)
        .count();
    let mediocre = outcomes
        .iter()
        .filter(|o| o.band() == crate::models::SuccessBand::Normal)
        .count();

    let pooled: Vec<f64> = outcomes
        .iter()
        .filter(|o| o.band().is_degraded())
        .flat_map(|o| o.error_samples.iter().map(|s| s.error_rate))
        .collect();

    let mean_degraded_error = if pooled.is_empty() {
        None
    } else {
        Some(pooled.iter().sum::<f64>() / pooled.len() as f64)
    };

    ThresholdExplanation {
        total_missions,
        failed,
        mediocre,
        degraded_sample_count: pooled.len(),
        mean_degraded_error,
    }
}

/// Recompute the auto threshold of every equipment in the profile from the
/// full mission log. Equipment without enough degraded data has its auto
/// threshold cleared so resolution falls back to the manual value.
pub fn auto_tune_profile(profile: &mut UnitProfile, logs: &[MissionOutcome]) {
    for equipment in &mut profile.equipment {
        let relevant: Vec<MissionOutcome> = logs
            .iter()
            .filter(|log| log.equipment_id == equipment.id)
            .cloned()
            .collect();
        equipment.auto_threshold = estimate_auto_threshold(&relevant);
    }
}
