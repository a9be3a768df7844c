//! Heuristic mission success scoring.

use serde::{Deserialize, Serialize};

use crate::models::Threshold;

use super::AnalysisError;

// Scoring weights inherited from the fielded model. They have no derivation;
// treat the output as an indicator, not a probability.
const OVER_THRESHOLD_WEIGHT: f64 = 1.5;
const AVG_ERROR_WEIGHT: f64 = 20.0;
const MAX_SUCCESS_RATE: f64 = 99.0;

/// Success-likelihood estimate for a planned mission window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEstimate {
    /// Heuristic success likelihood, 0-99.
    pub success_rate: f64,
    pub max_error: f64,
    pub avg_error: f64,
    /// Share of window samples above the threshold, 0-100.
    pub over_threshold_percent: f64,
}

/// Score a planned window of predicted errors against an active threshold.
///
/// Fails with [`AnalysisError::EmptyPredictionRange`] when no predictions
/// cover the window. A non-positive threshold drops the average-error penalty
/// term so the result stays finite.
pub fn predict_mission_success(
    predicted_errors: &[f64],
    threshold: Threshold,
) -> Result<SuccessEstimate, AnalysisError> {
    if predicted_errors.is_empty() {
        return Err(AnalysisError::EmptyPredictionRange);
    }

    let count = predicted_errors.len() as f64;
    let max_error = predicted_errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_error = predicted_errors.iter().sum::<f64>() / count;

    let over = predicted_errors
        .iter()
        .filter(|&&e| e > threshold.value())
        .count() as f64;
    let over_threshold_percent = over / count * 100.0;

    let avg_penalty = if threshold.value() > 0.0 {
        avg_error / threshold.value() * AVG_ERROR_WEIGHT
    } else {
        0.0
    };

    let success_rate = (100.0 - over_threshold_percent * OVER_THRESHOLD_WEIGHT - avg_penalty)
        .clamp(0.0, MAX_SUCCESS_RATE);

    Ok(SuccessEstimate {
        success_rate,
        max_error,
        avg_error,
        over_threshold_percent,
    })
}
