//! Daily risk advisory.

use serde::{Deserialize, Serialize};

use crate::models::{ForecastSeries, Threshold, TimestampMs, HOUR_MS};

/// Fraction of the threshold at which the caution band starts.
const CAUTION_RATIO: f64 = 0.7;

/// Span of the daily outlook.
const OUTLOOK_HOURS: i64 = 24;

/// Risk band of a predicted error against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal,
    Caution,
    Risk,
}

/// Classify an error magnitude: above the threshold is risk, above 70% of it
/// is caution.
pub fn classify_error(error: f64, threshold: Threshold) -> RiskLevel {
    if error > threshold.value() {
        RiskLevel::Risk
    } else if error > threshold.value() * CAUTION_RATIO {
        RiskLevel::Caution
    } else {
        RiskLevel::Normal
    }
}

/// Advisory for the next 24 hours of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookSummary {
    pub window_start: TimestampMs,
    pub window_end: TimestampMs,
    /// Worst predicted error in the outlook window, 0.0 when no forecast
    /// covers it.
    pub max_error: f64,
    pub threshold: Threshold,
    pub level: RiskLevel,
}

/// Compute the 24-hour outlook from `now` against the unit threshold.
pub fn daily_outlook(
    series: &ForecastSeries,
    now: TimestampMs,
    threshold: Threshold,
) -> OutlookSummary {
    let window_end = now.offset_ms(OUTLOOK_HOURS * HOUR_MS);
    let max_error = series.max_predicted_error_in(now, window_end).unwrap_or(0.0);

    OutlookSummary {
        window_start: now,
        window_end,
        max_error,
        threshold,
        level: classify_error(max_error, threshold),
    }
}
