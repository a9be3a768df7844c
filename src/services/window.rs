//! Optimal mission-window search.
//!
//! Scans a search interval of the forecast for the contiguous run of samples
//! of the required mission length with the lowest cumulative predicted error.
//! The scan is a brute-force sliding window; candidate counts are a few
//! thousand at most, so the O(N·D) resum is not worth replacing with prefix
//! sums.

use serde::{Deserialize, Serialize};

use crate::models::{ForecastSeries, TimestampMs, HOUR_MS};

use super::AnalysisError;

/// Search request for an optimal mission window.
///
/// The mission length is an explicit time span together with the sampling
/// interval of the forecast grid; the consecutive-sample count is derived
/// here instead of making callers pre-convert hours into sample counts.
#[derive(Debug, Clone, Copy)]
pub struct WindowQuery {
    pub search_start: TimestampMs,
    pub search_end: TimestampMs,
    pub mission_duration: chrono::Duration,
    /// Spacing of the forecast grid. Non-positive values are treated as the
    /// standard hourly grid.
    pub sampling_interval: chrono::Duration,
}

impl WindowQuery {
    /// Query against the standard hourly forecast grid.
    pub fn hourly(search_start: TimestampMs, search_end: TimestampMs, duration_hours: u32) -> Self {
        Self {
            search_start,
            search_end,
            mission_duration: chrono::Duration::hours(i64::from(duration_hours)),
            sampling_interval: chrono::Duration::hours(1),
        }
    }

    fn interval_ms(&self) -> i64 {
        let ms = self.sampling_interval.num_milliseconds();
        if ms > 0 {
            ms
        } else {
            HOUR_MS
        }
    }

    /// Number of consecutive samples the mission spans: ceiling division so a
    /// partial trailing interval is still covered, never fewer than one.
    pub fn duration_in_samples(&self) -> usize {
        let duration_ms = self.mission_duration.num_milliseconds().max(0);
        let interval = self.interval_ms();
        ((duration_ms + interval - 1) / interval).max(1) as usize
    }
}

/// The lowest-error contiguous window found in a search interval.
///
/// `end` is half-open: window start plus the mission span on the sampling
/// grid, matching the uniform-grid assumption of the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedWindow {
    pub start: TimestampMs,
    pub end: TimestampMs,
    /// Mean predicted error inside the window.
    pub avg_error: f64,
    /// Worst predicted error inside the window.
    pub max_error: f64,
    /// Mean Kp index inside the window, `None` when no sample there carries
    /// one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_kp_index: Option<f64>,
    /// Mean predicted error across the whole search interval.
    pub overall_avg_error: f64,
    /// How much better the window is than the interval average, in percent.
    /// Zero when the interval average is zero.
    pub improvement_percent: f64,
}

/// Find the optimal mission window for a query.
pub fn find_optimal_window(
    series: &ForecastSeries,
    query: &WindowQuery,
) -> Result<RecommendedWindow, AnalysisError> {
    find_min_error_window(
        series,
        query.search_start,
        query.search_end,
        query.duration_in_samples(),
        query.interval_ms(),
    )
}

/// Sample-count entry point of the window search.
///
/// `duration_samples` below one is treated as one. Fails with
/// [`AnalysisError::SearchRangeTooShort`] when the interval holds fewer
/// samples than the mission needs; ties on cumulative error keep the earliest
/// window.
pub fn find_min_error_window(
    series: &ForecastSeries,
    search_start: TimestampMs,
    search_end: TimestampMs,
    duration_samples: usize,
    interval_ms: i64,
) -> Result<RecommendedWindow, AnalysisError> {
    let required = duration_samples.max(1);
    let candidates = series.samples_in_range(search_start, search_end);

    if candidates.len() < required {
        return Err(AnalysisError::SearchRangeTooShort {
            available: candidates.len(),
            required,
        });
    }

    let mut best_index = 0;
    let mut best_sum = f64::INFINITY;

    for start in 0..=(candidates.len() - required) {
        let sum: f64 = candidates[start..start + required]
            .iter()
            .map(|s| s.predicted_error)
            .sum();
        if sum < best_sum {
            best_sum = sum;
            best_index = start;
        }
    }

    let window = &candidates[best_index..best_index + required];

    let max_error = window
        .iter()
        .map(|s| s.predicted_error)
        .fold(f64::NEG_INFINITY, f64::max);

    let kp_values: Vec<f64> = window.iter().filter_map(|s| s.kp_index).collect();
    let avg_kp_index = if kp_values.is_empty() {
        None
    } else {
        Some(kp_values.iter().sum::<f64>() / kp_values.len() as f64)
    };

    let overall_avg_error =
        candidates.iter().map(|s| s.predicted_error).sum::<f64>() / candidates.len() as f64;
    let avg_error = best_sum / required as f64;

    let improvement_percent = if overall_avg_error > 0.0 {
        (overall_avg_error - avg_error) / overall_avg_error * 100.0
    } else {
        0.0
    };

    let start = window[0].timestamp;
    Ok(RecommendedWindow {
        start,
        end: start.offset_ms(required as i64 * interval_ms),
        avg_error,
        max_error,
        avg_kp_index,
        overall_avg_error,
        improvement_percent,
    })
}
