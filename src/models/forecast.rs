//! Forecast time-series model and range queries.
//!
//! A [`ForecastSeries`] is an immutable snapshot of the upstream space-weather
//! feed: one sample per grid instant, sorted ascending by timestamp with no
//! duplicates. Snapshots are replaced wholesale on refresh; nothing mutates a
//! series in place.

use serde::{Deserialize, Serialize};

use super::time::TimestampMs;

/// One forecast observation at a specific instant.
///
/// `predicted_error` is the forecast GNSS position error in meters.
/// `observed_error` is only present for past instants where ground truth was
/// recorded. The auxiliary space-weather indices may each be absent for any
/// given sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: TimestampMs,
    pub predicted_error: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kp_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xray_flux: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<f64>,
}

impl ForecastSample {
    /// Sample carrying only a predicted error, auxiliary indices absent.
    pub fn with_predicted_error(timestamp: TimestampMs, predicted_error: f64) -> Self {
        Self {
            timestamp,
            predicted_error,
            observed_error: None,
            tec: None,
            kp_index: None,
            xray_flux: None,
            dst: None,
        }
    }
}

/// Ordered, timestamp-unique sequence of forecast samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    samples: Vec<ForecastSample>,
    /// SHA-256 of the raw feed text this series was parsed from, empty when
    /// the series was built programmatically.
    checksum: String,
}

impl ForecastSeries {
    /// Build a series from unordered samples.
    ///
    /// Sorts ascending by timestamp and drops all but the first sample for
    /// any duplicated instant, establishing the series invariant.
    pub fn new(mut samples: Vec<ForecastSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        samples.dedup_by_key(|s| s.timestamp);
        Self {
            samples,
            checksum: String::new(),
        }
    }

    /// Build a series and record the checksum of the feed it came from.
    pub fn with_checksum(samples: Vec<ForecastSample>, checksum: String) -> Self {
        let mut series = Self::new(samples);
        series.checksum = checksum;
        series
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// All samples with `start <= timestamp <= end`, in series order.
    ///
    /// An inverted range (`start > end`), an empty series, or a range with no
    /// overlap all yield an empty slice.
    pub fn samples_in_range(&self, start: TimestampMs, end: TimestampMs) -> &[ForecastSample] {
        if start > end {
            return &[];
        }
        let lo = self.samples.partition_point(|s| s.timestamp < start);
        let hi = self.samples.partition_point(|s| s.timestamp <= end);
        &self.samples[lo..hi]
    }

    /// The sample closest in time to `target`, ties resolved to the earlier
    /// sample. `None` on an empty series.
    pub fn closest_sample(&self, target: TimestampMs) -> Option<&ForecastSample> {
        let idx = self.samples.partition_point(|s| s.timestamp < target);

        let before = idx.checked_sub(1).map(|i| &self.samples[i]);
        let after = self.samples.get(idx);

        match (before, after) {
            (None, None) => None,
            (Some(s), None) | (None, Some(s)) => Some(s),
            (Some(b), Some(a)) => {
                if b.timestamp.distance_to(target) <= a.timestamp.distance_to(target) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
        }
    }

    /// Display window of `span_ms` centered on the sample closest to
    /// `target`, used to align a chart on the nearest grid instant rather
    /// than the wall clock.
    pub fn centered_range(&self, target: TimestampMs, span_ms: i64) -> &[ForecastSample] {
        match self.closest_sample(target) {
            Some(center) => {
                let half = span_ms / 2;
                self.samples_in_range(
                    center.timestamp.offset_ms(-half),
                    center.timestamp.offset_ms(half),
                )
            }
            None => &[],
        }
    }

    /// Maximum predicted error over `[start, end]`, `None` when no samples
    /// fall in the range.
    pub fn max_predicted_error_in(&self, start: TimestampMs, end: TimestampMs) -> Option<f64> {
        self.samples_in_range(start, end)
            .iter()
            .map(|s| s.predicted_error)
            .fold(None, |acc, e| Some(acc.map_or(e, |m: f64| m.max(e))))
    }
}
