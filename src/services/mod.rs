//! Service layer for the forecast analytics.
//!
//! Every function in this layer is a pure, synchronous computation over a
//! snapshot handed in by the caller. Expected edge conditions (too little
//! data, empty ranges) come back as typed results the caller branches on;
//! nothing in here panics on malformed input.

pub mod advisory;
pub mod analysis;
pub mod predictor;
pub mod threshold;
pub mod window;

pub use advisory::daily_outlook;
pub use analysis::{compute_fleet_analytics, mission_forecast_accuracy};
pub use predictor::predict_mission_success;
pub use threshold::{auto_tune_profile, estimate_auto_threshold, explain_threshold};
pub use window::find_optimal_window;

use thiserror::Error;

/// Recoverable analysis failures a caller must branch on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The search interval holds fewer forecast samples than the requested
    /// mission duration.
    #[error("search range holds {available} samples but the mission needs {required}")]
    SearchRangeTooShort { available: usize, required: usize },

    /// No forecast samples overlap the planned mission window.
    #[error("no forecast samples in the planned mission window")]
    EmptyPredictionRange,
}
