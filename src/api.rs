//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::services::advisory::{OutlookSummary, RiskLevel};
pub use crate::services::analysis::{AccuracyReport, EquipmentStats, FleetAnalytics};
pub use crate::services::predictor::SuccessEstimate;
pub use crate::services::threshold::ThresholdExplanation;
pub use crate::services::window::{RecommendedWindow, WindowQuery};
pub use crate::services::AnalysisError;

use serde::{Deserialize, Serialize};

/// Equipment identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub i64);

/// Mission log identifier (assigned by the store).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MissionLogId(pub i64);

impl EquipmentId {
    pub fn new(value: i64) -> Self {
        EquipmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl MissionLogId {
    pub fn new(value: i64) -> Self {
        MissionLogId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for MissionLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EquipmentId> for i64 {
    fn from(id: EquipmentId) -> Self {
        id.0
    }
}

impl From<MissionLogId> for i64 {
    fn from(id: MissionLogId) -> Self {
        id.0
    }
}

pub use crate::models::{
    ForecastSample, ForecastSeries, GeoPoint, MissionErrorSample, MissionOutcome, SuccessBand,
    Threshold, ThresholdMode, TimestampMs,
};
pub use crate::models::{EquipmentProfile, UnitProfile};
