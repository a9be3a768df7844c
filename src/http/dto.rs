//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The analytics result types are re-exported from the api module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Analytics
    AccuracyReport, EquipmentStats, FleetAnalytics,
    // Domain model
    ForecastSample, MissionOutcome, SuccessEstimate, ThresholdExplanation, UnitProfile,
    // Advisory
    OutlookSummary, RiskLevel,
    // Window search
    RecommendedWindow,
};

/// Query parameters for forecast range and prediction endpoints, epoch ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    pub start: i64,
    pub end: i64,
}

/// Query parameters for the optimal-window endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowQueryParams {
    /// Search interval start, epoch ms
    pub start: i64,
    /// Search interval end, epoch ms
    pub end: i64,
    /// Required mission duration in hours on the hourly forecast grid
    pub duration_hours: u32,
}

/// Query parameters for the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictQuery {
    pub start: i64,
    pub end: i64,
    /// Equipment whose active threshold scores the window
    pub equipment_id: i64,
}

/// Query parameters for the outlook endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutlookQuery {
    /// Outlook anchor, epoch ms; defaults to the current time
    #[serde(default)]
    pub at: Option<i64>,
}

fn default_span_hours() -> u32 {
    48
}

/// Query parameters for the centered forecast view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenteredViewQuery {
    /// View anchor, epoch ms; defaults to the current time
    #[serde(default)]
    pub at: Option<i64>,
    /// Total view span in hours, centered on the grid sample closest to the
    /// anchor
    #[serde(default = "default_span_hours")]
    pub span_hours: u32,
}

/// Forecast range response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRangeResponse {
    pub samples: Vec<ForecastSample>,
    pub total: usize,
}

/// Response for a forecast feed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedUploadResponse {
    /// Number of samples parsed from the feed
    pub samples: usize,
    /// Checksum of the uploaded feed text
    pub checksum: String,
    /// False when the feed matched the current snapshot and was kept
    pub replaced: bool,
}

/// Request body for submitting mission feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMissionLogRequest {
    pub equipment_id: i64,
    /// Mission start, epoch ms
    pub start_time: i64,
    /// Mission end, epoch ms
    pub end_time: i64,
    /// Operator score, 1-10
    pub success_score: u8,
    /// Optional error log as CSV text (`date,error_rate[,lat,lon]`)
    #[serde(default)]
    pub error_csv: Option<String>,
}

/// Mission log list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionListResponse {
    pub missions: Vec<MissionOutcome>,
    pub total: usize,
}

/// Response for a mission log deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMissionResponse {
    pub deleted: i64,
}

/// Threshold explanation response for one equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdExplanationResponse {
    pub equipment_id: i64,
    /// Currently computed auto threshold, absent with insufficient data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_threshold: Option<f64>,
    pub explanation: ThresholdExplanation,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether a forecast snapshot is loaded
    pub forecast_loaded: bool,
}
