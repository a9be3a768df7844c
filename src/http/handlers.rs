//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the analytics.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CenteredViewQuery, CreateMissionLogRequest, DeleteMissionResponse, FeedUploadResponse,
    ForecastRangeResponse, HealthResponse, MissionListResponse, OutlookQuery, PredictQuery,
    RangeQuery, ThresholdExplanationResponse, WindowQueryParams,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{EquipmentId, MissionLogId, TimestampMs, UnitProfile};
use crate::models::feed::{parse_forecast_csv, parse_mission_csv};
use crate::services;
use crate::services::window::WindowQuery;
use crate::store::NewMissionLog;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// The loaded forecast snapshot, or a 404 telling the caller to upload one.
fn require_forecast(state: &AppState) -> Result<std::sync::Arc<crate::api::ForecastSeries>, AppError> {
    state
        .store
        .forecast()
        .ok_or_else(|| AppError::NotFound("no forecast snapshot loaded".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        forecast_loaded: state.store.forecast().is_some(),
    }))
}

// =============================================================================
// Forecast
// =============================================================================

/// GET /v1/forecast
///
/// Forecast samples inside `[start, end]`, epoch ms.
pub async fn get_forecast_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> HandlerResult<ForecastRangeResponse> {
    let series = require_forecast(&state)?;
    let samples = series
        .samples_in_range(TimestampMs::new(query.start), TimestampMs::new(query.end))
        .to_vec();
    let total = samples.len();

    Ok(Json(ForecastRangeResponse { samples, total }))
}

/// POST /v1/forecast
///
/// Upload a forecast CSV and replace the current snapshot wholesale.
pub async fn upload_forecast(
    State(state): State<AppState>,
    body: String,
) -> HandlerResult<FeedUploadResponse> {
    let series = parse_forecast_csv(&body)?;

    let samples = series.len();
    let checksum = series.checksum().to_string();
    let replaced = state.store.replace_forecast(series);

    Ok(Json(FeedUploadResponse {
        samples,
        checksum,
        replaced,
    }))
}

/// GET /v1/forecast/view
///
/// Chart-ready slice of the forecast: `span_hours` centered on the grid
/// sample closest to the anchor, so the view stays aligned when the feed lags
/// the wall clock.
pub async fn get_forecast_view(
    State(state): State<AppState>,
    Query(query): Query<CenteredViewQuery>,
) -> HandlerResult<ForecastRangeResponse> {
    let series = require_forecast(&state)?;

    let at = query
        .at
        .map(TimestampMs::new)
        .unwrap_or_else(|| TimestampMs::from_datetime(chrono::Utc::now()));
    let span_ms = i64::from(query.span_hours) * 3_600_000;

    let samples = series.centered_range(at, span_ms).to_vec();
    let total = samples.len();

    Ok(Json(ForecastRangeResponse { samples, total }))
}

// =============================================================================
// Analytics Endpoints
// =============================================================================

/// GET /v1/outlook
///
/// 24-hour risk outlook against the unit threshold.
pub async fn get_outlook(
    State(state): State<AppState>,
    Query(query): Query<OutlookQuery>,
) -> HandlerResult<crate::api::OutlookSummary> {
    let series = require_forecast(&state)?;
    let profile = state.store.unit_profile();

    let now = query
        .at
        .map(TimestampMs::new)
        .unwrap_or_else(|| TimestampMs::from_datetime(chrono::Utc::now()));

    Ok(Json(services::daily_outlook(
        &series,
        now,
        profile.active_threshold(),
    )))
}

/// GET /v1/window
///
/// Lowest-error mission window inside the search interval.
pub async fn get_optimal_window(
    State(state): State<AppState>,
    Query(query): Query<WindowQueryParams>,
) -> HandlerResult<crate::api::RecommendedWindow> {
    let series = require_forecast(&state)?;

    let window_query = WindowQuery::hourly(
        TimestampMs::new(query.start),
        TimestampMs::new(query.end),
        query.duration_hours,
    );

    let window = services::find_optimal_window(&series, &window_query)?;
    Ok(Json(window))
}

/// GET /v1/predict
///
/// Success-likelihood estimate for a planned window, scored against the
/// equipment's active threshold.
pub async fn predict_success(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> HandlerResult<crate::api::SuccessEstimate> {
    let series = require_forecast(&state)?;
    let profile = state.store.unit_profile();

    let equipment_id = EquipmentId::new(query.equipment_id);
    let equipment = profile
        .equipment_by_id(equipment_id)
        .ok_or_else(|| AppError::NotFound(format!("equipment {} not found", equipment_id)))?;

    let errors: Vec<f64> = series
        .samples_in_range(TimestampMs::new(query.start), TimestampMs::new(query.end))
        .iter()
        .map(|s| s.predicted_error)
        .collect();

    let estimate = services::predict_mission_success(&errors, equipment.active_threshold())?;
    Ok(Json(estimate))
}

/// GET /v1/analytics
///
/// Fleet-wide mission feedback summary.
pub async fn get_fleet_analytics(
    State(state): State<AppState>,
) -> HandlerResult<crate::api::FleetAnalytics> {
    let profile = state.store.unit_profile();
    let logs = state.store.mission_logs();

    Ok(Json(services::compute_fleet_analytics(&profile, &logs)))
}

/// GET /v1/equipment/{equipment_id}/threshold-explanation
///
/// Evidence summary behind an equipment's auto threshold.
pub async fn get_threshold_explanation(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> HandlerResult<ThresholdExplanationResponse> {
    let equipment_id = EquipmentId::new(equipment_id);
    let profile = state.store.unit_profile();
    let equipment = profile
        .equipment_by_id(equipment_id)
        .ok_or_else(|| AppError::NotFound(format!("equipment {} not found", equipment_id)))?;

    let logs = state.store.logs_for_equipment(equipment_id);

    Ok(Json(ThresholdExplanationResponse {
        equipment_id: equipment_id.value(),
        auto_threshold: equipment.auto_threshold.map(|t| t.value()),
        explanation: services::explain_threshold(&logs),
    }))
}

// =============================================================================
// Profile
// =============================================================================

/// GET /v1/profile
pub async fn get_profile(State(state): State<AppState>) -> HandlerResult<UnitProfile> {
    Ok(Json(state.store.unit_profile()))
}

/// PUT /v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Json(profile): Json<UnitProfile>,
) -> HandlerResult<UnitProfile> {
    state.store.update_profile(profile);
    Ok(Json(state.store.unit_profile()))
}

/// POST /v1/profile/auto-tune
///
/// Recompute every equipment's auto threshold from the mission log.
pub async fn auto_tune_profile(State(state): State<AppState>) -> HandlerResult<UnitProfile> {
    Ok(Json(state.store.auto_tune()))
}

// =============================================================================
// Mission Log
// =============================================================================

/// GET /v1/missions
pub async fn list_missions(State(state): State<AppState>) -> HandlerResult<MissionListResponse> {
    let missions = state.store.mission_logs();
    let total = missions.len();

    Ok(Json(MissionListResponse { missions, total }))
}

/// POST /v1/missions
///
/// Record mission feedback, optionally with an attached error-log CSV.
pub async fn create_mission(
    State(state): State<AppState>,
    Json(request): Json<CreateMissionLogRequest>,
) -> HandlerResult<crate::api::MissionOutcome> {
    let error_samples = match request.error_csv.as_deref() {
        Some(csv_text) => parse_mission_csv(csv_text)?,
        None => Vec::new(),
    };

    let outcome = state.store.add_mission_log(NewMissionLog {
        equipment_id: EquipmentId::new(request.equipment_id),
        start_time: TimestampMs::new(request.start_time),
        end_time: TimestampMs::new(request.end_time),
        success_score: request.success_score,
        error_samples,
    })?;

    Ok(Json(outcome))
}

/// GET /v1/missions/{mission_id}/accuracy
///
/// Forecast accuracy over one mission: recorded readings aligned against the
/// forecast grid.
pub async fn get_mission_accuracy(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
) -> HandlerResult<crate::api::AccuracyReport> {
    let outcome = state
        .store
        .mission_log(MissionLogId::new(mission_id))
        .ok_or_else(|| AppError::NotFound(format!("mission log {} not found", mission_id)))?;
    let series = require_forecast(&state)?;

    let report = services::mission_forecast_accuracy(&series, &outcome).ok_or(
        AppError::Unprocessable {
            code: "NO_MATCHED_SAMPLES",
            message: "mission carries no error readings to compare".to_string(),
        },
    )?;

    Ok(Json(report))
}

/// DELETE /v1/missions/{mission_id}
pub async fn delete_mission(
    State(state): State<AppState>,
    Path(mission_id): Path<i64>,
) -> HandlerResult<DeleteMissionResponse> {
    let id = MissionLogId::new(mission_id);
    state.store.delete_mission_log(id)?;

    Ok(Json(DeleteMissionResponse { deleted: mission_id }))
}
