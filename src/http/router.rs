//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Forecast snapshot
        .route("/forecast", get(handlers::get_forecast_range))
        .route("/forecast", post(handlers::upload_forecast))
        .route("/forecast/view", get(handlers::get_forecast_view))
        // Analytics
        .route("/outlook", get(handlers::get_outlook))
        .route("/window", get(handlers::get_optimal_window))
        .route("/predict", get(handlers::predict_success))
        .route("/analytics", get(handlers::get_fleet_analytics))
        .route(
            "/equipment/{equipment_id}/threshold-explanation",
            get(handlers::get_threshold_explanation),
        )
        // Profile
        .route("/profile", get(handlers::get_profile))
        .route("/profile", put(handlers::update_profile))
        .route("/profile/auto-tune", post(handlers::auto_tune_profile))
        // Mission feedback log
        .route("/missions", get(handlers::list_missions))
        .route("/missions", post(handlers::create_mission))
        .route("/missions/{mission_id}", delete(handlers::delete_mission))
        .route(
            "/missions/{mission_id}/accuracy",
            get(handlers::get_mission_accuracy),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{default_unit_profile, OpsStore};

    #[test]
    fn test_router_creation() {
        let store = OpsStore::new(default_unit_profile());
        let state = AppState::new(store);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
