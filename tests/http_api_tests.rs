//! Integration tests driving the REST API through the router.

#![cfg(feature = "http-server")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use swops_rust::http::{create_router, AppState};
use swops_rust::store::{default_unit_profile, OpsStore};

const FEED: &str = "\
datetime,fore_gnss,real_gnss,tec_value,xrsb,kp10,dst
2026-08-01 00:00:00,10.0,,15.0,1.0e-6,30,-10
2026-08-01 01:00:00,2.0,,16.0,1.0e-6,20,-10
2026-08-01 02:00:00,2.0,,17.0,1.0e-6,20,-10
2026-08-01 03:00:00,9.0,,18.0,1.0e-6,50,-10
2026-08-01 04:00:00,9.0,,19.0,1.0e-6,50,-10
";

/// 2026-08-01T00:00:00Z
const T0_MS: i64 = 1_785_542_400_000;
const HOUR_MS: i64 = 3_600_000;

fn app() -> Router {
    let store = OpsStore::new(default_unit_profile());
    create_router(AppState::new(store))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload_feed(app: &Router) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/forecast")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(FEED))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["forecast_loaded"], false);
}

#[tokio::test]
async fn test_forecast_upload_and_range_query() {
    let app = app();
    upload_feed(&app).await;

    let uri = format!("/v1/forecast?start={}&end={}", T0_MS, T0_MS + 2 * HOUR_MS);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["samples"][1]["predicted_error"], 2.0);
    // kp10 = 20 arrives as Kp 2.0.
    assert_eq!(body["samples"][1]["kp_index"], 2.0);
}

#[tokio::test]
async fn test_forecast_query_without_snapshot_is_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/forecast?start=0&end=1000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_window_recommendation() {
    let app = app();
    upload_feed(&app).await;

    let uri = format!(
        "/v1/window?start={}&end={}&duration_hours=2",
        T0_MS,
        T0_MS + 4 * HOUR_MS
    );
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["start"], json!(T0_MS + HOUR_MS));
    assert_eq!(body["end"], json!(T0_MS + 3 * HOUR_MS));
    assert_eq!(body["avg_error"], 2.0);
}

#[tokio::test]
async fn test_window_too_long_is_422() {
    let app = app();
    upload_feed(&app).await;

    let uri = format!(
        "/v1/window?start={}&end={}&duration_hours=12",
        T0_MS,
        T0_MS + 4 * HOUR_MS
    );
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "SEARCH_RANGE_TOO_SHORT");
}

#[tokio::test]
async fn test_predict_uses_equipment_threshold() {
    let app = app();
    upload_feed(&app).await;

    let uri = format!(
        "/v1/predict?start={}&end={}&equipment_id=1",
        T0_MS + HOUR_MS,
        T0_MS + 2 * HOUR_MS
    );
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["over_threshold_percent"], 0.0);
    assert!(body["success_rate"].as_f64().unwrap() > 90.0);
}

#[tokio::test]
async fn test_mission_lifecycle() {
    let app = app();

    let request_body = json!({
        "equipment_id": 1,
        "start_time": T0_MS,
        "end_time": T0_MS + HOUR_MS,
        "success_score": 3,
        "error_csv": "date,error_rate\n2026-08-01T00:10:00,5.0\n2026-08-01T00:20:00,12.0\n"
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/missions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&request_body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["error_samples"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/missions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listing = body_json(response).await;
    assert_eq!(listing["total"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/missions/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/missions/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_auto_tune_endpoint() {
    let app = app();

    // Three degraded missions pooling four readings on equipment 1.
    for (score, csv) in [
        (3, "date,error_rate\n2026-08-01T00:10:00,5.0\n2026-08-01T00:20:00,7.0\n"),
        (5, "date,error_rate\n2026-08-01T01:10:00,9.0\n"),
        (2, "date,error_rate\n2026-08-01T02:10:00,20.0\n"),
    ] {
        let request_body = json!({
            "equipment_id": 1,
            "start_time": T0_MS,
            "end_time": T0_MS + HOUR_MS,
            "success_score": score,
            "error_csv": csv
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/missions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&request_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/profile/auto-tune")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["equipment"][0]["auto_threshold"], 20.0);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/equipment/1/threshold-explanation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let explanation = body_json(response).await;
    assert_eq!(explanation["auto_threshold"], 20.0);
    assert_eq!(explanation["explanation"]["total_missions"], 3);
    assert_eq!(explanation["explanation"]["degraded_sample_count"], 4);
}
