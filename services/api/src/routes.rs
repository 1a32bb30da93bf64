use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mock_placement::placement::{
    subjects, PlacementOutcome, ScoreMap, SchoolEntry, SubjectDefinition,
};
use mock_placement::roster::{roster_router, RosterService, StudentStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionRequest {
    #[serde(default)]
    pub(crate) scores: ScoreMap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictionResponse {
    #[serde(flatten)]
    pub(crate) outcome: PlacementOutcome,
    pub(crate) performance_level: &'static str,
    pub(crate) message: &'static str,
    pub(crate) complete: bool,
}

pub(crate) fn with_roster_routes<S>(service: Arc<RosterService<S>>) -> axum::Router
where
    S: StudentStore + 'static,
{
    roster_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/subjects", axum::routing::get(subjects_endpoint))
        .route("/api/schools", axum::routing::get(schools_endpoint))
        .route("/api/predict", axum::routing::post(predict_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn subjects_endpoint() -> Json<&'static [SubjectDefinition]> {
    Json(subjects())
}

pub(crate) async fn schools_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<SchoolEntry>> {
    Json(state.engine.directory().entries().cloned().collect())
}

/// Score a set of raw results without recording them against a student.
pub(crate) async fn predict_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Json<PredictionResponse> {
    let outcome = state.engine.assess(&request.scores);
    let level = outcome.performance_level();

    Json(PredictionResponse {
        complete: request.scores.has_core_subjects(),
        performance_level: level.label(),
        message: level.message(),
        outcome,
    })
}
