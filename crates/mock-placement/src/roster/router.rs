use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MockTestSubmission, StudentRecord};
use super::filter::RosterFilter;
use super::repository::StudentStore;
use super::service::{RosterService, RosterServiceError};

/// Router builder exposing the roster, analytics, and import endpoints.
pub fn roster_router<S>(service: Arc<RosterService<S>>) -> Router
where
    S: StudentStore + 'static,
{
    Router::new()
        .route(
            "/api/students",
            get(list_handler::<S>).post(upsert_handler::<S>),
        )
        .route("/api/students/:student_id", get(student_handler::<S>))
        .route(
            "/api/students/:student_id/mock-tests",
            post(record_test_handler::<S>),
        )
        .route("/api/dashboard", get(dashboard_handler::<S>))
        .route("/api/reports", get(report_handler::<S>))
        .route("/api/import/students", post(import_students_handler::<S>))
        .route(
            "/api/import/mock-tests",
            post(import_mock_tests_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    top: Option<usize>,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    Query(filter): Query<RosterFilter>,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.students(&filter) {
        Ok(students) => (StatusCode::OK, axum::Json(students)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upsert_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    axum::Json(record): axum::Json<StudentRecord>,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.upsert_student(record) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.student(&student_id) {
        Ok(Some(student)) => (StatusCode::OK, axum::Json(student)).into_response(),
        Ok(None) => not_found(&student_id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_test_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    Path(student_id): Path<String>,
    axum::Json(submission): axum::Json<MockTestSubmission>,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.record_mock_test(&student_id, submission) {
        Ok(Some(student)) => (StatusCode::CREATED, axum::Json(student)).into_response(),
        Ok(None) => not_found(&student_id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.dashboard(query.top) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<S>(State(service): State<Arc<RosterService<S>>>) -> Response
where
    S: StudentStore + 'static,
{
    match service.report() {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_students_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    body: String,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.import_students(body.as_bytes()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_mock_tests_handler<S>(
    State(service): State<Arc<RosterService<S>>>,
    body: String,
) -> Response
where
    S: StudentStore + 'static,
{
    match service.import_mock_tests(body.as_bytes()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

fn not_found(student_id: &str) -> Response {
    let payload = json!({
        "error": format!("student '{student_id}' not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn error_response(error: RosterServiceError) -> Response {
    let status = match &error {
        RosterServiceError::Spreadsheet(_) => StatusCode::BAD_REQUEST,
        RosterServiceError::MissingStudentId => StatusCode::UNPROCESSABLE_ENTITY,
        RosterServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
