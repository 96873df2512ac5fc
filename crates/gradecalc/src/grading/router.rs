use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use super::classifier::classify;
use super::history::{HistoryError, HistoryStore, RecordId};
use super::service::{CalculationRequest, GradeService, GradeServiceError, GradeSheetRequest};

/// Router builder exposing the calculators and the saved-calculation history.
pub fn grading_router<H>(service: Arc<GradeService<H>>) -> Router
where
    H: HistoryStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/grades/minimum-final",
            post(minimum_final_handler::<H>),
        )
        .route("/api/v1/grades/year-end", post(year_end_handler::<H>))
        .route("/api/v1/grades/courses", post(grade_sheet_handler::<H>))
        .route("/api/v1/grades/letter/:score", get(letter_handler))
        .route(
            "/api/v1/grades/history",
            get(history_handler::<H>).delete(clear_history_handler::<H>),
        )
        .route(
            "/api/v1/grades/history/:record_id",
            delete(delete_record_handler::<H>),
        )
        .with_state(service)
}

pub(crate) async fn minimum_final_handler<H>(
    State(service): State<Arc<GradeService<H>>>,
    Json(request): Json<CalculationRequest>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.minimum_final(request) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn year_end_handler<H>(
    State(service): State<Arc<GradeService<H>>>,
    Json(request): Json<CalculationRequest>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.year_end(request) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn grade_sheet_handler<H>(
    State(service): State<Arc<GradeService<H>>>,
    Json(request): Json<GradeSheetRequest>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.grade_sheet(request) {
        Ok(standings) => (StatusCode::OK, Json(json!({ "courses": standings }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn letter_handler(Path(score): Path<f64>) -> Response {
    let grade = classify(score);
    (
        StatusCode::OK,
        Json(json!({ "score": score, "letter_grade": grade })),
    )
        .into_response()
}

pub(crate) async fn history_handler<H>(State(service): State<Arc<GradeService<H>>>) -> Response
where
    H: HistoryStore + 'static,
{
    match service.history() {
        Ok(records) => (StatusCode::OK, Json(json!({ "records": records }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn clear_history_handler<H>(
    State(service): State<Arc<GradeService<H>>>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.clear_history() {
        Ok(cleared) => (StatusCode::OK, Json(json!({ "cleared": cleared }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_record_handler<H>(
    State(service): State<Arc<GradeService<H>>>,
    Path(record_id): Path<String>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.delete(&RecordId(record_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

impl GradeServiceError {
    /// HTTP status reported for this failure by every grading surface.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GradeServiceError::Grading(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GradeServiceError::History(HistoryError::NotFound) => StatusCode::NOT_FOUND,
            GradeServiceError::History(HistoryError::Conflict) => StatusCode::CONFLICT,
            GradeServiceError::History(HistoryError::Full { .. }) => {
                StatusCode::INSUFFICIENT_STORAGE
            }
            GradeServiceError::History(HistoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn error_response(error: GradeServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), Json(payload)).into_response()
}
