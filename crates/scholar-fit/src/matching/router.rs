use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ScholarshipId, StudentId};
use super::intake::{ScholarshipSubmission, StudentSubmission};
use super::repository::{ScholarshipCatalog, StudentDirectory};
use super::service::{MatchService, MatchServiceError};

/// Inline scoring request for callers that hold both records themselves.
#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub student: StudentSubmission,
    pub scholarship: ScholarshipSubmission,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Router builder exposing scoring, ranking, and demand endpoints.
pub fn match_router<S, C>(service: Arc<MatchService<S, C>>) -> Router
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    Router::new()
        .route("/api/v1/fit", post(evaluate_handler::<S, C>))
        .route(
            "/api/v1/students/:student_id/fit/:scholarship_id",
            get(fit_handler::<S, C>),
        )
        .route(
            "/api/v1/students/:student_id/recommendations",
            get(recommendations_handler::<S, C>),
        )
        .route("/api/v1/scholarships/demand", get(demand_handler::<S, C>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S, C>(
    State(service): State<Arc<MatchService<S, C>>>,
    axum::Json(request): axum::Json<FitRequest>,
) -> Response
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    match service.evaluate(request.student, request.scholarship) {
        Ok(report) => (StatusCode::OK, axum::Json(report.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fit_handler<S, C>(
    State(service): State<Arc<MatchService<S, C>>>,
    Path((student_id, scholarship_id)): Path<(String, String)>,
) -> Response
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    let student_id = StudentId(student_id);
    let scholarship_id = ScholarshipId(scholarship_id);
    match service.score(&student_id, &scholarship_id) {
        Ok(report) => (StatusCode::OK, axum::Json(report.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<S, C>(
    State(service): State<Arc<MatchService<S, C>>>,
    Path(student_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> Response
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    let student_id = StudentId(student_id);
    match service.recommend(&student_id, query.limit, query.as_of) {
        Ok(recommendations) => {
            let view = recommendations.view(&student_id);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn demand_handler<S, C>(
    State(service): State<Arc<MatchService<S, C>>>,
) -> Response
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    match service.demand() {
        Ok(demand) => (StatusCode::OK, axum::Json(demand.view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::StudentNotFound(_) | MatchServiceError::ScholarshipNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        MatchServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchServiceError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
