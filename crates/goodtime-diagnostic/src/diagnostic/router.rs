use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::DiagnosticRequest;
use super::service::{DiagnosticService, DiagnosticServiceError};
use super::store::{DocumentStore, StatusCheck};
use crate::error::AppError;

pub const ROOT_MESSAGE: &str = "Goodtime Diagnostic API";

/// Body of `POST /api/status`.
#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// Router exposing the diagnostic and status-check endpoints under `/api`.
pub fn diagnostic_router<S>(service: Arc<DiagnosticService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/", get(root_handler))
        .route("/api/diagnostic/analyze", post(analyze_handler::<S>))
        .route(
            "/api/status",
            post(create_status_handler::<S>).get(list_status_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<DiagnosticService<S>>>,
    payload: Result<Json<DiagnosticRequest>, JsonRejection>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    match service.analyze(request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(DiagnosticServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(DiagnosticServiceError::Completion(error)) => {
            let payload = json!({
                "error": format!("analysis unavailable: {error}"),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn create_status_handler<S>(
    State(service): State<Arc<DiagnosticService<S>>>,
    Json(body): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, AppError>
where
    S: DocumentStore + 'static,
{
    let check = service.record_status_check(body.client_name).await?;
    Ok(Json(check))
}

pub(crate) async fn list_status_handler<S>(
    State(service): State<Arc<DiagnosticService<S>>>,
) -> Result<Json<Vec<StatusCheck>>, AppError>
where
    S: DocumentStore + 'static,
{
    let checks = service.status_checks().await?;
    Ok(Json(checks))
}
