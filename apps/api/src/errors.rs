use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::gateway::AnalysisError;
use crate::posting::stake::StakeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Invalid stake: {0}")]
    Stake(#[from] StakeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Stake(e) => (StatusCode::BAD_REQUEST, "INVALID_STAKE", e.to_string()),
            AppError::Analysis(e) => match e {
                AnalysisError::EmptyInput => {
                    (StatusCode::BAD_REQUEST, "EMPTY_INPUT", e.to_string())
                }
                AnalysisError::ParseFailure { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_PARSE_FAILURE",
                    "The AI response could not be parsed".to_string(),
                ),
                AnalysisError::BackendUnavailable(msg) => {
                    tracing::error!("Analysis backend error: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "BACKEND_UNAVAILABLE",
                        "An AI processing error occurred".to_string(),
                    )
                }
                AnalysisError::ConfigurationMissing(name) => {
                    tracing::error!("Missing configuration: {name}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_MISSING",
                        format!("{name} is not configured"),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
