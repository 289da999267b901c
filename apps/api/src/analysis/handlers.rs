//! Axum route handlers for the Analysis API.
//!
//! Both endpoints answer with the `{ success, rating?, feedback?, error? }`
//! envelope the front end expects. A reply that could not be parsed is still
//! a 200 with `success: false`; configuration and transport failures are 500.

use axum::{
    extract::State,
    http::{header::ORIGIN, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::gateway::{AnalysisError, AnalysisResult};
use crate::analysis::parser::ReplyParseError;
use crate::analysis::policy::ModerationVerdict;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "jobPosting", default)]
    pub job_posting: String,
}

#[derive(Debug, Deserialize)]
pub struct ProxyAnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ModerationVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl AnalyzeResponse {
    pub fn success(result: AnalysisResult) -> Self {
        Self {
            success: true,
            rating: Some(result.rating),
            verdict: Some(result.verdict()),
            feedback: Some(result.feedback),
            error: None,
            kind: None,
        }
    }

    pub fn failure(message: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            success: false,
            rating: None,
            feedback: None,
            verdict: None,
            error: Some(message.into()),
            kind: kind.map(str::to_string),
        }
    }
}

/// Status code and envelope for an analysis failure.
pub fn failure_response(err: &AnalysisError) -> (StatusCode, AnalyzeResponse) {
    let (status, message) = match err {
        AnalysisError::EmptyInput => (StatusCode::BAD_REQUEST, "Missing job listing text".to_string()),
        AnalysisError::ParseFailure {
            reason: ReplyParseError::InvalidRating(_),
            ..
        } => (StatusCode::OK, "Invalid rating received.".to_string()),
        AnalysisError::ParseFailure { .. } => {
            (StatusCode::OK, "Failed to parse AI response.".to_string())
        }
        AnalysisError::BackendUnavailable(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "AI analysis failed".to_string())
        }
        AnalysisError::ConfigurationMissing(name) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{name} is not configured."),
        ),
    };
    (status, AnalyzeResponse::failure(message, Some(err.kind())))
}

/// True when the `Origin` header contains one of the allowed entries.
pub fn origin_allowed(origin: Option<&str>, allowed: &[String]) -> bool {
    match origin {
        Some(origin) => allowed.iter().any(|entry| origin.contains(entry.as_str())),
        None => false,
    }
}

async fn run_analysis(state: &AppState, text: &str) -> (StatusCode, Json<AnalyzeResponse>) {
    match state.gateway.analyze(text).await {
        Ok(result) => (StatusCode::OK, Json(AnalyzeResponse::success(result))),
        Err(err) => {
            let (status, body) = failure_response(&err);
            (status, Json(body))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Rates a concatenated job posting for misleading content.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    run_analysis(&state, &request.job_posting).await
}

/// POST /api/v1/proxy/analyze
///
/// Edge-proxy variant: takes `{ text }` and only serves allow-listed origins.
pub async fn handle_proxy_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ProxyAnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            let (status, body) = failure_response(&AnalysisError::EmptyInput);
            return (status, Json(body));
        }
    };

    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    if !origin_allowed(origin, &state.config.allowed_origins) {
        warn!("Rejected analysis request from origin {origin:?}");
        return (
            StatusCode::FORBIDDEN,
            Json(AnalyzeResponse::failure("Unauthorized origin", None)),
        );
    }

    run_analysis(&state, &text).await
}
