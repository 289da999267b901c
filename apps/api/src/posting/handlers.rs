//! Axum route handlers for the Posting API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::models::JobCard;
use crate::posting::draft::{preview, JobDraft};
use crate::posting::prepare::{prepare_posting, PreparedPosting};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub draft_id: u32,
    pub jobs: Vec<JobCard>,
}

/// POST /api/v1/postings/preview
///
/// Returns the catalogue with the draft inserted, as the board would show it.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Json<PreviewResponse> {
    let now = Utc::now();
    let (draft_id, listings) = preview(&draft, &state.jobs, now.date_naive());
    Json(PreviewResponse {
        draft_id,
        jobs: listings
            .into_iter()
            .map(|job| JobCard::new(job, now))
            .collect(),
    })
}

/// POST /api/v1/postings/prepare
///
/// Analyses the draft and, unless the verdict blocks it, returns the
/// `postJob` arguments for the wallet to submit.
pub async fn handle_prepare(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<Json<PreparedPosting>, AppError> {
    let prepared = prepare_posting(
        &draft,
        &state.gateway,
        state.config.job_board_address.as_deref(),
    )
    .await?;
    Ok(Json(prepared))
}
