use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::applications::validation::{validate_application, JobApplication};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub job_id: u32,
    pub job_title: String,
    pub applicant: String,
    pub status: &'static str,
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<u32>,
    Json(application): Json<JobApplication>,
) -> Result<(StatusCode, Json<ApplicationReceipt>), AppError> {
    let job = state
        .jobs
        .get(job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let validation = validate_application(&application);
    if !validation.passed {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&validation).unwrap_or_default(),
        ));
    }

    info!(
        "Application received for job {} ({})",
        job.id, job.title
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplicationReceipt {
            job_id: job.id,
            job_title: job.title.clone(),
            applicant: format!(
                "{} {}",
                application.first_name.trim(),
                application.last_name.trim()
            ),
            status: "received",
        }),
    ))
}
