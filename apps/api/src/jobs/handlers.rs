use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::models::{JobCard, JobQuery};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobCard>,
    pub total: usize,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Json<JobListResponse> {
    let now = Utc::now();
    let jobs: Vec<JobCard> = state
        .jobs
        .search(&query)
        .into_iter()
        .map(|job| JobCard::new(job, now))
        .collect();
    Json(JobListResponse {
        total: jobs.len(),
        jobs,
    })
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<JobCard>, AppError> {
    let job = state
        .jobs
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(JobCard::new(job, Utc::now())))
}
