pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::posting::handlers as posting;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/analyze", post(analysis::handle_analyze))
        .route(
            "/api/v1/proxy/analyze",
            post(analysis::handle_proxy_analyze),
        )
        // Job catalogue
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route(
            "/api/v1/jobs/:id/applications",
            post(applications::handle_apply),
        )
        // Posting API
        .route("/api/v1/postings/preview", post(posting::handle_preview))
        .route("/api/v1/postings/prepare", post(posting::handle_prepare))
        .with_state(state)
}
