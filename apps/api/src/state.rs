use std::sync::Arc;

use crate::analysis::gateway::AnalysisGateway;
use crate::config::Config;
use crate::jobs::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Posting-analysis gateway. Unconfigured when DEEPINFRA_API_KEY is unset.
    pub gateway: AnalysisGateway,
    /// Read-only listing catalogue, loaded once at startup.
    pub jobs: Arc<JobStore>,
}
