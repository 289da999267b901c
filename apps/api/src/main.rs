mod analysis;
mod applications;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod posting;
mod routes;
mod state;

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::gateway::AnalysisGateway;
use crate::config::Config;
use crate::jobs::store::JobStore;
use crate::llm_client::LlmClient;
use crate::posting::prepare::is_valid_address;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Stakeboard API v{}", env!("CARGO_PKG_VERSION"));

    // Job catalogue
    let jobs = match &config.jobs_data_path {
        Some(path) => JobStore::load(path)?,
        None => JobStore::bundled()?,
    };
    info!("Job catalogue ready ({} listings)", jobs.len());

    // Analysis gateway
    let gateway = match &config.deepinfra_api_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                config.model_url.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )
            .context("Failed to build HTTP client")?;
            info!(
                "LLM client initialized (model: {}, key: {}..., timeout: {}s)",
                llm.model_url(),
                key.chars().take(4).collect::<String>(),
                config.llm_timeout_secs
            );
            AnalysisGateway::new(Arc::new(llm))
        }
        None => {
            warn!("DEEPINFRA_API_KEY is not set; analysis requests will fail");
            AnalysisGateway::unconfigured()
        }
    };

    match config.job_board_address.as_deref() {
        Some(address) if !is_valid_address(address) => {
            bail!("JOB_BOARD_ADDRESS '{address}' is not a valid contract address")
        }
        Some(address) => info!("Job board contract: {address}"),
        None => warn!("JOB_BOARD_ADDRESS is not set; posting preparation will fail"),
    }

    let state = AppState {
        config: config.clone(),
        gateway,
        jobs: Arc::new(jobs),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
