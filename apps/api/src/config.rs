use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL_URL;

/// Application configuration loaded from environment variables.
///
/// The DeepInfra key and the contract address are optional at startup: the
/// endpoints that need them report `ConfigurationMissing` per request instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepinfra_api_key: Option<String>,
    pub model_url: String,
    pub llm_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    pub job_board_address: Option<String>,
    /// Overrides the bundled listing file when set.
    pub jobs_data_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            deepinfra_api_key: optional_env("DEEPINFRA_API_KEY"),
            model_url: std::env::var("DEEPINFRA_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "localhost,your-domain.com".to_string()),
            ),
            job_board_address: optional_env("JOB_BOARD_ADDRESS"),
            jobs_data_path: optional_env("JOBS_DATA_PATH"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        deepinfra_api_key: Some("test-key".to_string()),
        model_url: DEFAULT_MODEL_URL.to_string(),
        llm_timeout_secs: 5,
        allowed_origins: vec!["localhost".to_string(), "your-domain.com".to_string()],
        job_board_address: Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string()),
        jobs_data_path: None,
        port: 8080,
        rust_log: "info".to_string(),
    }
}
