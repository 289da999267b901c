//! Analysis gateway — turns job-posting text into a rating and feedback.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::parser::{parse_reply, ReplyParseError};
use crate::analysis::policy::ModerationVerdict;
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::prompts::END_OF_TURN;
use crate::llm_client::TextGenerator;

/// Outcome of a successful analysis. Only built when both values parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rating: u32,
    pub feedback: String,
}

impl AnalysisResult {
    pub fn verdict(&self) -> ModerationVerdict {
        ModerationVerdict::from_rating(self.rating)
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Job posting text is empty")]
    EmptyInput,

    #[error("Text-generation backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Failed to parse AI response: {reason}")]
    ParseFailure {
        reason: ReplyParseError,
        raw: String,
    },

    #[error("{0} is not configured")]
    ConfigurationMissing(String),
}

impl AnalysisError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "empty_input",
            AnalysisError::BackendUnavailable(_) => "backend_unavailable",
            AnalysisError::ParseFailure { .. } => "parse_failure",
            AnalysisError::ConfigurationMissing(_) => "configuration_missing",
        }
    }
}

/// Cheap to clone; the backend is shared.
#[derive(Clone)]
pub struct AnalysisGateway {
    backend: Option<Arc<dyn TextGenerator>>,
}

impl AnalysisGateway {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A gateway with no backend credential; every non-empty call fails
    /// with `ConfigurationMissing`.
    pub fn unconfigured() -> Self {
        Self { backend: None }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Rates `text` for misleading content. One backend call, no retries.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| AnalysisError::ConfigurationMissing("DEEPINFRA_API_KEY".to_string()))?;

        let prompt = build_analysis_prompt(text);
        let raw = backend
            .generate(&prompt, &[END_OF_TURN])
            .await
            .map_err(|e| {
                warn!("Analysis backend call failed: {e}");
                AnalysisError::BackendUnavailable(e.to_string())
            })?;

        info!("AI response: {raw:?}");

        match parse_reply(&raw) {
            Ok(parsed) => Ok(AnalysisResult {
                rating: parsed.rating,
                feedback: parsed.feedback,
            }),
            Err(reason) => {
                warn!("Failed to parse AI response ({reason}): {raw:?}");
                Err(AnalysisError::ParseFailure { reason, raw })
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedBackend;
    use super::*;

    fn gateway_with(backend: &Arc<ScriptedBackend>) -> AnalysisGateway {
        AnalysisGateway::new(backend.clone())
    }

    #[tokio::test]
    async fn test_analyze_parses_rating_and_feedback() {
        let backend = Arc::new(ScriptedBackend::replying(
            "Rating: 3\nFeedback: Salary range is vague",
        ));
        let result = gateway_with(&backend)
            .analyze("Rust Engineer Acme Remote $1 - $2 Build things")
            .await
            .unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                rating: 3,
                feedback: "Salary range is vague".to_string()
            }
        );
        assert_eq!(result.verdict(), ModerationVerdict::Flagged);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_sends_posting_inside_prompt() {
        let backend = Arc::new(ScriptedBackend::replying("Rating: 1\nFeedback: ok"));
        gateway_with(&backend)
            .analyze("Senior Designer at Globex")
            .await
            .unwrap();
        let sent = backend.last_input.lock().unwrap().clone().unwrap();
        assert!(sent.contains("Senior Designer at Globex"));
        assert!(sent.contains("Rating: [number between 1-5]"));
    }

    #[tokio::test]
    async fn test_analyze_empty_input_makes_no_call() {
        let backend = Arc::new(ScriptedBackend::replying("Rating: 1\nFeedback: ok"));
        let gateway = gateway_with(&backend);
        for text in ["", "   ", "\n\t  \n"] {
            let err = gateway.analyze(text).await.unwrap_err();
            assert!(matches!(err, AnalysisError::EmptyInput));
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_unparseable_reply_is_parse_failure() {
        let backend = Arc::new(ScriptedBackend::replying("I cannot help with that."));
        let err = gateway_with(&backend).analyze("a job").await.unwrap_err();
        match err {
            AnalysisError::ParseFailure { reason, raw } => {
                assert_eq!(reason, ReplyParseError::MissingRating);
                assert_eq!(raw, "I cannot help with that.");
            }
            other => panic!("expected ParseFailure, got {other:?}"),
        }
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_word_rating_is_parse_failure() {
        let backend = Arc::new(ScriptedBackend::replying("Rating: five\nFeedback: bad"));
        let err = gateway_with(&backend).analyze("a job").await.unwrap_err();
        assert_eq!(err.kind(), "parse_failure");
    }

    #[tokio::test]
    async fn test_analyze_backend_failure_is_unavailable() {
        let backend = Arc::new(ScriptedBackend::failing(503));
        let err = gateway_with(&backend).analyze("a job").await.unwrap_err();
        assert!(matches!(err, AnalysisError::BackendUnavailable(_)));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_unconfigured_gateway() {
        let gateway = AnalysisGateway::unconfigured();
        assert!(!gateway.is_configured());
        let err = gateway.analyze("a job").await.unwrap_err();
        assert_eq!(err.kind(), "configuration_missing");
    }

    #[tokio::test]
    async fn test_analyze_unconfigured_still_rejects_empty_first() {
        let err = AnalysisGateway::unconfigured()
            .analyze("  ")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let kinds = [
            AnalysisError::EmptyInput.kind(),
            AnalysisError::BackendUnavailable("x".into()).kind(),
            AnalysisError::ParseFailure {
                reason: ReplyParseError::MissingFeedback,
                raw: String::new(),
            }
            .kind(),
            AnalysisError::ConfigurationMissing("X".into()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
