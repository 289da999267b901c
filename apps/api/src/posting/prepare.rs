//! Prepares the arguments of the on-chain `postJob` call.
//!
//! The wallet makes the call; this only decides whether the posting may go
//! ahead and packages `postJob(title, description, aiRating, stakeAmount)`.

use serde::Serialize;
use tracing::info;

use crate::analysis::gateway::{AnalysisError, AnalysisGateway, AnalysisResult};
use crate::analysis::policy::ModerationVerdict;
use crate::errors::AppError;
use crate::posting::draft::JobDraft;
use crate::posting::stake::{format_ether, parse_stake};

pub const BLOCKED_MESSAGE: &str = "Job posting deemed misleading. Please revise.";

/// Arguments for `JobBoard.postJob`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobCall {
    pub contract_address: String,
    pub title: String,
    pub description: String,
    pub ai_rating: u8,
    /// uint256 as a decimal string; JSON numbers cannot hold it.
    pub stake_amount_wei: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedPosting {
    pub analysis: AnalysisResult,
    pub verdict: ModerationVerdict,
    pub stake_amount_eth: String,
    pub call: PostJobCall,
}

/// True for a `0x`-prefixed 20-byte hex address.
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Checks the draft and stake locally, then analyses the posting and builds
/// the contract call unless the verdict blocks it.
pub async fn prepare_posting(
    draft: &JobDraft,
    gateway: &AnalysisGateway,
    contract_address: Option<&str>,
) -> Result<PreparedPosting, AppError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing or invalid fields: {}",
            missing.join(", ")
        )));
    }

    let stake_wei = parse_stake(&draft.stake_amount)?;

    let contract_address = contract_address
        .ok_or_else(|| AnalysisError::ConfigurationMissing("JOB_BOARD_ADDRESS".to_string()))?;

    let analysis = gateway.analyze(&draft.posting_text()).await?;
    let verdict = analysis.verdict();

    if !verdict.allows_submission() {
        info!("Blocked posting '{}' with rating {}", draft.title, analysis.rating);
        return Err(AppError::UnprocessableEntity(format!(
            "{BLOCKED_MESSAGE} Feedback: {}",
            analysis.feedback
        )));
    }

    let ai_rating = u8::try_from(analysis.rating)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("rating {} exceeds u8", analysis.rating)))?;

    Ok(PreparedPosting {
        verdict,
        stake_amount_eth: format_ether(stake_wei),
        call: PostJobCall {
            contract_address: contract_address.to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            ai_rating,
            stake_amount_wei: stake_wei.to_string(),
        },
        analysis,
    })
}
