// Prompt constants for the Posting-Analysis Gateway.
// Reuses the turn markers from llm_client::prompts.

use crate::llm_client::prompts::user_turn;

/// Misleading-content rating prompt. Replace `{job_posting}` before sending.
pub const ANALYZE_PROMPT_TEMPLATE: &str = "\
Analyze the following job posting for misleading content. Rate it on a scale of 1 (not misleading) to 5 (very misleading).
Provide a short explanation why it received this rating.

Job Posting:
{job_posting}

Please respond in this format EXACTLY, IN PLAIN TEXT! NO MARKDOWN!:
Rating: [number between 1-5]
Feedback: [your explanation here]";

/// Builds the full raw-completion input for a posting.
pub fn build_analysis_prompt(job_posting: &str) -> String {
    user_turn(&ANALYZE_PROMPT_TEMPLATE.replace("{job_posting}", job_posting))
}
