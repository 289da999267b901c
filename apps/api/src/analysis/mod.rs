// Posting-Analysis Gateway: rates job-posting text for misleading content.
// All backend calls go through llm_client; this module owns the prompt,
// the reply parsing and the moderation thresholds.

pub mod gateway;
pub mod handlers;
pub mod parser;
pub mod policy;
pub mod prompts;
