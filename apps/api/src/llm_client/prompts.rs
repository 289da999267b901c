// Cross-cutting prompt fragments for the DeepSeek chat format.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Opens a user turn in the DeepSeek-V3 raw-completion format.
pub const USER_TURN_OPEN: &str = "<\u{ff5c}begin\u{2581}of\u{2581}sentence\u{ff5c}><\u{ff5c}User\u{ff5c}>: ";

/// Hands the turn to the model.
pub const ASSISTANT_TURN_OPEN: &str = "<\u{ff5c}Assistant\u{ff5c}>:";

/// End-of-turn marker passed as the stop sequence.
pub const END_OF_TURN: &str = "</s>";

/// Wraps a user message in the chat turn markers.
pub fn user_turn(message: &str) -> String {
    format!("{USER_TURN_OPEN}{message}\n\n{ASSISTANT_TURN_OPEN}")
}
