// Job applications submitted from a listing's apply page.
// Validated and acknowledged; nothing is persisted.

pub mod handlers;
pub mod validation;
