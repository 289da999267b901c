//! Moderation thresholds applied to an analysis rating.
//!
//! The on-chain contract enforces the same split: 4+ reverts the post,
//! 2–3 posts it with `flaggedAsMisleading = true`, 1 posts it clean.

use serde::{Deserialize, Serialize};

/// First rating that blocks submission.
pub const BLOCK_THRESHOLD: u32 = 4;
/// First rating that flags a posting.
pub const FLAG_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationVerdict {
    Clean,
    Flagged,
    Blocked,
}

impl ModerationVerdict {
    /// Maps a rating onto a verdict. Out-of-scale ratings fall into the
    /// nearest bucket (0 is clean, 6+ is blocked).
    pub fn from_rating(rating: u32) -> Self {
        if rating >= BLOCK_THRESHOLD {
            ModerationVerdict::Blocked
        } else if rating >= FLAG_THRESHOLD {
            ModerationVerdict::Flagged
        } else {
            ModerationVerdict::Clean
        }
    }

    pub fn allows_submission(self) -> bool {
        self != ModerationVerdict::Blocked
    }

    /// Badge colour used on listing cards.
    pub fn badge_color(self) -> &'static str {
        match self {
            ModerationVerdict::Clean => "green",
            ModerationVerdict::Flagged => "yellow",
            ModerationVerdict::Blocked => "red",
        }
    }
}
