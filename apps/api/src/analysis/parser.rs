//! Reply parser — extracts `Rating: N` and `Feedback: ...` from a raw completion.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Only spaces and tabs may follow a label; a value never comes from the next line.
static RATING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Rating:[ \t]*([0-9]+)").unwrap());
static RATING_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Rating:[ \t]*(\S*)").unwrap());
static FEEDBACK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Feedback:[ \t]*(.*)").unwrap());

/// Why a completion could not be turned into an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyParseError {
    #[error("no 'Rating:' line with an integer")]
    MissingRating,

    #[error("invalid rating value '{0}'")]
    InvalidRating(String),

    #[error("no 'Feedback:' line")]
    MissingFeedback,

    #[error("'Feedback:' line is empty")]
    EmptyFeedback,
}

/// The two values extracted from a well-formed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub rating: u32,
    pub feedback: String,
}

/// Parses the first `Rating:` and first `Feedback:` line of a completion.
///
/// The rating is not clamped to 1–5. Feedback is a single line, trimmed;
/// an empty capture fails.
pub fn parse_reply(raw: &str) -> Result<ParsedReply, ReplyParseError> {
    let rating = match RATING_LINE.captures(raw) {
        Some(caps) => caps[1]
            .parse::<u32>()
            .map_err(|_| ReplyParseError::InvalidRating(caps[1].to_string()))?,
        None => {
            // Label present with a non-integer value is a different failure.
            return Err(match RATING_LABEL.captures(raw) {
                Some(caps) if !caps[1].is_empty() => {
                    ReplyParseError::InvalidRating(caps[1].to_string())
                }
                _ => ReplyParseError::MissingRating,
            });
        }
    };

    let feedback = FEEDBACK_LINE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .ok_or(ReplyParseError::MissingFeedback)?;

    if feedback.is_empty() {
        return Err(ReplyParseError::EmptyFeedback);
    }

    Ok(ParsedReply { rating, feedback })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let parsed = parse_reply("Rating: 3\nFeedback: Salary range is vague").unwrap();
        assert_eq!(parsed.rating, 3);
        assert_eq!(parsed.feedback, "Salary range is vague");
    }

    #[test]
    fn test_parse_reply_with_preamble_and_trailing_text() {
        let raw = " Sure.\n\nRating: 5\nFeedback: Entry-level role asking for 10+ years.\nHope this helps!";
        let parsed = parse_reply(raw).unwrap();
        assert_eq!(parsed.rating, 5);
        assert_eq!(parsed.feedback, "Entry-level role asking for 10+ years.");
    }

    #[test]
    fn test_parse_takes_first_match_only() {
        let raw = "Rating: 2\nFeedback: first\nRating: 5\nFeedback: second";
        let parsed = parse_reply(raw).unwrap();
        assert_eq!(parsed.rating, 2);
        assert_eq!(parsed.feedback, "first");
    }

    #[test]
    fn test_parse_feedback_before_rating() {
        let parsed = parse_reply("Feedback: looks honest\nRating: 1").unwrap();
        assert_eq!(parsed.rating, 1);
        assert_eq!(parsed.feedback, "looks honest");
    }

    #[test]
    fn test_parse_trims_carriage_return() {
        let parsed = parse_reply("Rating: 1\r\nFeedback: clear posting\r\n").unwrap();
        assert_eq!(parsed.feedback, "clear posting");
    }

    #[test]
    fn test_parse_no_matching_lines() {
        assert_eq!(
            parse_reply("I cannot help with that."),
            Err(ReplyParseError::MissingRating)
        );
    }

    #[test]
    fn test_parse_word_rating_is_invalid() {
        assert_eq!(
            parse_reply("Rating: five\nFeedback: bad"),
            Err(ReplyParseError::InvalidRating("five".to_string()))
        );
    }

    #[test]
    fn test_parse_overflowing_rating_is_invalid() {
        let err = parse_reply("Rating: 99999999999999999999\nFeedback: x").unwrap_err();
        assert!(matches!(err, ReplyParseError::InvalidRating(_)));
    }

    #[test]
    fn test_parse_rating_not_clamped() {
        let parsed = parse_reply("Rating: 7\nFeedback: off the scale").unwrap();
        assert_eq!(parsed.rating, 7);
    }

    #[test]
    fn test_parse_missing_feedback() {
        assert_eq!(
            parse_reply("Rating: 4"),
            Err(ReplyParseError::MissingFeedback)
        );
    }

    #[test]
    fn test_parse_empty_feedback() {
        assert_eq!(
            parse_reply("Rating: 4\nFeedback:   "),
            Err(ReplyParseError::EmptyFeedback)
        );
    }

    #[test]
    fn test_parse_empty_feedback_does_not_borrow_next_line() {
        assert_eq!(
            parse_reply("Rating: 4\nFeedback:\nHope this helps!"),
            Err(ReplyParseError::EmptyFeedback)
        );
        assert_eq!(
            parse_reply("Feedback:\nRating: 2"),
            Err(ReplyParseError::EmptyFeedback)
        );
    }

    #[test]
    fn test_parse_rating_value_on_next_line_fails() {
        assert_eq!(
            parse_reply("Rating:\n3\nFeedback: x"),
            Err(ReplyParseError::MissingRating)
        );
    }

    #[test]
    fn test_parse_tab_after_label() {
        let parsed = parse_reply("Rating:\t2\nFeedback:\tVague benefits").unwrap();
        assert_eq!(parsed.rating, 2);
        assert_eq!(parsed.feedback, "Vague benefits");
    }

    #[test]
    fn test_parse_markdown_bold_label_fails() {
        // "**Rating:** 3" leaves "**" between the label and the digit.
        let err = parse_reply("**Rating:** 3\n**Feedback:** fine").unwrap_err();
        assert!(matches!(err, ReplyParseError::InvalidRating(_)));
    }
}
