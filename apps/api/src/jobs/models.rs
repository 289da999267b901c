use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::policy::ModerationVerdict;

/// A single job listing as stored in the listing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary_range: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub posted_date: Option<NaiveDate>,
    #[serde(default)]
    pub employer_response_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
}

impl JobListing {
    /// The logo URL, if one is set and non-blank.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Moderation bucket of the listing's AI rating. Unrated listings are
    /// clean (green badge), not red.
    pub fn verdict(&self) -> ModerationVerdict {
        ModerationVerdict::from_rating(self.rating.unwrap_or(0))
    }

    pub fn matches(&self, query: &JobQuery) -> bool {
        if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = [&self.title, &self.company, &self.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }

        if let Some(job_type) = query.job_type.as_deref().filter(|t| !t.trim().is_empty()) {
            if !self.job_type.eq_ignore_ascii_case(job_type.trim()) {
                return false;
            }
        }

        if let Some(location) = query.location.as_deref().filter(|l| !l.trim().is_empty()) {
            if !self
                .location
                .to_lowercase()
                .contains(&location.trim().to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

/// Query-string filters for the listing endpoint. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
}

/// A listing plus the derived fields a job card shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    #[serde(flatten)]
    pub listing: JobListing,
    pub posted_ago: String,
    pub verdict: ModerationVerdict,
    pub badge: &'static str,
    pub has_image: bool,
}

impl JobCard {
    pub fn new(listing: JobListing, now: DateTime<Utc>) -> Self {
        let posted_ago = listing
            .posted_date
            .map(|date| time_ago(date, now))
            .unwrap_or_else(|| "N/A".to_string());
        let verdict = listing.verdict();
        Self {
            has_image: listing.image_url().is_some(),
            posted_ago,
            verdict,
            badge: verdict.badge_color(),
            listing,
        }
    }
}

const SECONDS_IN_DAY: i64 = 60 * 60 * 24;
const SECONDS_IN_WEEK: i64 = SECONDS_IN_DAY * 7;
const SECONDS_IN_MONTH: i64 = SECONDS_IN_DAY * 30;
const SECONDS_IN_YEAR: i64 = SECONDS_IN_DAY * 365;

/// Coarse "time ago" label measured from midnight UTC of `posted`.
pub fn time_ago(posted: NaiveDate, now: DateTime<Utc>) -> String {
    let posted_at = posted.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let Some(posted_at) = posted_at else {
        return "N/A".to_string();
    };
    let diff = (now - posted_at).num_seconds();

    if diff < SECONDS_IN_DAY {
        "Today".to_string()
    } else if diff < SECONDS_IN_WEEK {
        format!("{}d ago", diff / SECONDS_IN_DAY)
    } else if diff < SECONDS_IN_MONTH {
        format!("{}w ago", diff / SECONDS_IN_WEEK)
    } else if diff < SECONDS_IN_YEAR {
        format!("{}mo ago", diff / SECONDS_IN_MONTH)
    } else {
        format!("{}y ago", diff / SECONDS_IN_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn listing() -> JobListing {
        serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Rust Engineer",
                "company": "Acme",
                "location": "Remote (EU)",
                "type": "Full-time",
                "salaryRange": "$100,000 - $150,000",
                "description": "Build indexers",
                "image": "  ",
                "postedDate": "2025-02-01",
                "employerResponseTime": null,
                "rating": 3
            }"#,
        )
        .unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_listing_deserializes_camel_case() {
        let job = listing();
        assert_eq!(job.job_type, "Full-time");
        assert_eq!(job.salary_range, "$100,000 - $150,000");
        assert_eq!(job.posted_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(job.rating, Some(3));
    }

    #[test]
    fn test_listing_optional_fields_default() {
        let job: JobListing = serde_json::from_str(
            r#"{"id":1,"title":"t","company":"c","location":"l","type":"Contract","salaryRange":"s","description":"d"}"#,
        )
        .unwrap();
        assert!(job.image.is_none());
        assert!(job.posted_date.is_none());
        assert!(job.rating.is_none());
        assert_eq!(job.verdict(), ModerationVerdict::Clean);
    }

    #[test]
    fn test_blank_image_is_no_image() {
        assert!(listing().image_url().is_none());
    }

    #[test]
    fn test_matches_text_query_case_insensitive() {
        let job = listing();
        let query = JobQuery {
            q: Some("INDEXERS".to_string()),
            ..Default::default()
        };
        assert!(job.matches(&query));
        let miss = JobQuery {
            q: Some("designer".to_string()),
            ..Default::default()
        };
        assert!(!job.matches(&miss));
    }

    #[test]
    fn test_matches_type_exactly() {
        let job = listing();
        let hit = JobQuery {
            job_type: Some("full-time".to_string()),
            ..Default::default()
        };
        let miss = JobQuery {
            job_type: Some("Full".to_string()),
            ..Default::default()
        };
        assert!(job.matches(&hit));
        assert!(!job.matches(&miss));
    }

    #[test]
    fn test_matches_location_substring() {
        let query = JobQuery {
            location: Some("remote".to_string()),
            ..Default::default()
        };
        assert!(listing().matches(&query));
    }

    #[test]
    fn test_blank_filters_match_everything() {
        let query = JobQuery {
            q: Some("  ".to_string()),
            job_type: Some(String::new()),
            location: None,
        };
        assert!(listing().matches(&query));
    }

    #[test]
    fn test_time_ago_buckets() {
        let posted = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(time_ago(posted, noon(2025, 1, 1)), "Today");
        assert_eq!(time_ago(posted, noon(2025, 1, 4)), "3d ago");
        assert_eq!(time_ago(posted, noon(2025, 1, 16)), "2w ago");
        assert_eq!(time_ago(posted, noon(2025, 3, 15)), "2mo ago");
        assert_eq!(time_ago(posted, noon(2027, 1, 2)), "2y ago");
    }

    #[test]
    fn test_time_ago_future_date_is_today() {
        let posted = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(time_ago(posted, noon(2025, 1, 1)), "Today");
    }

    #[test]
    fn test_unrated_card_gets_green_badge() {
        let mut unrated = listing();
        unrated.rating = None;
        let card = JobCard::new(unrated, noon(2025, 2, 3));
        assert_eq!(card.verdict, ModerationVerdict::Clean);
        assert_eq!(card.badge, "green");
    }

    #[test]
    fn test_card_derived_fields() {
        let card = JobCard::new(listing(), noon(2025, 2, 3));
        assert_eq!(card.posted_ago, "2d ago");
        assert_eq!(card.verdict, ModerationVerdict::Flagged);
        assert_eq!(card.badge, "yellow");
        assert!(!card.has_image);

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["salaryRange"], "$100,000 - $150,000");
        assert_eq!(json["postedAgo"], "2d ago");
    }

    #[test]
    fn test_card_without_date() {
        let mut job = listing();
        job.posted_date = None;
        assert_eq!(JobCard::new(job, noon(2025, 2, 3)).posted_ago, "N/A");
    }
}
