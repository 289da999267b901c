use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::jobs::models::JobListing;
use crate::jobs::store::{sort_newest_first, JobStore};

fn default_job_type() -> String {
    "Full-time".to_string()
}

/// Job types offered by the posting form.
pub const JOB_TYPES: &[&str] = &["Full-time", "Part-time", "Contract"];

/// State of the job-posting form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: String,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    pub description: String,
    pub stake_amount: String,
}

impl JobDraft {
    /// Text sent for analysis: the descriptive fields, one per line.
    pub fn posting_text(&self) -> String {
        [
            &self.title,
            &self.company,
            &self.location,
            &self.salary_range,
            &self.description,
        ]
        .iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }

    /// Names of required fields that are blank, plus an unknown job type.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let required = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("salaryRange", &self.salary_range),
            ("description", &self.description),
            ("stakeAmount", &self.stake_amount),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if !JOB_TYPES.contains(&self.job_type.as_str()) {
            missing.push("jobType");
        }
        missing
    }

    /// Renders the draft as a listing for the live preview. Blank fields
    /// show placeholders.
    pub fn to_listing(&self, id: u32, today: NaiveDate) -> JobListing {
        JobListing {
            id,
            title: or_placeholder(&self.title, "Job Title"),
            company: or_placeholder(&self.company, "Company Name"),
            location: or_placeholder(&self.location, "Location"),
            job_type: self.job_type.clone(),
            salary_range: or_placeholder(&self.salary_range, "Salary Range"),
            description: self.description.clone(),
            image: None,
            posted_date: Some(today),
            employer_response_time: None,
            rating: None,
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// The catalogue with the draft merged in, newest first.
pub fn preview(draft: &JobDraft, store: &JobStore, today: NaiveDate) -> (u32, Vec<JobListing>) {
    let draft_id = store.next_id();
    let mut listings = Vec::with_capacity(store.len() + 1);
    listings.push(draft.to_listing(draft_id, today));
    listings.extend(store.all().iter().cloned());
    sort_newest_first(&mut listings);
    (draft_id, listings)
}
