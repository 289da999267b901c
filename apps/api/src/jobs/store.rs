use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::jobs::models::{JobListing, JobQuery};

/// Listing file compiled into the binary.
const BUNDLED_JOBS: &str = include_str!("../../data/jobs.json");

/// Read-only job catalogue, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    listings: Vec<JobListing>,
}

impl JobStore {
    /// Loads the bundled listing file.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_JOBS).context("Bundled jobs.json is invalid")
    }

    /// Loads a listing file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job listings from {}", path.display()))?;
        let store = Self::from_json(&raw)
            .with_context(|| format!("Invalid job listings in {}", path.display()))?;
        info!("Loaded {} job listings from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let listings: Vec<JobListing> = serde_json::from_str(raw)?;
        Self::from_listings(listings)
    }

    /// Builds a store, rejecting duplicate ids and ids that leave no room
    /// for a newly posted listing.
    pub fn from_listings(listings: Vec<JobListing>) -> Result<Self> {
        let mut seen = HashSet::new();
        for job in &listings {
            if job.id == u32::MAX {
                bail!("Job id {} is reserved", job.id);
            }
            if !seen.insert(job.id) {
                bail!("Duplicate job id {}", job.id);
            }
        }
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn all(&self) -> &[JobListing] {
        &self.listings
    }

    pub fn get(&self, id: u32) -> Option<&JobListing> {
        self.listings.iter().find(|job| job.id == id)
    }

    /// Id the next posted listing would receive.
    pub fn next_id(&self) -> u32 {
        // from_listings rejects u32::MAX, so this never saturates.
        self.listings
            .iter()
            .map(|job| job.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Listings matching `query`, newest first.
    pub fn search(&self, query: &JobQuery) -> Vec<JobListing> {
        let mut hits: Vec<JobListing> = self
            .listings
            .iter()
            .filter(|job| job.matches(query))
            .cloned()
            .collect();
        sort_newest_first(&mut hits);
        hits
    }
}

/// Stable sort by `posted_date` descending; undated listings go last.
pub fn sort_newest_first(listings: &mut [JobListing]) {
    listings.sort_by(|a, b| match (a.posted_date, b.posted_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
