//! Askama page templates and the view models they render.

use askama::Template;
use chrono::{DateTime, Utc};

use jobboard_listings::{FilterCriteria, JobPosting, JobType, LocationSet, posted_ago};

/// One `<option>` in a sidebar `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// A posting as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub job_type: &'static str,
    pub location: String,
    pub remote: bool,
    pub posted: String,
}

impl JobCard {
    fn new(posting: &JobPosting, now: DateTime<Utc>) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            job_type: posting.job_type.as_str(),
            location: posting.location_label().to_string(),
            remote: posting.remote,
            posted: posted_ago(posting.created_at, now),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub jobs: Vec<JobCard>,
    pub job_types: Vec<SelectOption>,
    pub locations: Vec<SelectOption>,
    pub query: String,
    pub remote: bool,
    pub filtered: bool,
}

impl IndexPage {
    /// Sidebar pre-populated from `criteria`; the list holds `postings` as given.
    pub fn new(
        postings: &[JobPosting],
        locations: &LocationSet,
        criteria: &FilterCriteria,
        now: DateTime<Utc>,
    ) -> Self {
        let job_types = JobType::ALL
            .iter()
            .map(|t| SelectOption {
                value: t.as_str().to_string(),
                selected: criteria.job_type() == Some(*t),
            })
            .collect();

        let locations = locations
            .iter()
            .map(|l| SelectOption {
                value: l.to_string(),
                selected: criteria.location() == Some(l),
            })
            .collect();

        Self {
            jobs: postings.iter().map(|p| JobCard::new(p, now)).collect(),
            job_types,
            locations,
            query: criteria.query().unwrap_or_default().to_string(),
            remote: criteria.remote(),
            filtered: !criteria.is_empty(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub title: String,
    pub message: String,
}
