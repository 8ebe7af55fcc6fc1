use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{Entity, JobId};

use crate::filter::FilterCriteria;
use crate::job_type::JobType;

/// A job posting as stored. Postings are created outside this service and
/// only ever read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: Option<String>,
    pub remote: bool,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for JobPosting {
    type Id = JobId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl JobPosting {
    /// Location shown in the list; postings without one are open anywhere.
    pub fn location_label(&self) -> &str {
        match self.location.as_deref() {
            Some(l) if !l.is_empty() => l,
            _ => "Worldwide",
        }
    }

    /// Whether this posting satisfies every constraint in `criteria`.
    ///
    /// Approval is not checked here; callers select approved postings first.
    pub fn matches(&self, criteria: &FilterCriteria) -> bool {
        if let Some(t) = criteria.job_type() {
            if self.job_type != t {
                return false;
            }
        }
        if let Some(l) = criteria.location() {
            if self.location.as_deref() != Some(l) {
                return false;
            }
        }
        if criteria.remote() && !self.remote {
            return false;
        }
        criteria.query_terms().all(|term| self.mentions(term))
    }

    fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.title.as_str()),
            Some(self.company.as_str()),
            Some(self.job_type.as_str()),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Listing order: most recent first, ties broken by identifier (descending).
pub fn newest_first(a: &JobPosting, b: &JobPosting) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

/// Approved postings matching `criteria`, newest first.
pub fn select_listing<'a, I>(postings: I, criteria: &FilterCriteria) -> Vec<JobPosting>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    let mut selected: Vec<JobPosting> = postings
        .into_iter()
        .filter(|p| p.approved && p.matches(criteria))
        .cloned()
        .collect();
    selected.sort_by(newest_first);
    selected
}

/// Human-readable age of a posting relative to `now`, e.g. `"3 days ago"`.
pub fn posted_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created_at);
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }

    let (n, unit) = match minutes {
        m if m < 60 => (m, "minute"),
        m if m < 60 * 24 => (m / 60, "hour"),
        m if m < 60 * 24 * 30 => (m / (60 * 24), "day"),
        m if m < 60 * 24 * 365 => (m / (60 * 24 * 30), "month"),
        m => (m / (60 * 24 * 365), "year"),
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} ago")
}
