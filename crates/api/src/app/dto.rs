use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use jobboard_listings::{FilterCriteria, JobPosting, LocationSet, posted_ago};

// -------------------------
// Response mapping helpers
// -------------------------

pub fn posting_to_json(posting: &JobPosting, now: DateTime<Utc>) -> Value {
    json!({
        "id": posting.id.to_string(),
        "title": posting.title,
        "company": posting.company,
        "type": posting.job_type.as_str(),
        "location": posting.location,
        "remote": posting.remote,
        "created_at": posting.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "posted": posted_ago(posting.created_at, now),
    })
}

pub fn listing_to_json(postings: &[JobPosting], criteria: &FilterCriteria, now: DateTime<Utc>) -> Value {
    let items = postings
        .iter()
        .map(|p| posting_to_json(p, now))
        .collect::<Vec<_>>();
    json!({
        "items": items,
        "count": postings.len(),
        "filter": criteria,
        "query_string": criteria.to_query_string(),
    })
}

pub fn locations_to_json(locations: &LocationSet) -> Value {
    json!({ "items": locations })
}
