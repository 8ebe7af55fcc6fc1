//! Demo postings for the in-memory store.

use chrono::{DateTime, Duration, Utc};

use jobboard_core::JobId;
use jobboard_listings::{JobPosting, JobType};

use crate::store::{InMemoryJobStore, StoreError};

/// A small, varied set of postings relative to `now`: several types,
/// remote and on-site roles, one posting without a location and one that is
/// still awaiting approval.
pub fn demo_postings(now: DateTime<Utc>) -> Vec<JobPosting> {
    let rows: [(&str, &str, JobType, Option<&str>, bool, bool, i64); 8] = [
        ("Senior Rust Engineer", "Ferrous Systems", JobType::FullTime, Some("Berlin, Germany"), true, true, 2),
        ("Data Analyst", "Microsoft", JobType::Temporary, Some("Redmond, Washington, United States"), false, true, 26),
        ("Frontend Developer", "Vercel", JobType::Contract, None, true, true, 50),
        ("Site Reliability Engineer", "Cloudflare", JobType::FullTime, Some("Austin, Texas, United States"), false, true, 120),
        ("Open Source Maintainer", "Rust Foundation", JobType::Volunteer, None, true, true, 300),
        ("Backend Intern", "Shopify", JobType::Internship, Some("Ottawa, Ontario, Canada"), false, true, 700),
        ("Support Engineer", "Microsoft", JobType::PartTime, Some("Redmond, Washington, United States"), false, true, 1500),
        ("Platform Engineer", "Unlisted Ltd", JobType::FullTime, Some("Lisbon, Portugal"), true, false, 1),
    ];

    rows.into_iter()
        .map(|(title, company, job_type, location, remote, approved, hours_ago)| JobPosting {
            id: JobId::new(),
            title: title.to_string(),
            company: company.to_string(),
            job_type,
            location: location.map(str::to_string),
            remote,
            approved,
            created_at: now - Duration::hours(hours_ago),
        })
        .collect()
}

/// Insert [`demo_postings`] into `store`.
pub fn seed_demo_data(store: &InMemoryJobStore, now: DateTime<Utc>) -> Result<usize, StoreError> {
    let postings = demo_postings(now);
    let count = postings.len();
    for posting in postings {
        store.insert(posting)?;
    }
    tracing::info!(count, "seeded in-memory job store");
    Ok(count)
}
