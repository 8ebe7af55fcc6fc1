use core::str::FromStr;

use serde::{Deserialize, Serialize};

use jobboard_core::DomainError;

/// Employment type of a posting.
///
/// The label is what the sidebar shows, what travels in the query string and
/// what the `jobs.job_type` column stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Temporary,
    Volunteer,
    Internship,
}

impl JobType {
    /// Every job type, in sidebar order.
    pub const ALL: [JobType; 6] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Temporary,
        JobType::Volunteer,
        JobType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::Volunteer => "Volunteer",
            JobType::Internship => "Internship",
        }
    }

    fn expected_labels() -> String {
        Self::ALL.iter().map(JobType::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl core::fmt::Display for JobType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "type: unknown job type `{s}` (expected one of: {})",
                    Self::expected_labels()
                ))
            })
    }
}
