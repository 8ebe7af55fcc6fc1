//! Read-only access to job postings.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryJobStore;
pub use postgres::PostgresJobStore;

use std::sync::Arc;

use thiserror::Error;

use jobboard_listings::{FilterCriteria, JobPosting, LocationSet};

/// Store operation error.
///
/// Both variants are terminal for the current request; nothing retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not complete the query.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row does not map onto a [`JobPosting`].
    #[error("invalid stored row: {0}")]
    Decode(String),
}

/// The two queries the job board needs from persistence, plus a readiness check.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    /// Every approved posting, newest first.
    async fn find_approved(&self) -> Result<Vec<JobPosting>, StoreError> {
        self.find_approved_matching(&FilterCriteria::default()).await
    }

    /// Approved postings satisfying `criteria`, newest first (ties by id, descending).
    async fn find_approved_matching(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<JobPosting>, StoreError>;

    /// Distinct non-empty locations across approved postings.
    async fn find_distinct_approved_locations(&self) -> Result<LocationSet, StoreError>;

    /// Cheap round-trip used by the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> JobStore for Arc<S>
where
    S: JobStore + ?Sized,
{
    async fn find_approved(&self) -> Result<Vec<JobPosting>, StoreError> {
        (**self).find_approved().await
    }

    async fn find_approved_matching(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<JobPosting>, StoreError> {
        (**self).find_approved_matching(criteria).await
    }

    async fn find_distinct_approved_locations(&self) -> Result<LocationSet, StoreError> {
        (**self).find_distinct_approved_locations().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
