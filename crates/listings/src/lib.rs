//! Job listings domain module.
//!
//! Business rules for the job board, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage): the fixed set of job types,
//! the posting record, visitor filter criteria and the distinct-location set
//! offered by the filter sidebar.

pub mod filter;
pub mod job_type;
pub mod locations;
pub mod posting;

pub use filter::{FilterCriteria, RawFilterForm};
pub use job_type::JobType;
pub use locations::LocationSet;
pub use posting::{JobPosting, newest_first, posted_ago, select_listing};
