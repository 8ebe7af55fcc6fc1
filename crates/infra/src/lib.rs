//! Infrastructure layer: job storage, schema migrations, configuration.

pub mod config;
pub mod seed;
pub mod store;

pub use config::{ConfigError, Settings, StoreKind, StoreSettings};
pub use store::{InMemoryJobStore, JobStore, PostgresJobStore, StoreError};
