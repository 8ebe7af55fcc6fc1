//! Postgres-backed job store.
//!
//! Reads the `jobs` table created by the embedded migrations.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | `ColumnDecode`, `Decode`, `ColumnNotFound` | `Decode` | Row shape does not match `JobPosting` |
//! | `PoolTimedOut`, `PoolClosed`, `Io`, `Tls`, `Database`, other | `Unavailable` | Query could not complete |

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{Span, field, instrument};

use jobboard_core::JobId;
use jobboard_listings::{FilterCriteria, JobPosting, JobType, LocationSet};

use super::{JobStore, StoreError};
use crate::config::StoreSettings;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Postgres-backed job store.
///
/// Uses a SQLx connection pool, which is `Send + Sync`, so one store is
/// shared by every request handler.
#[derive(Debug, Clone)]
pub struct PostgresJobStore {
    pool: Arc<PgPool>,
}

impl PostgresJobStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool from settings, applying migrations when configured.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        let url = settings.database_url.as_deref().ok_or_else(|| {
            StoreError::Unavailable("store.database_url is not configured".to_string())
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        tracing::debug!("connected to postgres");

        let store = Self::new(pool);
        if settings.run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR
            .run(&*self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))?;
        tracing::info!("job store migrations applied");
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: uuid::Uuid,
    title: String,
    company: String,
    job_type: String,
    location: Option<String>,
    remote: bool,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for JobPosting {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let job_type: JobType = row
            .job_type
            .parse()
            .map_err(|_| StoreError::Decode(format!("job {}: unknown job_type `{}`", row.id, row.job_type)))?;

        Ok(JobPosting {
            id: JobId::from_uuid(row.id),
            title: row.title,
            company: row.company,
            job_type,
            location: row.location,
            remote: row.remote,
            approved: row.approved,
            created_at: row.created_at,
        })
    }
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait::async_trait]
impl JobStore for PostgresJobStore {
    #[instrument(skip(self), fields(operation = field::Empty, row_count = field::Empty), err)]
    async fn find_approved_matching(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let span = Span::current();
        span.record("operation", "find_approved_matching");

        let terms: Vec<String> = criteria.query_terms().map(contains_pattern).collect();

        // Every search term must hit at least one text column.
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT
                id,
                title,
                company,
                job_type,
                location,
                remote,
                approved,
                created_at
            FROM jobs
            WHERE approved = TRUE
                AND ($1::text IS NULL OR job_type = $1)
                AND ($2::text IS NULL OR location = $2)
                AND (NOT $3::bool OR remote = TRUE)
                AND NOT EXISTS (
                    SELECT 1
                    FROM unnest($4::text[]) AS term
                    WHERE NOT (
                        title ILIKE term
                        OR company ILIKE term
                        OR job_type ILIKE term
                        OR COALESCE(location, '') ILIKE term
                    )
                )
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(criteria.job_type().map(|t| t.as_str()))
        .bind(criteria.location())
        .bind(criteria.remote())
        .bind(&terms)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_approved_matching", e))?;

        span.record("row_count", rows.len());
        rows.into_iter().map(JobPosting::try_from).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_distinct_approved_locations(&self) -> Result<LocationSet, StoreError> {
        let rows: Vec<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT location
            FROM jobs
            WHERE approved = TRUE
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_distinct_approved_locations", e))?;

        Ok(LocationSet::from_rows(rows))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ping", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Unavailable(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring a connection in {operation}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {operation}: {err}")),
    }
}
