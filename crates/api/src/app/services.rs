use std::sync::Arc;

use chrono::Utc;

use jobboard_infra::{
    InMemoryJobStore, JobStore, PostgresJobStore, StoreError, StoreKind, StoreSettings, seed,
};
use jobboard_listings::{FilterCriteria, JobPosting, LocationSet};

/// Everything a handler needs: one long-lived store shared by all requests.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn JobStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn JobStore {
        self.store.as_ref()
    }

    /// Postings and location choices for one page view.
    ///
    /// The two reads are independent, so they run concurrently.
    pub async fn listing_page(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<(Vec<JobPosting>, LocationSet), StoreError> {
        tokio::try_join!(
            self.store.find_approved_matching(criteria),
            self.store.find_distinct_approved_locations(),
        )
    }
}

fn build_in_memory_services(settings: &StoreSettings) -> Result<AppServices, StoreError> {
    let store = InMemoryJobStore::new();
    if settings.seed_demo_data {
        seed::seed_demo_data(&store, Utc::now())?;
    }
    Ok(AppServices::new(Arc::new(store)))
}

async fn build_persistent_services(settings: &StoreSettings) -> Result<AppServices, StoreError> {
    let store = PostgresJobStore::connect(settings).await?;
    Ok(AppServices::new(Arc::new(store)))
}

/// Pick the store named in configuration.
pub async fn build_services(settings: &StoreSettings) -> Result<AppServices, StoreError> {
    match settings.kind {
        StoreKind::Memory => {
            tracing::info!(seed = settings.seed_demo_data, "using in-memory job store");
            build_in_memory_services(settings)
        }
        StoreKind::Postgres => {
            tracing::info!("using postgres job store");
            build_persistent_services(settings).await
        }
    }
}
