use std::sync::RwLock;

use jobboard_listings::{FilterCriteria, JobPosting, LocationSet, select_listing};

use super::{JobStore, StoreError};

/// In-memory job store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    postings: RwLock<Vec<JobPosting>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postings(postings: impl IntoIterator<Item = JobPosting>) -> Self {
        Self {
            postings: RwLock::new(postings.into_iter().collect()),
        }
    }

    /// Add a posting (seeding and tests only; the board itself never writes).
    pub fn insert(&self, posting: JobPosting) -> Result<(), StoreError> {
        self.postings
            .write()
            .map_err(|_| poisoned())?
            .push(posting);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.postings.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory job store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl JobStore for InMemoryJobStore {
    async fn find_approved_matching(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let postings = self.postings.read().map_err(|_| poisoned())?;
        Ok(select_listing(postings.iter(), criteria))
    }

    async fn find_distinct_approved_locations(&self) -> Result<LocationSet, StoreError> {
        let postings = self.postings.read().map_err(|_| poisoned())?;
        Ok(LocationSet::from_rows(
            postings
                .iter()
                .filter(|p| p.approved)
                .map(|p| p.location.clone()),
        ))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.postings.read().map(|_| ()).map_err(|_| poisoned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use jobboard_core::JobId;
    use jobboard_listings::JobType;
    use proptest::prelude::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn posting(title: &str, location: Option<&str>, approved: bool, secs: i64) -> JobPosting {
        JobPosting {
            id: JobId::new(),
            title: title.to_string(),
            company: "Contoso".to_string(),
            job_type: JobType::FullTime,
            location: location.map(str::to_string),
            remote: false,
            approved,
            created_at: at(secs),
        }
    }

    #[tokio::test]
    async fn find_approved_hides_unapproved_and_sorts_newest_first() {
        let store = InMemoryJobStore::with_postings(vec![
            posting("first", Some("Oslo"), true, 1),
            posting("pending", Some("Oslo"), false, 5),
            posting("third", None, true, 3),
            posting("second", Some("Lima"), true, 2),
        ]);

        let titles: Vec<String> = store
            .find_approved()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn distinct_locations_ignore_unapproved_and_missing() {
        let store = InMemoryJobStore::with_postings(vec![
            posting("a", Some("Oslo"), true, 1),
            posting("b", Some("Oslo"), true, 2),
            posting("c", Some(""), true, 3),
            posting("d", None, true, 4),
            posting("e", Some("Secret City"), false, 5),
            posting("f", Some("Lima"), true, 6),
        ]);

        let locations = store.find_distinct_approved_locations().await.unwrap();
        assert_eq!(locations.iter().collect::<Vec<_>>(), vec!["Lima", "Oslo"]);
    }

    #[tokio::test]
    async fn every_posting_without_location_gives_empty_set() {
        let store = InMemoryJobStore::with_postings(vec![
            posting("a", None, true, 1),
            posting("b", Some(""), true, 2),
        ]);
        assert!(store.find_distinct_approved_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn matching_applies_criteria() {
        let store = InMemoryJobStore::new();
        store.insert(posting("Rust Engineer", Some("Oslo"), true, 1)).unwrap();
        store.insert(posting("Go Engineer", Some("Oslo"), true, 2)).unwrap();
        assert_eq!(store.len().unwrap(), 2);

        let found = store
            .find_approved_matching(&FilterCriteria::default().with_query("rust"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Rust Engineer");
    }

    #[tokio::test]
    async fn poisoned_lock_is_reported_as_unavailable() {
        let store = std::sync::Arc::new(InMemoryJobStore::with_postings(vec![posting("x", None, true, 1)]));
        let writer = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = writer.postings.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.insert(posting("y", None, true, 2)),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn works_behind_an_arc_dyn() {
        let store: std::sync::Arc<dyn JobStore> =
            std::sync::Arc::new(InMemoryJobStore::with_postings(vec![posting("x", None, true, 1)]));
        assert_eq!(store.find_approved().await.unwrap().len(), 1);
        store.ping().await.unwrap();
    }

    proptest! {
        #[test]
        fn listing_and_locations_hold_their_invariants(
            rows in prop::collection::vec(
                (any::<bool>(), -10_000i64..10_000, prop::option::of(prop_oneof![
                    Just(String::new()),
                    Just("Oslo".to_string()),
                    Just("Lima".to_string()),
                    Just("Redmond, Washington, United States".to_string()),
                ])),
                0..30,
            )
        ) {
            let store = InMemoryJobStore::with_postings(rows.iter().map(|(approved, secs, location)| {
                JobPosting {
                    location: location.clone(),
                    ..posting("p", None, *approved, *secs)
                }
            }));

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (listing, locations) = rt.block_on(async {
                (
                    store.find_approved().await.unwrap(),
                    store.find_distinct_approved_locations().await.unwrap(),
                )
            });

            prop_assert!(listing.iter().all(|p| p.approved));
            for pair in listing.windows(2) {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }

            prop_assert!(locations.iter().all(|l| !l.is_empty()));
            let expected: std::collections::BTreeSet<&str> = rows
                .iter()
                .filter(|(approved, _, _)| *approved)
                .filter_map(|(_, _, l)| l.as_deref())
                .filter(|l| !l.is_empty())
                .collect();
            prop_assert_eq!(locations.iter().collect::<std::collections::BTreeSet<_>>(), expected);
        }
    }
}
