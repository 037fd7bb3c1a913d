use crate::FplApi;
use crate::error::ApiError;
use async_trait::async_trait;
use core_types::{GameweekRecord, GameweekSummary};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// A memoizing wrapper around any `FplApi` implementation.
///
/// The first fetch of each entry history (and of the gameweek summaries) goes
/// to the wrapped client; every later fetch is served from memory until
/// [`SessionCache::clear`] is called. The cache holds whole responses, so a
/// failed fetch stores nothing and the next call retries.
pub struct SessionCache<C> {
    inner: C,
    histories: Mutex<HashMap<u64, Vec<GameweekRecord>>>,
    summaries: Mutex<Option<Vec<GameweekSummary>>>,
}

impl<C> SessionCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            histories: Mutex::new(HashMap::new()),
            summaries: Mutex::new(None),
        }
    }

    /// Drops every cached response so the next fetches hit the API again.
    pub async fn clear(&self) {
        self.histories.lock().await.clear();
        *self.summaries.lock().await = None;
    }
}

#[async_trait]
impl<C: FplApi> FplApi for SessionCache<C> {
    async fn entry_history(&self, entry_id: u64) -> Result<Vec<GameweekRecord>, ApiError> {
        // The lock is held across the inner fetch so concurrent callers for
        // the same entry cannot trigger duplicate requests.
        let mut histories = self.histories.lock().await;
        if let Some(records) = histories.get(&entry_id) {
            tracing::debug!(entry_id, "Serving entry history from session cache");
            return Ok(records.clone());
        }

        let records = self.inner.entry_history(entry_id).await?;
        histories.insert(entry_id, records.clone());
        Ok(records)
    }

    async fn gameweek_summaries(&self) -> Result<Vec<GameweekSummary>, ApiError> {
        let mut summaries = self.summaries.lock().await;
        if let Some(cached) = summaries.as_ref() {
            tracing::debug!("Serving gameweek summaries from session cache");
            return Ok(cached.clone());
        }

        let fetched = self.inner.gameweek_summaries().await?;
        *summaries = Some(fetched.clone());
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingApi {
        history_calls: AtomicUsize,
        summary_calls: AtomicUsize,
    }

    #[async_trait]
    impl FplApi for CountingApi {
        async fn entry_history(&self, entry_id: u64) -> Result<Vec<GameweekRecord>, ApiError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![GameweekRecord {
                gameweek: 1,
                total_points: 50,
                points: 50,
                rank: entry_id,
                transfers: 0,
            }])
        }

        async fn gameweek_summaries(&self) -> Result<Vec<GameweekSummary>, ApiError> {
            self.summary_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![GameweekSummary {
                gameweek: 1,
                average_score: Decimal::from(54),
                ranked_count: 100,
            }])
        }
    }

    #[tokio::test]
    async fn test_entry_history_is_memoized_per_entry() {
        let cache = SessionCache::new(CountingApi::default());

        cache.entry_history(1).await.unwrap();
        cache.entry_history(1).await.unwrap();
        assert_eq!(cache.inner.history_calls.load(Ordering::SeqCst), 1);

        let other = cache.entry_history(2).await.unwrap();
        assert_eq!(cache.inner.history_calls.load(Ordering::SeqCst), 2);
        assert_eq!(other[0].rank, 2);
    }

    #[tokio::test]
    async fn test_summaries_are_memoized() {
        let cache = SessionCache::new(CountingApi::default());

        cache.gameweek_summaries().await.unwrap();
        cache.gameweek_summaries().await.unwrap();
        assert_eq!(cache.inner.summary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_forces_a_refetch() {
        let cache = SessionCache::new(CountingApi::default());

        cache.entry_history(1).await.unwrap();
        cache.gameweek_summaries().await.unwrap();
        cache.clear().await;
        cache.entry_history(1).await.unwrap();
        cache.gameweek_summaries().await.unwrap();

        assert_eq!(cache.inner.history_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.inner.summary_calls.load(Ordering::SeqCst), 2);
    }
}
