use crate::error::ApiError;
use async_trait::async_trait;
use configuration::settings::ApiSettings;
use core_types::{GameweekRecord, GameweekSummary};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod cache;
pub mod error;
pub mod responses;

// --- Public API ---
pub use cache::SessionCache;
pub use responses::{BootstrapResponse, EntryHistoryResponse, EntryHistoryRow, EventRow};

/// The abstract interface for the FPL API.
/// This trait is the contract the aggregation pipeline works against,
/// allowing the underlying implementation (live, cached or mock) to be
/// swapped out.
#[async_trait]
pub trait FplApi: Send + Sync {
    /// Fetches the per-gameweek history of a single entry.
    async fn entry_history(&self, entry_id: u64) -> Result<Vec<GameweekRecord>, ApiError>;

    /// Fetches the game-wide per-gameweek averages and participation counts.
    async fn gameweek_summaries(&self) -> Result<Vec<GameweekSummary>, ApiError>;
}

/// A concrete implementation of `FplApi` for the public FPL endpoints.
#[derive(Clone)]
pub struct FplClient {
    client: reqwest::Client,
    base_url: String,
}

impl FplClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(%url, "Sending GET request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            Err(ApiError::Status(status, url.to_string()))
        }
    }
}

#[async_trait]
impl FplApi for FplClient {
    async fn entry_history(&self, entry_id: u64) -> Result<Vec<GameweekRecord>, ApiError> {
        let url = format!("{}/entry/{}/history/", self.base_url, entry_id);
        let response: EntryHistoryResponse = self.get_json(&url).await?;

        Ok(response
            .current
            .into_iter()
            .map(GameweekRecord::from)
            .collect())
    }

    async fn gameweek_summaries(&self) -> Result<Vec<GameweekSummary>, ApiError> {
        let url = format!("{}/bootstrap-static/", self.base_url);
        let response: BootstrapResponse = self.get_json(&url).await?;

        Ok(response
            .events
            .into_iter()
            .map(GameweekSummary::from)
            .collect())
    }
}
