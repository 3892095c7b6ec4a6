use reqwest::Client;
use tracing::{debug, warn};
use crate::config::MarketDataConfig;
use crate::data::types::MarketSnapshot;
use crate::prediction::types::PredictError;

pub struct MarketDataClient {
    client: Client,
    base_url: String,
    history_days: u32,
    window: usize,
}

impl MarketDataClient {
    pub fn new(base_url: String, config: &MarketDataConfig) -> Self {
        Self::with_client(Client::new(), base_url, config)
    }

    pub fn with_client(client: Client, base_url: String, config: &MarketDataConfig) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            history_days: config.history_days,
            window: config.window,
        }
    }

    /// Fetch daily USD history for `crypto_id` and trim every series to the
    /// configured window.
    pub async fn fetch_market_chart(
        &self,
        crypto_id: &str,
        days: u32,
    ) -> Result<MarketSnapshot, PredictError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, crypto_id);
        let days = days.to_string();

        let response = self.client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| PredictError::UpstreamDataUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PredictError::UpstreamDataUnavailable(e.to_string()))?;

        let snapshot: MarketSnapshot = response
            .json()
            .await
            .map_err(|e| PredictError::UpstreamDataUnavailable(e.to_string()))?;

        debug!(
            "Fetched {} price points for {} (keeping last {})",
            snapshot.prices.len(),
            crypto_id,
            self.window
        );

        Ok(snapshot.trim_to(self.window))
    }

    /// Degraded form of [`fetch_market_chart`](Self::fetch_market_chart):
    /// failures are logged and reported as `None`.
    pub async fn fetch_snapshot(&self, crypto_id: &str) -> Option<MarketSnapshot> {
        match self.fetch_market_chart(crypto_id, self.history_days).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Error fetching crypto data for {}: {}", crypto_id, e);
                None
            }
        }
    }
}
