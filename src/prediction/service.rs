use chrono::Utc;
use tracing::{error, info, warn};
use crate::ai::completion::CompletionClient;
use crate::ai::prompt::render_prompt;
use crate::config::{Config, EnvConfig};
use crate::data::coingecko::MarketDataClient;
use crate::prediction::timeframe::{target_timestamp_ms, Timeframe};
use crate::prediction::types::{PredictError, Prediction, PredictionResult};

/// Market data → prompt → completion pipeline.
pub struct PredictionService {
    market: MarketDataClient,
    completion: CompletionClient,
}

impl PredictionService {
    pub fn new(market: MarketDataClient, completion: CompletionClient) -> Self {
        Self { market, completion }
    }

    /// Wire the service from loaded configuration.
    pub fn from_config(config: &Config, env: &EnvConfig) -> Self {
        let market = MarketDataClient::new(env.coingecko_api_url.clone(), &config.market_data);
        let completion = CompletionClient::new(
            env.openai_api_url.clone(),
            env.openai_api_key.clone(),
            config.completion.clone(),
        );
        Self::new(market, completion)
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    /// Run the pipeline, reporting which stage failed.
    pub async fn try_predict(&self, crypto: &str, timeframe: &str) -> Result<Prediction, PredictError> {
        let market_data = self.market
            .fetch_snapshot(crypto)
            .await
            .ok_or_else(|| PredictError::UpstreamDataUnavailable(crypto.to_string()))?;

        if Timeframe::from_label(timeframe).is_none() {
            warn!("Unrecognized timeframe {:?}, target date is now", timeframe);
        }
        let target_timestamp = target_timestamp_ms(timeframe, Utc::now());

        if let Some(price) = market_data.latest_price() {
            info!("Latest {} price: ${:.2}", crypto, price);
        }

        let prompt = render_prompt(crypto, timeframe, &market_data);
        let text = self.completion.complete(&prompt).await?;

        Ok(Prediction {
            text,
            market_data,
            target_timestamp,
        })
    }

    /// Fail-soft form of [`try_predict`](Self::try_predict); never fails.
    pub async fn predict(&self, crypto: &str, timeframe: &str) -> PredictionResult {
        match self.try_predict(crypto, timeframe).await {
            Ok(prediction) => prediction.into(),
            Err(e) => {
                error!("Error in prediction for {}: {}", crypto, e);
                e.into()
            }
        }
    }
}
