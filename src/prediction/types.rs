use serde::{Deserialize, Serialize};
use crate::data::types::MarketSnapshot;
use crate::prediction::range::{parse_price_range, RangeParseError};

/// Inbound `{crypto, timeframe}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub crypto: String,
    pub timeframe: String,
}

/// Successful run of the pipeline.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub text: String,
    pub market_data: MarketSnapshot,
    pub target_timestamp: i64,
}

impl Prediction {
    /// Strict range extraction, dated at the prediction target.
    pub fn price_range(&self) -> Result<PriceRange, PredictError> {
        let (min, max) = parse_price_range(&self.text)?;
        Ok(PriceRange {
            min,
            max,
            date: Some(self.target_timestamp),
        })
    }
}

/// Fail-soft result: on failure `text` starts with `"Error:"` and the other
/// two fields are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub text: String,
    pub market_data: Option<MarketSnapshot>,
    pub target_timestamp: Option<i64>,
}

impl From<Prediction> for PredictionResult {
    fn from(prediction: Prediction) -> Self {
        Self {
            text: prediction.text,
            market_data: Some(prediction.market_data),
            target_timestamp: Some(prediction.target_timestamp),
        }
    }
}

impl From<PredictError> for PredictionResult {
    fn from(err: PredictError) -> Self {
        Self {
            text: format!("Error: {}", err),
            market_data: None,
            target_timestamp: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub date: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Unable to fetch market data from CoinGecko")]
    UpstreamDataUnavailable(String),

    #[error("Completion request failed: {0}")]
    CompletionFailed(String),

    #[error("Could not parse price range: {0}")]
    ParseFailed(#[from] RangeParseError),
}
