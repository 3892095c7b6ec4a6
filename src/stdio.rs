//! One-shot mode: one JSON request line in, one JSON response line out.

use serde::{Deserialize, Serialize};
use crate::data::types::MarketSnapshot;
use crate::prediction::service::PredictionService;

const DEFAULT_CRYPTO: &str = "bitcoin";
const DEFAULT_TIMEFRAME: &str = "7d";

#[derive(Debug, Deserialize)]
struct StdinRequest {
    crypto: Option<String>,
    timeframe: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StdinResponse {
    Success {
        success: bool,
        result: String,
        market_data: Option<MarketSnapshot>,
        prediction_timestamp: Option<i64>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl StdinResponse {
    fn failure(error: impl Into<String>) -> Self {
        StdinResponse::Failure {
            success: false,
            error: error.into(),
        }
    }
}

/// Handle one input line. Missing fields default to bitcoin over 7d.
pub async fn handle_line(service: &PredictionService, line: &str) -> StdinResponse {
    let request: StdinRequest = match serde_json::from_str(line.trim()) {
        Ok(request) => request,
        Err(e) => return StdinResponse::failure(e.to_string()),
    };

    let crypto = request.crypto.unwrap_or_else(|| DEFAULT_CRYPTO.to_string());
    let timeframe = request.timeframe.unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string());

    let result = service.predict(&crypto, &timeframe).await;

    StdinResponse::Success {
        success: true,
        result: result.text,
        market_data: result.market_data,
        prediction_timestamp: result.target_timestamp,
    }
}

/// Serialize a response as a single line, falling back to a failure object.
pub fn render_line(response: &StdinResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": e.to_string() }).to_string()
    })
}
