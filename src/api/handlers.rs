//! HTTP request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::data::types::MarketSnapshot;
use crate::prediction::types::{PredictionRequest, PredictionResult, PriceRange};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub result: String,
    pub market_data: Option<MarketSnapshot>,
    pub predicted_range: Option<PriceRange>,
}

/// GET / - liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Crypto Predictor API is running",
    })
}

/// POST /predict - run a prediction and extract its price range.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload
        .map_err(|rejection| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()))?;

    info!(
        "Received request for crypto: {}, timeframe: {}",
        req.crypto, req.timeframe
    );

    let (prediction, predicted_range) =
        match state.service.try_predict(&req.crypto, &req.timeframe).await {
            Ok(prediction) => {
                let predicted_range = match prediction.price_range() {
                    Ok(range) => Some(range),
                    Err(e) => {
                        warn!("Error parsing prediction for {}: {}", req.crypto, e);
                        None
                    }
                };
                (PredictionResult::from(prediction), predicted_range)
            }
            Err(e) => {
                error!("Error in prediction for {}: {}", req.crypto, e);
                (PredictionResult::from(e), None)
            }
        };

    info!(
        result_len = prediction.text.len(),
        has_range = predicted_range.is_some(),
        "Prediction complete for {}",
        req.crypto
    );

    Ok(Json(PredictResponse {
        success: true,
        result: prediction.text,
        market_data: prediction.market_data,
        predicted_range,
    }))
}
