use chrono::{Duration, Utc};
use crypto_predictor::ai::CompletionClient;
use crypto_predictor::api::{self, AppState};
use crypto_predictor::config::{CompletionConfig, MarketDataConfig, ServerConfig};
use crypto_predictor::data::MarketDataClient;
use crypto_predictor::prediction::PredictionService;
use httpmock::prelude::*;
use serde_json::{json, Value};

const COMPLETION_TEXT: &str = "\n\n1. Price Prediction: $64,000 to $70,500\n\
2. Market Sentiment: Moderately bullish.\n\
3. Key Factors: ETF inflows.\n\
4. Risk Assessment: High volatility.\n\
5. Technical Analysis: Support near $62,000.";

fn chart_body() -> Value {
    let base = (Utc::now() - Duration::days(30)).timestamp_millis() as f64;
    let points: Vec<[f64; 2]> = (0..31)
        .map(|i| [base + i as f64 * 86_400_000.0, 60_000.0 + 250.0 * i as f64])
        .collect();
    json!({ "prices": points, "market_caps": points, "total_volumes": points })
}

async fn spawn_app(market_url: String, llm_url: String) -> String {
    let market = MarketDataClient::new(market_url, &MarketDataConfig::default());
    let completion = CompletionClient::new(llm_url, "test-key".to_string(), CompletionConfig::default());
    let service = PredictionService::new(market, completion);

    let cors = api::cors_layer(&ServerConfig::default()).unwrap();
    let app = api::router(AppState::new(service), cors);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn mock_backends() -> (MockServer, MockServer) {
    let market = MockServer::start_async().await;
    let llm = MockServer::start_async().await;

    market
        .mock_async(|when, then| {
            when.method(GET)
                .path("/coins/bitcoin/market_chart")
                .query_param("vs_currency", "usd")
                .query_param("days", "30")
                .query_param("interval", "daily");
            then.status(200).json_body(chart_body());
        })
        .await;
    llm.mock_async(|when, then| {
        when.method(POST).path("/completions");
        then.status(200)
            .json_body(json!({ "choices": [{ "text": COMPLETION_TEXT, "index": 0 }] }));
    })
    .await;

    (market, llm)
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (market, llm) = mock_backends().await;
    let base = spawn_app(market.base_url(), llm.base_url()).await;

    let body: Value = reqwest::get(format!("{base}/")).await.unwrap().json().await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Crypto Predictor API is running");
}

#[tokio::test]
async fn predict_returns_range_from_completion() {
    let (market, llm) = mock_backends().await;
    let base = spawn_app(market.base_url(), llm.base_url()).await;

    let before = Utc::now().timestamp_millis();
    let response = reqwest::Client::new()
        .post(format!("{base}/predict"))
        .json(&json!({ "crypto": "bitcoin", "timeframe": "7d" }))
        .send()
        .await
        .unwrap();
    let after = Utc::now().timestamp_millis();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["result"], COMPLETION_TEXT);
    assert_eq!(body["market_data"]["prices"].as_array().unwrap().len(), 7);
    assert_eq!(body["market_data"]["total_volumes"].as_array().unwrap().len(), 7);

    let range = &body["predicted_range"];
    assert_eq!(range["min"], 64_000.0);
    assert_eq!(range["max"], 70_500.0);

    let week = Duration::days(7).num_milliseconds();
    let date = range["date"].as_i64().unwrap();
    assert!(date >= before + week && date <= after + week);
}

#[tokio::test]
async fn predict_with_market_outage_still_succeeds() {
    let market = MockServer::start_async().await;
    let llm = MockServer::start_async().await;
    market
        .mock_async(|when, then| {
            when.method(GET).path("/coins/dogecoin/market_chart");
            then.status(503);
        })
        .await;

    let base = spawn_app(market.base_url(), llm.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/predict"))
        .json(&json!({ "crypto": "dogecoin", "timeframe": "24h" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], "Error: Unable to fetch market data from CoinGecko");
    assert!(body["market_data"].is_null());
    assert!(body["predicted_range"].is_null());
}

#[tokio::test]
async fn predict_rejects_missing_fields() {
    let (market, llm) = mock_backends().await;
    let base = spawn_app(market.base_url(), llm.base_url()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/predict"))
        .json(&json!({ "crypto": "bitcoin" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("timeframe"));
}

#[tokio::test]
async fn cors_allows_configured_frontend() {
    let (market, llm) = mock_backends().await;
    let base = spawn_app(market.base_url(), llm.base_url()).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/predict"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}

async fn spawn_with_completion(crypto: &'static str, text: &'static str) -> (String, MockServer, MockServer) {
    let market = MockServer::start_async().await;
    let llm = MockServer::start_async().await;

    market
        .mock_async(move |when, then| {
            when.method(GET).path(format!("/coins/{crypto}/market_chart"));
            then.status(200).json_body(chart_body());
        })
        .await;
    llm.mock_async(move |when, then| {
        when.method(POST).path("/completions");
        then.status(200).json_body(json!({ "choices": [{ "text": text }] }));
    })
    .await;

    let base = spawn_app(market.base_url(), llm.base_url()).await;
    (base, market, llm)
}

async fn post_predict(base: &str, crypto: &str, timeframe: &str) -> Value {
    let response = reqwest::Client::new()
        .post(format!("{base}/predict"))
        .json(&json!({ "crypto": crypto, "timeframe": timeframe }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn completion_starting_with_error_keeps_its_range() {
    let text = "Error: bars are an estimate.\nPrice Prediction: $2,400 to $2,650";
    let (base, _market, _llm) = spawn_with_completion("ethereum", text).await;

    let body = post_predict(&base, "ethereum", "30d").await;

    assert_eq!(body["result"], text);
    assert!(!body["market_data"].is_null());
    assert_eq!(body["predicted_range"]["min"], 2_400.0);
    assert_eq!(body["predicted_range"]["max"], 2_650.0);
}

#[tokio::test]
async fn suffixed_amounts_give_no_range() {
    let text = "1. Price Prediction: $60K to $65K\n2. Market Sentiment: mixed";
    let (base, _market, _llm) = spawn_with_completion("bitcoin", text).await;

    let body = post_predict(&base, "bitcoin", "7d").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["result"], text);
    assert!(body["predicted_range"].is_null());
}
