use crate::data::types::MarketSnapshot;

/// Render the analyst prompt for one asset and horizon.
///
/// `crypto` and `timeframe` are inserted verbatim. The market data is
/// embedded as pretty-printed JSON.
pub fn render_prompt(crypto: &str, timeframe: &str, market_data: &MarketSnapshot) -> String {
    let market_json = serde_json::to_string_pretty(market_data)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are a cryptocurrency market analyst. Using the market data and trends below,
give a detailed analysis and price prediction for the requested cryptocurrency.

Cryptocurrency: {crypto}
Prediction Timeframe: {timeframe}

Historical Market Data:
{market_json}

Structure your answer in these sections:
1. Price Prediction: Give a specific price range for {timeframe} (Format as 'Price Prediction: $X to $Y')
2. Market Sentiment: Analyze current market sentiment
3. Key Factors: List main factors influencing your prediction
4. Risk Assessment: Provide key risks and considerations
5. Technical Analysis: Brief technical analysis based on historical data

Important: the Price Prediction line must read exactly 'Price Prediction: $X to $Y' so it can be parsed.
Include appropriate disclaimers about market volatility and investment risk.
"#
    )
}
