use serde::{Deserialize, Serialize};

/// A `[timestamp_ms, value]` pair as returned by the chart endpoint.
pub type SeriesPoint = [f64; 2];

/// Recent daily history for one asset, quoted in USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub prices: Vec<SeriesPoint>,
    #[serde(default)]
    pub market_caps: Vec<SeriesPoint>,
    #[serde(default)]
    pub total_volumes: Vec<SeriesPoint>,
}

impl MarketSnapshot {
    /// Keep only the last `window` points of every series.
    pub fn trim_to(mut self, window: usize) -> Self {
        keep_last(&mut self.prices, window);
        keep_last(&mut self.market_caps, window);
        keep_last(&mut self.total_volumes, window);
        self
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().map(|point| point[1])
    }
}

fn keep_last(series: &mut Vec<SeriesPoint>, window: usize) {
    if series.len() > window {
        series.drain(..series.len() - window);
    }
}
