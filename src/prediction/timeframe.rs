use chrono::{DateTime, Duration, Utc};

/// Prediction horizons understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Day,
    Week,
    Month,
    Quarter,
}

impl Timeframe {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "24h" => Some(Timeframe::Day),
            "7d" => Some(Timeframe::Week),
            "30d" => Some(Timeframe::Month),
            "90d" => Some(Timeframe::Quarter),
            _ => None,
        }
    }

    pub fn offset(&self) -> Duration {
        match self {
            Timeframe::Day => Duration::days(1),
            Timeframe::Week => Duration::days(7),
            Timeframe::Month => Duration::days(30),
            Timeframe::Quarter => Duration::days(90),
        }
    }
}

/// Offset for a raw label. Unknown labels map to zero.
pub fn offset_for_label(label: &str) -> Duration {
    Timeframe::from_label(label)
        .map(|tf| tf.offset())
        .unwrap_or_else(Duration::zero)
}

/// Target date of a prediction in epoch milliseconds.
pub fn target_timestamp_ms(label: &str, now: DateTime<Utc>) -> i64 {
    (now + offset_for_label(label)).timestamp_millis()
}
