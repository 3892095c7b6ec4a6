pub mod range;
pub mod service;
pub mod timeframe;
pub mod types;

pub use range::{parse_price_range, RangeParseError};
pub use service::PredictionService;
pub use timeframe::Timeframe;
pub use types::{PredictError, Prediction, PredictionRequest, PredictionResult, PriceRange};
