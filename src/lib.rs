//! Crypto price range predictions from recent market data and a
//! language-model completion.

pub mod ai;
pub mod api;
pub mod config;
pub mod data;
pub mod monitoring;
pub mod prediction;
pub mod stdio;

pub use config::{Config, EnvConfig};
pub use prediction::{PredictError, PredictionResult, PredictionService, PriceRange};
