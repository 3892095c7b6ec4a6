pub mod coingecko;
pub mod types;

pub use coingecko::MarketDataClient;
pub use types::MarketSnapshot;
