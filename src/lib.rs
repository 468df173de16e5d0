//! Crypto cross-rate API
//!
//! This library serves the exchange rate between two crypto assets listed on
//! one exchange, computed from the USD prices of an upstream ticker feed.

pub mod api;
pub mod config;
pub mod error;
pub mod freshness;
pub mod matcher;
pub mod models;
pub mod provider;

// Re-export commonly used items
pub use api::{start_server, AppState};
pub use config::Settings;
pub use error::{ExchangeRateError, Result};
pub use freshness::{fetch_fresh_assets, FreshnessPolicy};
pub use matcher::find_assets;
pub use models::{Asset, AssetDetails, RateRequest, Ticker};

// Re-export provider types
pub use provider::shrimpy::ShrimpyClient;
pub use provider::TickerProvider;
