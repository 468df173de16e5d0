// TickerProvider trait
use crate::error::Result;
use crate::models::Ticker;
use async_trait::async_trait;

pub mod shrimpy;

/// The TickerProvider trait defines the interface for upstream ticker feeds.
///
/// Implementations return every ticker the upstream knows for an exchange,
/// regardless of the feed's own API details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerProvider: Send + Sync {
    /// Returns the name of the provider as a static string
    fn name(&self) -> &'static str;

    /// Fetches all tickers listed for `exchange`
    ///
    /// Returns:
    ///   Ok(Some(tickers)) when the exchange is known upstream,
    ///   Ok(None) when the upstream does not support the exchange,
    ///   Err on transport or decoding failures
    async fn fetch_exchange_tickers(&self, exchange: &str) -> Result<Option<Vec<Ticker>>>;
}
