// Poll the ticker provider until the requested assets are fresh
use crate::error::{ExchangeRateError, Result};
use crate::matcher::find_assets;
use crate::models::{Asset, AssetDetails, RateRequest};
use crate::provider::TickerProvider;
use chrono::{DateTime, Utc};
use log::debug;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// How long tickers may be stale and how long to keep polling for fresh ones.
#[derive(Debug, Clone, PartialEq)]
pub struct FreshnessPolicy {
    pub window: Duration,
    /// When false, one fresh asset is enough for the pair to be accepted.
    pub require_all_fresh: bool,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub max_wait: Duration,
}

impl FreshnessPolicy {
    pub fn is_asset_fresh(&self, asset: &Asset, now: DateTime<Utc>) -> bool {
        // A negative age (clock skew) fails to_std and counts as fresh.
        match now.signed_duration_since(asset.last_updated).to_std() {
            Ok(age) => age < self.window,
            Err(_) => true,
        }
    }

    pub fn is_pair_fresh(&self, from: &Asset, to: &Asset, now: DateTime<Utc>) -> bool {
        let from_fresh = self.is_asset_fresh(from, now);
        let to_fresh = self.is_asset_fresh(to, now);

        if self.require_all_fresh {
            from_fresh && to_fresh
        } else {
            from_fresh || to_fresh
        }
    }
}

/// Fetches the exchange's tickers until the requested pair passes `policy`.
///
/// An unsupported exchange or an unknown symbol ends the poll at once. Stale
/// pairs are re-fetched with exponential backoff until `policy.max_wait` has
/// elapsed, after which `StaleTickers` is returned. Provider errors are
/// returned as is.
pub async fn fetch_fresh_assets(
    provider: &dyn TickerProvider,
    request: &RateRequest,
    policy: &FreshnessPolicy,
) -> Result<AssetDetails> {
    let started = Instant::now();
    let mut backoff = policy.initial_backoff;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let tickers = provider
            .fetch_exchange_tickers(&request.exchange)
            .await?
            .ok_or(ExchangeRateError::UnsupportedExchange)?;

        let assets = find_assets(&tickers, &request.from_currency, &request.to_currency)
            .ok_or(ExchangeRateError::InvalidAsset)?;

        let (from, to) = match (
            assets.get(&request.from_currency),
            assets.get(&request.to_currency),
        ) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ExchangeRateError::InvalidAsset),
        };

        if policy.is_pair_fresh(from, to, Utc::now()) {
            debug!(
                "{}/{} on {} fresh after {} attempt(s)",
                request.from_currency, request.to_currency, request.exchange, attempt
            );
            return Ok(assets);
        }

        let elapsed = started.elapsed();
        if elapsed >= policy.max_wait {
            return Err(ExchangeRateError::StaleTickers {
                exchange: request.exchange.clone(),
                from: request.from_currency.clone(),
                to: request.to_currency.clone(),
                waited_secs: elapsed.as_secs(),
            });
        }

        let delay = backoff.min(policy.max_wait - elapsed);
        debug!(
            "{}/{} on {} stale (last updated {} / {}), retrying in {:?}",
            request.from_currency,
            request.to_currency,
            request.exchange,
            from.last_updated,
            to.last_updated,
            delay
        );
        sleep(delay).await;
        backoff = (backoff * 2).min(policy.max_backoff);
    }
}
