// REST client for the Shrimpy public ticker API

use crate::config::UpstreamConfig;
use crate::error::{ExchangeRateError, Result};
use crate::models::Ticker;
use crate::provider::TickerProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::{StatusCode, Url};
use std::time::Duration;

pub struct ShrimpyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ShrimpyClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                ExchangeRateError::Upstream(format!("Failed to create HTTP client: {}", e))
            })?;

        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ExchangeRateError::Upstream(format!(
                "Invalid upstream endpoint {:?}: {}",
                config.endpoint, e
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ExchangeRateError::Upstream(format!(
                "Invalid upstream endpoint {:?}: not a base URL",
                config.endpoint
            )));
        }

        Ok(Self { client, endpoint })
    }

    /// The exchange name always lands in a single, percent-encoded path segment.
    fn tickers_url(&self, exchange: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExchangeRateError::Upstream("Upstream endpoint is not a base URL".to_string())
            })?
            .pop_if_empty()
            .extend(["v1", "exchanges", exchange, "ticker"]);
        Ok(url)
    }
}

#[async_trait]
impl TickerProvider for ShrimpyClient {
    fn name(&self) -> &'static str {
        "Shrimpy"
    }

    async fn fetch_exchange_tickers(&self, exchange: &str) -> Result<Option<Vec<Ticker>>> {
        // Dot segments would be resolved away instead of naming an exchange.
        if exchange == "." || exchange == ".." {
            return Ok(None);
        }

        let url = self.tickers_url(exchange)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            debug!("{} rejected exchange {:?} with {}", self.name(), exchange, status);
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeRateError::Upstream(format!(
                "{} returned {} for {}: {}",
                self.name(),
                status,
                url,
                body
            )));
        }

        let body = response.bytes().await?;
        let tickers: Vec<Ticker> = serde_json::from_slice(&body)?;
        debug!(
            "{} returned {} tickers for {}",
            self.name(),
            tickers.len(),
            exchange
        );
        Ok(Some(tickers))
    }
}
