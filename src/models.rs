// Ticker, Asset, request and response bodies
use crate::error::{ExchangeRateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A ticker record as reported by the upstream provider for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub price_usd: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub price_btc: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub percent_change_24h_usd: String,
    pub last_updated: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The subset of a ticker kept for a single exchange-rate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub symbol: String,
    pub price_usd: String,
    pub price_btc: String,
    pub percent_change_24h_usd: String,
    pub last_updated: DateTime<Utc>,
}

impl From<&Ticker> for Asset {
    fn from(ticker: &Ticker) -> Self {
        Self {
            name: ticker.name.clone(),
            symbol: ticker.symbol.clone(),
            price_usd: ticker.price_usd.clone(),
            price_btc: ticker.price_btc.clone(),
            percent_change_24h_usd: ticker.percent_change_24h_usd.clone(),
            last_updated: ticker.last_updated,
        }
    }
}

impl Asset {
    /// Parses the USD price, rejecting anything that is not a finite number.
    pub fn usd_price(&self) -> Result<f64> {
        let price = self.price_usd.trim().parse::<f64>().map_err(|e| {
            ExchangeRateError::InvalidPriceData(format!(
                "USD price {:?} of {} is not a number: {}",
                self.price_usd, self.symbol, e
            ))
        })?;

        if !price.is_finite() {
            return Err(ExchangeRateError::InvalidPriceData(format!(
                "USD price {:?} of {} is not finite",
                self.price_usd, self.symbol
            )));
        }

        Ok(price)
    }
}

/// Matched assets keyed by the symbol exactly as the caller requested it.
pub type AssetDetails = HashMap<String, Asset>;

/// Divides the USD price of `from` by the USD price of `to`.
pub fn cross_rate(from: &Asset, to: &Asset) -> Result<f64> {
    let from_price = from.usd_price()?;
    let to_price = to.usd_price()?;

    if to_price == 0.0 {
        return Err(ExchangeRateError::InvalidPriceData(format!(
            "USD price of {} is zero",
            to.symbol
        )));
    }

    let rate = from_price / to_price;
    if !rate.is_finite() {
        return Err(ExchangeRateError::InvalidPriceData(format!(
            "rate of {} to {} overflows",
            from.symbol, to.symbol
        )));
    }

    Ok(rate)
}

/// Raw query string of `GET /exchange-rate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateQuery {
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    pub exchange: Option<String>,
}

/// A validated exchange-rate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub exchange: String,
}

impl TryFrom<ExchangeRateQuery> for RateRequest {
    type Error = ExchangeRateError;

    fn try_from(query: ExchangeRateQuery) -> Result<Self> {
        fn required(value: Option<String>) -> Result<String> {
            value
                .filter(|v| !v.is_empty())
                .ok_or(ExchangeRateError::InvalidParameters)
        }

        Ok(Self {
            from_currency: required(query.from_currency)?,
            to_currency: required(query.to_currency)?,
            exchange: required(query.exchange)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateBody {
    pub status: u16,
    pub data: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}
