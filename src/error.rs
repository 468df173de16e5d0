// Custom error types
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum ExchangeRateError {
    #[error("invalid parameters. Please provide valid parameters")]
    InvalidParameters,

    #[error("Invalid exchange. This exchange is not supported")]
    UnsupportedExchange,

    #[error("Invalid Crypto Asset.  Please provide a valid crypto")]
    InvalidAsset,

    #[error("Invalid price data: {0}")]
    InvalidPriceData(String),

    #[error("Ticker data for {from}/{to} on {exchange} was not refreshed within {waited_secs}s")]
    StaleTickers {
        exchange: String,
        from: String,
        to: String,
        waited_secs: u64,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResponseError for ExchangeRateError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExchangeRateError::InvalidParameters => StatusCode::BAD_REQUEST,
            ExchangeRateError::UnsupportedExchange
            | ExchangeRateError::InvalidAsset
            | ExchangeRateError::InvalidPriceData(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExchangeRateError::StaleTickers { .. } => StatusCode::GATEWAY_TIMEOUT,
            ExchangeRateError::Upstream(_)
            | ExchangeRateError::Http(_)
            | ExchangeRateError::Json(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            status: status.as_u16(),
            message: self.to_string(),
        })
    }
}

/// A type alias for Result that uses our custom error type
pub type Result<T> = std::result::Result<T, ExchangeRateError>;
