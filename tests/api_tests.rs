use actix_web::{test, web};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use crypto_exchange_rate::{
    api::{self, AppState},
    error::{ExchangeRateError, Result},
    FreshnessPolicy, Ticker, TickerProvider,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Serves a fixed ticker list per exchange; unknown exchanges are unsupported.
struct StaticTickerProvider {
    exchanges: HashMap<String, Vec<Ticker>>,
}

#[async_trait]
impl TickerProvider for StaticTickerProvider {
    fn name(&self) -> &'static str {
        "Static"
    }

    async fn fetch_exchange_tickers(&self, exchange: &str) -> Result<Option<Vec<Ticker>>> {
        Ok(self.exchanges.get(exchange).cloned())
    }
}

/// Fails every fetch the way an unreachable upstream does.
struct FailingTickerProvider;

#[async_trait]
impl TickerProvider for FailingTickerProvider {
    fn name(&self) -> &'static str {
        "Failing"
    }

    async fn fetch_exchange_tickers(&self, _exchange: &str) -> Result<Option<Vec<Ticker>>> {
        Err(ExchangeRateError::Upstream(
            "Failing returned 503 Service Unavailable".to_string(),
        ))
    }
}

fn ticker(symbol: &str, price_usd: &str, age_secs: i64) -> Ticker {
    Ticker {
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        price_usd: price_usd.to_string(),
        price_btc: "0".to_string(),
        percent_change_24h_usd: "0".to_string(),
        last_updated: Utc::now() - ChronoDuration::seconds(age_secs),
    }
}

fn binance_state(tickers: Vec<Ticker>) -> AppState {
    let mut exchanges = HashMap::new();
    exchanges.insert("binance".to_string(), tickers);

    AppState::new(Arc::new(StaticTickerProvider { exchanges }), quick_policy())
}

fn quick_policy() -> FreshnessPolicy {
    FreshnessPolicy {
        window: Duration::from_secs(58),
        require_all_fresh: false,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        max_wait: Duration::from_millis(20),
    }
}

fn default_tickers() -> Vec<Ticker> {
    vec![
        ticker("btc", "50000", 5),
        ticker("ETH", "2500", 5),
        ticker("ZERO", "0", 5),
        ticker("JUNK", "not-a-price", 5),
        ticker("INF", "inf", 5),
        ticker("NAN", "NaN", 5),
    ]
}

async fn call(state: AppState, uri: &str) -> (u16, Value) {
    let _ = env_logger::builder().is_test(true).try_init();

    let app = test::init_service(
        actix_web::App::new()
            .app_data(web::Data::new(state))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[actix_web::test]
async fn test_exchange_rate_success() {
    let (status, body) = call(
        binance_state(default_tickers()),
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=binance",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"].as_f64(), Some(20.0));
}

#[actix_web::test]
async fn test_symbol_matching_is_case_insensitive() {
    let (status, body) = call(
        binance_state(default_tickers()),
        "/exchange-rate?fromCurrency=eth&toCurrency=Btc&exchange=binance",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"].as_f64(), Some(0.05));
}

#[actix_web::test]
async fn test_missing_parameters() {
    let uris = [
        "/exchange-rate",
        "/exchange-rate?toCurrency=ETH&exchange=binance",
        "/exchange-rate?fromCurrency=BTC&exchange=binance",
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH",
        "/exchange-rate?fromCurrency=&toCurrency=ETH&exchange=binance",
    ];

    for uri in uris {
        let (status, body) = call(binance_state(default_tickers()), uri).await;
        assert_eq!(status, 400, "{}", uri);
        assert_eq!(body["status"], 400);
        assert_eq!(
            body["message"],
            "invalid parameters. Please provide valid parameters"
        );
    }
}

#[actix_web::test]
async fn test_unsupported_exchange() {
    let (status, body) = call(
        binance_state(default_tickers()),
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=nowhere",
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], 500);
    assert_eq!(
        body["message"],
        "Invalid exchange. This exchange is not supported"
    );
}

#[actix_web::test]
async fn test_invalid_asset() {
    let (status, body) = call(
        binance_state(default_tickers()),
        "/exchange-rate?fromCurrency=BTC&toCurrency=DOGE&exchange=binance",
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], 500);
    assert_eq!(
        body["message"],
        "Invalid Crypto Asset.  Please provide a valid crypto"
    );
}

#[actix_web::test]
async fn test_zero_and_unparsable_prices_are_errors() {
    for to in ["ZERO", "JUNK", "INF", "NAN"] {
        let uri = format!(
            "/exchange-rate?fromCurrency=BTC&toCurrency={}&exchange=binance",
            to
        );
        let (status, body) = call(binance_state(default_tickers()), &uri).await;

        assert_eq!(status, 500, "{}", to);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid price data"));
    }
}

#[actix_web::test]
async fn test_non_finite_prices_are_errors() {
    for (from_price, to_price) in [("inf", "2500"), ("50000", "NaN"), ("1e400", "1")] {
        let (status, body) = call(
            binance_state(vec![ticker("BTC", from_price, 5), ticker("ETH", to_price, 5)]),
            "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=binance",
        )
        .await;

        assert_eq!(status, 500, "{} / {}", from_price, to_price);
        assert_eq!(body["status"], 500);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid price data"));
    }
}

#[actix_web::test]
async fn test_upstream_failure_is_bad_gateway() {
    let (status, body) = call(
        AppState::new(Arc::new(FailingTickerProvider), quick_policy()),
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=binance",
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["status"], 502);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Upstream error"));
}

#[actix_web::test]
async fn test_stale_tickers_time_out() {
    let (status, body) = call(
        binance_state(vec![ticker("BTC", "50000", 300), ticker("ETH", "2500", 300)]),
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=binance",
    )
    .await;

    assert_eq!(status, 504);
    assert_eq!(body["status"], 504);
}

#[actix_web::test]
async fn test_one_fresh_asset_is_enough() {
    let (status, body) = call(
        binance_state(vec![ticker("BTC", "50000", 300), ticker("ETH", "2500", 10)]),
        "/exchange-rate?fromCurrency=BTC&toCurrency=ETH&exchange=binance",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"].as_f64(), Some(20.0));
}

#[actix_web::test]
async fn test_unknown_path() {
    let (status, _) = call(binance_state(default_tickers()), "/invalid-path").await;
    assert_eq!(status, 404);
}
