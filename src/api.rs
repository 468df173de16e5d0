// Actix server setup, exchange-rate handler

use crate::config::Settings;
use crate::error::{ExchangeRateError, Result};
use crate::freshness::{fetch_fresh_assets, FreshnessPolicy};
use crate::models::{cross_rate, ExchangeRateQuery, RateBody, RateRequest};
use crate::provider::shrimpy::ShrimpyClient;
use crate::provider::TickerProvider;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use log::{info, warn};
use std::sync::Arc;

pub struct AppState {
    pub provider: Arc<dyn TickerProvider>,
    pub policy: FreshnessPolicy,
}

impl AppState {
    pub fn new(provider: Arc<dyn TickerProvider>, policy: FreshnessPolicy) -> Self {
        Self { provider, policy }
    }
}

pub async fn get_exchange_rate(
    data: web::Data<AppState>,
    query: web::Query<ExchangeRateQuery>,
) -> Result<HttpResponse> {
    let request = RateRequest::try_from(query.into_inner())?;
    info!(
        "Exchange rate requested: {} -> {} on {}",
        request.from_currency, request.to_currency, request.exchange
    );

    let rate = quote_rate(&data, &request).await.map_err(|e| {
        warn!(
            "Exchange rate {} -> {} on {} failed: {}",
            request.from_currency, request.to_currency, request.exchange, e
        );
        e
    })?;

    info!(
        "Exchange rate {} -> {} on {}: {}",
        request.from_currency, request.to_currency, request.exchange, rate
    );
    Ok(HttpResponse::Ok().json(RateBody {
        status: 200,
        data: rate,
    }))
}

async fn quote_rate(data: &AppState, request: &RateRequest) -> Result<f64> {
    let assets = fetch_fresh_assets(data.provider.as_ref(), request, &data.policy).await?;

    match (
        assets.get(&request.from_currency),
        assets.get(&request.to_currency),
    ) {
        (Some(from), Some(to)) => cross_rate(from, to),
        _ => Err(ExchangeRateError::InvalidAsset),
    }
}

/// Registers the exchange-rate route. Query strings that fail to decode are
/// answered like missing parameters.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|_err, _req| ExchangeRateError::InvalidParameters.into()),
    )
    .route("/exchange-rate", web::get().to(get_exchange_rate));
}

pub async fn start_server(settings: Settings) -> anyhow::Result<()> {
    let provider: Arc<dyn TickerProvider> = Arc::new(ShrimpyClient::new(&settings.upstream)?);
    let app_state = web::Data::new(AppState::new(provider, settings.freshness_policy()));
    let addr = settings.server_addr();

    info!(
        "Listening on {}, tickers from {}",
        addr, settings.upstream.endpoint
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}
