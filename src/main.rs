// Logger init, settings load, server start

use crypto_exchange_rate::{start_server, Settings};
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::new()?;
    info!("Starting crypto exchange rate API ...");
    start_server(settings).await
}
