use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use skybrief::api::AppState;
use skybrief::config::SkybriefConfig;
use skybrief::nws::NwsClient;
use skybrief::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SkybriefConfig::from_env()?;
    let client = NwsClient::new(&config.upstream)?;
    let state = AppState {
        provider: Arc::new(client),
    };

    web::run(&config.server, state).await
}
