//! Server bootstrap: listener, middleware layers, and serve loop

use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Ceiling on whole-request handling time, comfortably above the two bounded
/// upstream calls a request can spend
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Weather summary server running at http://localhost:{}", config.port);
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}
